//! Command-line interface definition for brisk.
//!
//! # Command Structure
//!
//! - `brisk build` - Build every entry in every requested format
//! - `brisk check` - Load and validate the configuration, print the build plan
//! - `brisk init` - Write a starter `brisk.config.json`

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, InitArgs};
pub use enums::*;
pub use validation::parse_global;

/// brisk - multi-format builds for TypeScript packages
#[derive(Parser, Debug)]
#[command(
    name = "brisk",
    version,
    about = "Multi-format builds for TypeScript packages",
    long_about = "brisk builds a set of entry points into one or more module formats\n\
                  (ESM, CommonJS, IIFE), optionally emits TypeScript declarations and\n\
                  cleans the output directory first. Bundling is done by rolldown."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    ///
    /// Only errors are displayed. Useful for CI or when piping output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
