use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_global;

/// Available brisk subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the configured entries
    ///
    /// Runs one bundler job per output format, emits declarations when
    /// enabled and writes everything to the output directory.
    Build(BuildArgs),

    /// Validate configuration
    ///
    /// Loads the configuration from every source, validates it and prints
    /// the resolved build plan without building.
    Check(CheckArgs),

    /// Create a brisk.config.json in the project root
    Init(InitArgs),
}

/// Arguments for the build command
///
/// Every option left unset falls back to the environment, then the config
/// file, then the built-in default.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Entry points to build (overrides `entry` from the config)
    ///
    /// Examples:
    ///   brisk build src/index.ts
    ///   brisk build src/index.ts src/cli/zip.ts src/cli/clone.ts
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Output formats
    ///
    /// - esm: ECMAScript modules (`.js`)
    /// - cjs: CommonJS (`.cjs`)
    /// - iife: browser script (`.iife.js`, needs --global-name)
    ///
    /// Examples:
    ///   --format esm --format cjs
    ///   --format esm,cjs
    #[arg(short = 'f', long, value_enum, value_delimiter = ',', value_name = "FORMAT")]
    pub format: Vec<Format>,

    /// Output directory (default: dist)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Generate TypeScript declaration files (.d.ts)
    #[arg(long, overrides_with = "no_dts")]
    pub dts: bool,

    /// Do not generate declaration files
    #[arg(long, overrides_with = "dts")]
    pub no_dts: bool,

    /// Drop declarations annotated with @internal
    #[arg(long)]
    pub strip_internal: bool,

    /// Empty the output directory before writing (default)
    #[arg(long, overrides_with = "no_clean")]
    pub clean: bool,

    /// Keep existing files in the output directory
    #[arg(long, overrides_with = "clean")]
    pub no_clean: bool,

    /// Target platform (default: node)
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Source map generation mode
    #[arg(long, value_enum, value_name = "MODE")]
    pub sourcemap: Option<SourceMapMode>,

    /// Minify the output
    #[arg(short = 'm', long)]
    pub minify: bool,

    /// Packages to leave out of the bundle
    ///
    /// Examples:
    ///   --external react --external react-dom
    ///   --external react,react-dom
    #[arg(short, long, value_delimiter = ',', value_name = "PACKAGE")]
    pub external: Vec<String>,

    /// Global variable name for IIFE output
    ///
    /// Example: --global-name MyLibrary
    #[arg(long, value_parser = parse_global, value_name = "NAME")]
    pub global_name: Option<String>,

    /// Path to a config file (JSON or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the nearest directory with a package.json)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Rebuild when source files change
    #[arg(short, long)]
    pub watch: bool,
}

impl BuildArgs {
    /// `Some(true)` for `--dts`, `Some(false)` for `--no-dts`, else `None`.
    pub fn dts_flag(&self) -> Option<bool> {
        flag_pair(self.dts, self.no_dts)
    }

    /// `Some(true)` for `--clean`, `Some(false)` for `--no-clean`, else `None`.
    pub fn clean_flag(&self) -> Option<bool> {
        flag_pair(self.clean, self.no_clean)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Path to a config file (JSON or TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root (defaults to the nearest directory with a package.json)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Show warnings in addition to errors
    ///
    /// Reports settings that are valid but probably not what you want.
    #[arg(short, long)]
    pub warnings: bool,

    /// Print the JSON Schema of the config file and exit
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing brisk.config.json
    #[arg(long)]
    pub force: bool,

    /// Directory to create the config in (defaults to the project root)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
