//! brisk CLI - multi-format builds for TypeScript packages.
//!
//! The binary reads a small declarative build record (entries, formats,
//! declaration emission, clean) from `brisk.config.json`, `brisk.config.toml`,
//! the `brisk` field of `package.json`, `BRISK_*` environment variables and
//! command-line flags, then drives [`brisk_bundler`] to produce the output.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`config`] - the configuration record, layered loading and validation
//! - [`commands`] - `build`, `check` and `init`
//! - [`watch`] - file watching for `build --watch`
//! - [`error`] - error types with actionable messages
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines, spinner and build summary
//!
//! # Example
//!
//! ```rust
//! use brisk_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watch;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
