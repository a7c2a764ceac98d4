//! # brisk-bundler
//!
//! Multi-format build orchestration on top of rolldown.
//!
//! A build takes a set of entry points and a set of output formats, plans one
//! engine job per format (per entry for IIFE), runs the jobs concurrently, emits
//! TypeScript declarations with OXC when asked to, and writes everything into one
//! output directory.
//!
//! ```no_run
//! use brisk_bundler::{BuildOptions, OutputFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = BuildOptions::new("/path/to/project")
//!     .entries(["src/index.ts", "src/cli/zip.ts"])
//!     .formats([OutputFormat::Esm, OutputFormat::Cjs])
//!     .dts(true)
//!     .build()
//!     .await?;
//!
//! for file in &result.files {
//!     println!("{} ({} bytes)", file.path, file.size());
//! }
//! result.write_to("dist".as_ref())?;
//! # Ok(()) }
//! ```

use std::path::PathBuf;

pub mod clean;
pub mod dts;
pub mod entry;
mod executor;
pub mod format;
mod options;
pub mod output;
pub mod plan;

pub use clean::clean_output_dir;
pub use dts::DtsOptions;
pub use entry::{EntrySpec, ResolvedEntries};
pub use executor::default_parallelism;
pub use format::{OutputFormat, Platform, SourceMapMode};
pub use options::{is_valid_identifier, BuildOptions};
pub use output::{BuildReport, BuildResult, OutputFile, OutputKind, WrittenFile};
pub use plan::{plan_jobs, BuildJob};

/// Error types for brisk-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reported by the bundling engine.
    #[error("Bundler error: {0}")]
    Bundler(String),

    /// Several build jobs failed.
    #[error("{count} build jobs failed:\n{details}")]
    JobsFailed { count: usize, details: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Entry point does not exist or is not a file.
    #[error("Entry point not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// Two entry files map to the same output name.
    #[error(
        "Entries '{}' and '{}' both produce output '{name}'",
        first.display(),
        second.display()
    )]
    DuplicateEntryName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Declaration emission failed for a module.
    #[error("Declaration generation failed for {}: {message}", file.display())]
    Declaration { file: PathBuf, message: String },

    /// Output directory is not safe to clean.
    #[error("Refusing to clean '{}': {reason}", path.display())]
    UnsafeClean { path: PathBuf, reason: String },

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// Two output files resolve to the same path.
    #[error("Output conflict: '{0}' is produced more than once")]
    OutputConflict(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for brisk-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a rolldown error batch.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(format!("{error:?}"))
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "brisk::bundler",
            Error::JobsFailed { .. } => "brisk::jobs_failed",
            Error::InvalidConfig(_) => "brisk::invalid_config",
            Error::EntryNotFound(_) => "brisk::entry_not_found",
            Error::DuplicateEntryName { .. } => "brisk::duplicate_entry_name",
            Error::Declaration { .. } => "brisk::declaration",
            Error::UnsafeClean { .. } => "brisk::unsafe_clean",
            Error::InvalidOutputPath(_) => "brisk::invalid_output_path",
            Error::OutputConflict(_) => "brisk::output_conflict",
            Error::WriteFailure(_) => "brisk::write_failure",
            Error::Io(_) => "brisk::io",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        let help: String = match self {
            Error::EntryNotFound(_) => {
                "Check the `entry` list in your config or the paths passed on the command line"
                    .to_string()
            }
            Error::DuplicateEntryName { .. } => {
                "Rename one of the files; outputs are named after the entry path without its extension"
                    .to_string()
            }
            Error::Declaration { .. } => {
                "Isolated declarations need explicit types on every exported function, class member and variable"
                    .to_string()
            }
            Error::UnsafeClean { .. } => {
                "Point `outDir` at a dedicated build directory such as `dist`, or disable `clean`"
                    .to_string()
            }
            Error::InvalidOutputPath(_) => {
                "Output paths must stay inside the output directory".to_string()
            }
            Error::OutputConflict(_) => {
                "Two formats or entries produced the same file name; check `format` and `entry`"
                    .to_string()
            }
            Error::WriteFailure(_) => "Check disk space and permissions".to_string(),
            _ => return None,
        };
        Some(Box::new(help))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn errors_carry_codes_and_help() {
        let err = Error::EntryNotFound(PathBuf::from("/p/src/missing.ts"));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("brisk::entry_not_found")
        );
        assert!(err.help().is_some());
        assert!(err.to_string().contains("/p/src/missing.ts"));
    }

    #[test]
    fn unsafe_clean_message_includes_reason() {
        let err = Error::UnsafeClean {
            path: PathBuf::from("/p"),
            reason: "it is the project root".to_string(),
        };
        assert_eq!(err.to_string(), "Refusing to clean '/p': it is the project root");
    }
}
