//! Error handling for the brisk CLI.
//!
//! - [`CliError`] is what commands return; domain errors convert into it.
//! - [`ConfigError`] covers loading and validating the configuration record.
//! - [`BuildError`] covers CLI-side build checks. Failures inside the build
//!   itself arrive as [`brisk_bundler::Error`] and keep their diagnostics.
//!
//! ```rust,no_run
//! use brisk_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_config(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Run `brisk init` to create a config file")
//! }
//! ```

mod miette;

use std::path::PathBuf;
use thiserror::Error;

pub use self::miette::{build_error_to_miette, cli_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CLI-side build checks failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The build itself failed
    #[error(transparent)]
    Bundler(#[from] brisk_bundler::Error),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Run 'brisk init' to create brisk.config.json or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Config file could not be parsed or has wrong field types
    #[error("Invalid configuration: {message}\n\nHint: Run 'brisk check --schema' to see the accepted fields")]
    Parse {
        /// Parser message, including the offending source when known
        message: String,
    },

    /// `package.json` is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// `init` would overwrite an existing config file
    #[error("Config file already exists: {}\n\nHint: Use --force to overwrite it", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-side build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Output directory lies outside the project
    #[error("Output directory is not writable: {}\n\nHint: Use a directory inside the project (or next to it), e.g. --out-dir dist", .0.display())]
    OutputNotWritable(PathBuf),

    /// Output directory resolves into a system location
    #[error("Refusing to write to system directory: {}", .0.display())]
    SystemDirectory(PathBuf),

    /// The project root does not point at a directory
    #[error("Project directory does not exist: {}\n\nHint: Check the --cwd argument and the `cwd` field of the config", .0.display())]
    ProjectNotFound(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
