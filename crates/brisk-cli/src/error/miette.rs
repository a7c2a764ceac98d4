//! Conversion of CLI errors into miette reports.

use crate::error::{BuildError, CliError};
use miette::Report;

/// Convert a [`CliError`] into a report for `main`.
///
/// Bundler errors keep their own diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => Report::new(e),
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!(code = "brisk::config", "{}", e),
        other => miette::miette!("{}", other),
    }
}

/// Convert a [`BuildError`] into a report.
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::SystemDirectory(path) => miette::miette!(
            code = "brisk::system_directory",
            help = "Choose an output directory inside your project",
            "Refusing to write to system directory: {}",
            path.display()
        ),
        other => miette::miette!(code = "brisk::build", "{}", other),
    }
}
