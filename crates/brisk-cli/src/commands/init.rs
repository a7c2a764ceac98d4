//! Init command implementation.
//!
//! Writes a `brisk.config.json` holding a library entry, two CLI entries,
//! ESM output, declarations and a clean output directory.

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::config::{BriskConfig, CONFIG_FILE_NAMES};
use crate::error::{ConfigError, Result, ResultExt};
use crate::ui;
use std::fs;

/// Execute the init command.
///
/// # Errors
///
/// `ConfigError::AlreadyExists` when a config file exists and `--force` is not
/// given; I/O errors when the file cannot be written.
pub async fn execute(args: InitArgs) -> Result<()> {
    let root = utils::resolve_project_root(args.cwd.as_deref())?;
    let path = root.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !args.force {
        return Err(ConfigError::AlreadyExists(path).into());
    }

    let contents = BriskConfig::canonical_json()?;
    fs::write(&path, contents).with_path(&path)?;

    ui::success(&format!("Created {}", path.display()));

    let missing: Vec<_> = BriskConfig::canonical()
        .entry
        .into_iter()
        .filter(|entry| !root.join(entry).is_file())
        .collect();
    if !missing.is_empty() {
        ui::warning(&format!(
            "Entry points not found yet: {}",
            missing.join(", ")
        ));
    }

    ui::info("Run `brisk build` to build the project");
    Ok(())
}
