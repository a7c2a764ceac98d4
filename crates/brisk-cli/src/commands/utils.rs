//! Shared utilities for command implementations.
//!
//! - Path resolution
//! - Project root detection
//! - Configuration loading for a project
//! - Output directory safety checks

use crate::config::{BriskConfig, CliOverrides, ConfigSource};
use crate::error::{BuildError, CliError, Result};
use crate::ui;
use std::path::{Path, PathBuf};

/// A configuration together with the project it applies to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: BriskConfig,
    /// Absolute project root; entries and `outDir` are relative to it.
    pub root: PathBuf,
    pub source: ConfigSource,
}

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Find the nearest directory containing a package.json, walking up from
/// `start_dir`.
///
/// ```
/// # use std::path::Path;
/// # use brisk_cli::commands::utils::find_package_json;
/// let root = find_package_json(Path::new("/nonexistent/project/src"));
/// assert!(root.is_none());
/// ```
pub fn find_package_json(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| dir.join("package.json").is_file())
        .map(Path::to_path_buf)
}

/// Resolve the directory config files are looked up in.
///
/// Priority:
/// 1. Explicit `--cwd` flag
/// 2. Nearest package.json walking up from the current directory
/// 3. The current directory
///
/// # Errors
///
/// Fails if the explicit directory doesn't exist or isn't a directory.
pub fn resolve_project_root(explicit_cwd: Option<&Path>) -> Result<PathBuf> {
    let current_dir = get_cwd()?;

    if let Some(cwd_path) = explicit_cwd {
        let absolute = resolve_path(cwd_path, &current_dir);
        if !absolute.is_dir() {
            return Err(BuildError::ProjectNotFound(absolute).into());
        }
        tracing::debug!(root = %absolute.display(), "project root from --cwd");
        return Ok(absolute);
    }

    if let Some(package_root) = find_package_json(&current_dir) {
        tracing::debug!(root = %package_root.display(), "project root from package.json");
        return Ok(package_root);
    }

    ui::warning(&format!(
        "No package.json found. Using current directory: {}",
        current_dir.display()
    ));
    Ok(current_dir)
}

/// Find the project, load its configuration and resolve the `cwd` field.
pub fn load_project(
    explicit_cwd: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<LoadedConfig> {
    let lookup_root = resolve_project_root(explicit_cwd)?;
    // `--config` is relative to the shell's directory, not the project
    let config_path = match config_path {
        Some(path) => Some(resolve_path(path, &get_cwd()?)),
        None => None,
    };

    let (config, source) = BriskConfig::load(overrides, config_path.as_deref(), &lookup_root)?;

    // A `cwd` field is relative to the file that set it
    let root = match &config.cwd {
        Some(cwd) => {
            let base = match &source {
                ConfigSource::File(path) | ConfigSource::PackageJson(path) => {
                    path.parent().unwrap_or(lookup_root.as_path())
                }
                ConfigSource::Defaults => lookup_root.as_path(),
            };
            resolve_path(cwd, base)
        }
        None => lookup_root,
    };
    if !root.is_dir() {
        return Err(BuildError::ProjectNotFound(root).into());
    }

    tracing::debug!(root = %root.display(), source = %source, "configuration loaded");
    Ok(LoadedConfig {
        config,
        root,
        source,
    })
}

/// Checks that the output directory is safe to write to.
///
/// The directory must lie inside the project or be a sibling of it, and must
/// not resolve into a system directory.
///
/// # Errors
///
/// `OutputNotWritable` outside the project, `SystemDirectory` for system paths.
pub fn validate_output_dir(out_dir: &Path, project_root: &Path) -> Result<()> {
    let resolved_out_dir = resolve_path(out_dir, project_root);
    let canonical_out = canonicalize_lenient(&resolved_out_dir);
    let canonical_root = canonicalize_lenient(project_root);

    if canonical_out.parent().is_none() {
        return Err(BuildError::SystemDirectory(canonical_out).into());
    }

    const DANGEROUS_PATHS: &[&str] = &[
        "/bin", "/boot", "/dev", "/etc", "/lib", "/lib64", "/proc", "/sbin", "/sys", "/usr/bin",
        "/usr/lib", "/usr/sbin", "/var/log",
    ];
    if DANGEROUS_PATHS
        .iter()
        .any(|dangerous| canonical_out.starts_with(dangerous))
    {
        return Err(BuildError::SystemDirectory(canonical_out).into());
    }

    let is_within_project = canonical_out.starts_with(&canonical_root);
    let is_sibling = canonical_out
        .parent()
        .zip(canonical_root.parent())
        .is_some_and(|(out_parent, root_parent)| out_parent == root_parent);

    if !is_within_project && !is_sibling {
        return Err(BuildError::OutputNotWritable(resolved_out_dir).into());
    }

    Ok(())
}

/// Canonicalize the longest existing ancestor and append the rest, so paths
/// that don't exist yet still resolve symlinks and `..`.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut missing = Vec::new();
    let mut existing = path;
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}
