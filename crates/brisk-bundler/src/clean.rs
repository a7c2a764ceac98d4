//! Output directory cleaning.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::entry::EntrySpec;
use crate::{Error, Result};

/// Remove everything inside `out_dir`, keeping the directory itself.
///
/// A missing directory is created. Returns the number of top-level items removed.
///
/// # Errors
///
/// [`Error::UnsafeClean`] when `out_dir` is the filesystem root, the project root or
/// one of its ancestors, when it contains an entry file, or when it exists but is
/// not a directory.
pub fn clean_output_dir(out_dir: &Path, project_root: &Path, entries: &[EntrySpec]) -> Result<usize> {
    check_clean_target(out_dir, project_root, entries)?;

    if !out_dir.exists() {
        fs::create_dir_all(out_dir)?;
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed += 1;
    }

    tracing::debug!(dir = %out_dir.display(), removed, "cleaned output directory");
    Ok(removed)
}

fn check_clean_target(out_dir: &Path, project_root: &Path, entries: &[EntrySpec]) -> Result<()> {
    let unsafe_clean = |reason: &str| Error::UnsafeClean {
        path: out_dir.to_path_buf(),
        reason: reason.to_string(),
    };

    let target = canonical(out_dir);
    let root = canonical(project_root);

    if target.parent().is_none() {
        return Err(unsafe_clean("it is the filesystem root"));
    }
    if target == root {
        return Err(unsafe_clean("it is the project root"));
    }
    if root.starts_with(&target) {
        return Err(unsafe_clean("it contains the project root"));
    }
    if let Some(entry) = entries.iter().find(|e| canonical(&e.path).starts_with(&target)) {
        return Err(unsafe_clean(&format!(
            "it contains the entry point {}",
            entry.path.display()
        )));
    }
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(unsafe_clean("it exists and is not a directory"));
    }

    Ok(())
}

/// Resolve symlinks when the path exists; otherwise keep the cleaned path.
fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf().clean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(path: PathBuf) -> EntrySpec {
        EntrySpec {
            name: "index".to_string(),
            path,
        }
    }

    #[test]
    fn removes_contents_but_keeps_directory() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir_all(out.join("old/nested")).unwrap();
        fs::write(out.join("stale.js"), "x").unwrap();
        fs::write(out.join("old/nested/a.js"), "x").unwrap();

        let removed = clean_output_dir(&out, temp.path(), &[]).unwrap();

        assert_eq!(removed, 2);
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");

        assert_eq!(clean_output_dir(&out, temp.path(), &[]).unwrap(), 0);
        assert!(out.is_dir());
    }

    #[test]
    fn refuses_project_root_and_ancestors() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("package.json"), "{}").unwrap();

        assert!(matches!(
            clean_output_dir(&root, &root, &[]),
            Err(Error::UnsafeClean { .. })
        ));
        assert!(matches!(
            clean_output_dir(temp.path(), &root, &[]),
            Err(Error::UnsafeClean { .. })
        ));
        assert!(matches!(
            clean_output_dir(Path::new("/"), &root, &[]),
            Err(Error::UnsafeClean { .. })
        ));
        assert!(root.join("package.json").exists());
    }

    #[test]
    fn refuses_directory_holding_entries() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.ts"), "export {}").unwrap();

        let err = clean_output_dir(&src, temp.path(), &[entry(src.join("index.ts"))]).unwrap_err();
        assert!(err.to_string().contains("entry point"));
        assert!(src.join("index.ts").exists());
    }

    #[test]
    fn refuses_regular_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("dist");
        fs::write(&out, "not a dir").unwrap();

        assert!(clean_output_dir(&out, temp.path(), &[]).is_err());
    }
}
