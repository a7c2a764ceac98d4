//! Entry point resolution and naming.
//!
//! Entries are resolved against the project root, de-duplicated, and named after
//! their path relative to the lowest common ancestor of all entries (the *entry
//! base*). `src/index.ts` and `src/cli/zip.ts` share the base `src`, so they are
//! named `index` and `cli/zip` and land at `dist/index.js` and `dist/cli/zip.js`.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// A resolved entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    /// Output name relative to the entry base, `/`-separated, without extension.
    pub name: String,
    /// Absolute, cleaned path of the source file.
    pub path: PathBuf,
}

/// All entries of a build plus their common base directory.
#[derive(Debug, Clone)]
pub struct ResolvedEntries {
    pub base: PathBuf,
    pub entries: Vec<EntrySpec>,
}

impl ResolvedEntries {
    /// Resolve `entries` relative to `cwd`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] when `entries` is empty
    /// - [`Error::EntryNotFound`] when a file is missing or is not a file
    /// - [`Error::DuplicateEntryName`] when two files map to the same output name
    pub fn resolve<P: AsRef<Path>>(cwd: &Path, entries: &[P]) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one entry point is required".to_string(),
            ));
        }

        let mut paths: Vec<PathBuf> = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = absolutize(cwd, entry.as_ref());
            if !path.is_file() {
                return Err(Error::EntryNotFound(path));
            }
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        let base = common_base(&paths);
        let mut by_name: FxHashMap<String, PathBuf> = FxHashMap::default();
        let mut resolved = Vec::with_capacity(paths.len());

        for path in paths {
            let name = entry_name(&base, &path);
            if let Some(first) = by_name.get(&name) {
                return Err(Error::DuplicateEntryName {
                    name,
                    first: first.clone(),
                    second: path,
                });
            }
            by_name.insert(name.clone(), path.clone());
            resolved.push(EntrySpec { name, path });
        }

        tracing::debug!(
            base = %base.display(),
            count = resolved.len(),
            "resolved entry points"
        );

        Ok(Self {
            base,
            entries: resolved,
        })
    }

    /// Entries that are TypeScript sources.
    pub fn typescript_entries(&self) -> impl Iterator<Item = &EntrySpec> {
        self.entries
            .iter()
            .filter(|entry| is_typescript_source(&entry.path))
    }
}

/// Join a relative path onto `cwd` and clean the result.
pub(crate) fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

/// Lowest common ancestor directory of the given files.
fn common_base(paths: &[PathBuf]) -> PathBuf {
    let mut base: Option<PathBuf> = None;

    for path in paths {
        let parent = path.parent().unwrap_or(Path::new("/")).to_path_buf();
        base = Some(match base {
            None => parent,
            Some(current) => shared_prefix(&current, &parent),
        });
    }

    base.unwrap_or_default()
}

fn shared_prefix(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

/// Output name of `path` relative to `base`, without extension.
fn entry_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        *last = strip_source_extension(last).to_string();
    }

    parts.join("/")
}

/// Strip a source extension, treating `.d.ts`-style double extensions as one.
fn strip_source_extension(file_name: &str) -> &str {
    for suffix in [".d.ts", ".d.mts", ".d.cts"] {
        if let Some(stem) = file_name.strip_suffix(suffix) {
            return stem;
        }
    }
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    }
}

/// Whether `path` is a TypeScript source that can produce declarations.
pub fn is_typescript_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext, "ts" | "tsx" | "mts" | "cts"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {}").unwrap();
    }

    #[test]
    fn names_follow_common_base() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");
        touch(temp.path(), "src/cli/zip.ts");
        touch(temp.path(), "src/cli/clone.ts");

        let resolved = ResolvedEntries::resolve(
            temp.path(),
            &["src/index.ts", "src/cli/zip.ts", "src/cli/clone.ts"],
        )
        .unwrap();

        assert_eq!(resolved.base, temp.path().join("src"));
        let names: Vec<_> = resolved.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["index", "cli/zip", "cli/clone"]);
    }

    #[test]
    fn single_entry_uses_parent_as_base() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/cli/zip.ts");

        let resolved = ResolvedEntries::resolve(temp.path(), &["src/cli/zip.ts"]).unwrap();
        assert_eq!(resolved.base, temp.path().join("src/cli"));
        assert_eq!(resolved.entries[0].name, "zip");
    }

    #[test]
    fn duplicates_are_collapsed() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");

        let resolved =
            ResolvedEntries::resolve(temp.path(), &["src/index.ts", "./src/index.ts"]).unwrap();
        assert_eq!(resolved.entries.len(), 1);
    }

    #[test]
    fn clashing_names_are_rejected() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/a.ts");
        touch(temp.path(), "src/a.js");

        let err = ResolvedEntries::resolve(temp.path(), &["src/a.ts", "src/a.js"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntryName { ref name, .. } if name == "a"));
    }

    #[test]
    fn missing_entry_reports_path() {
        let temp = TempDir::new().unwrap();
        let err = ResolvedEntries::resolve(temp.path(), &["src/missing.ts"]).unwrap_err();
        match err {
            Error::EntryNotFound(path) => assert!(path.ends_with("src/missing.ts")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_entries_are_rejected() {
        let temp = TempDir::new().unwrap();
        let entries: [&str; 0] = [];
        assert!(matches!(
            ResolvedEntries::resolve(temp.path(), &entries),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn typescript_detection() {
        assert!(is_typescript_source(Path::new("src/index.ts")));
        assert!(is_typescript_source(Path::new("src/view.tsx")));
        assert!(is_typescript_source(Path::new("src/mod.mts")));
        assert!(!is_typescript_source(Path::new("src/types.d.ts")));
        assert!(!is_typescript_source(Path::new("src/index.js")));
    }

    #[test]
    fn strip_extension_handles_declarations() {
        assert_eq!(strip_source_extension("index.ts"), "index");
        assert_eq!(strip_source_extension("types.d.ts"), "types");
        assert_eq!(strip_source_extension(".hidden"), ".hidden");
        assert_eq!(strip_source_extension("Makefile"), "Makefile");
    }
}
