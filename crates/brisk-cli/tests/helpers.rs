//! Shared fixtures for brisk CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const CANONICAL_CONFIG: &str = r#"{
  "entry": ["src/index.ts", "src/cli/zip.ts", "src/cli/clone.ts"],
  "format": ["esm"],
  "dts": true,
  "clean": true
}"#;

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

/// A package with a library entry and two CLI entries sharing a helper,
/// configured with the canonical brisk.config.json.
pub fn create_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    write(root, "package.json", r#"{ "name": "fixture", "type": "module" }"#);
    write(root, "brisk.config.json", CANONICAL_CONFIG);
    write(
        root,
        "src/shared.ts",
        "export function banner(tool: string): string {\n    return `[${tool}]`;\n}\n",
    );
    write(
        root,
        "src/index.ts",
        "export { banner } from './shared';\nexport const VERSION: string = '1.0.0';\n",
    );
    write(
        root,
        "src/cli/zip.ts",
        "import { banner } from '../shared';\n\nexport function zip(files: string[]): string {\n    return `${banner('zip')} ${files.length}`;\n}\n",
    );
    write(
        root,
        "src/cli/clone.ts",
        "import { banner } from '../shared';\n\nexport function clone(url: string): string {\n    return `${banner('clone')} ${url}`;\n}\n",
    );

    dir
}
