//! Shared fixtures for brisk-bundler integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

/// A TypeScript project with a library entry and two CLI entries sharing a helper.
pub fn create_cli_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    write(root, "package.json", r#"{ "name": "fixture", "type": "module" }"#);
    write(
        root,
        "src/shared.ts",
        r#"
export function banner(tool: string): string {
    return `[${tool}]`;
}
"#,
    );
    write(
        root,
        "src/index.ts",
        r#"
export { banner } from './shared';

export const VERSION: string = '1.0.0';
"#,
    );
    write(
        root,
        "src/cli/zip.ts",
        r#"
import { banner } from '../shared';

export function zip(files: string[]): string {
    return `${banner('zip')} ${files.length} files`;
}
"#,
    );
    write(
        root,
        "src/cli/clone.ts",
        r#"
import { banner } from '../shared';

export function clone(url: string): string {
    return `${banner('clone')} ${url}`;
}
"#,
    );

    dir
}

pub const CLI_ENTRIES: [&str; 3] = ["src/index.ts", "src/cli/zip.ts", "src/cli/clone.ts"];
