//! Integration tests for the build command.
//!
//! These tests run `build::execute` in-process against real projects.

mod helpers;

use brisk_cli::cli::{BuildArgs, Format};
use brisk_cli::commands::build;
use brisk_cli::error::{BuildError, CliError};
use helpers::{create_project, write};
use std::fs;
use std::path::PathBuf;

fn args_for(project: &std::path::Path) -> BuildArgs {
    BuildArgs {
        cwd: Some(project.to_path_buf()),
        ..BuildArgs::default()
    }
}

#[tokio::test]
async fn test_canonical_config_builds_every_entry() {
    let temp = create_project();
    let root = temp.path();

    build::execute(args_for(root)).await.unwrap();

    let dist = root.join("dist");
    for file in ["index.js", "cli/zip.js", "cli/clone.js"] {
        assert!(dist.join(file).is_file(), "missing {}", file);
    }
    for file in ["index.d.ts", "cli/zip.d.ts", "cli/clone.d.ts", "shared.d.ts"] {
        assert!(dist.join(file).is_file(), "missing {}", file);
    }
    assert!(!dist.join("index.cjs").exists());

    let zip_dts = fs::read_to_string(dist.join("cli/zip.d.ts")).unwrap();
    assert!(zip_dts.contains("zip"));
    assert!(zip_dts.contains("string"));
}

#[tokio::test]
async fn test_cli_flags_override_config_file() {
    let temp = create_project();
    let root = temp.path();

    let args = BuildArgs {
        format: vec![Format::Esm, Format::Cjs],
        out_dir: Some(PathBuf::from("lib")),
        no_dts: true,
        ..args_for(root)
    };
    build::execute(args).await.unwrap();

    let lib = root.join("lib");
    assert!(lib.join("index.js").is_file());
    assert!(lib.join("index.cjs").is_file());
    assert!(lib.join("cli/clone.cjs").is_file());
    assert!(!lib.join("index.d.ts").exists());
    assert!(!root.join("dist").exists());
}

#[tokio::test]
async fn test_clean_removes_stale_output() {
    let temp = create_project();
    let root = temp.path();
    write(root, "dist/stale.js", "old");

    build::execute(args_for(root)).await.unwrap();

    assert!(!root.join("dist/stale.js").exists());
    assert!(root.join("dist/index.js").is_file());
}

#[tokio::test]
async fn test_no_clean_keeps_existing_files() {
    let temp = create_project();
    let root = temp.path();
    write(root, "dist/keep.txt", "keep");

    let args = BuildArgs {
        no_clean: true,
        ..args_for(root)
    };
    build::execute(args).await.unwrap();

    assert!(root.join("dist/keep.txt").is_file());
    assert!(root.join("dist/index.js").is_file());
}

#[tokio::test]
async fn test_missing_entry_is_reported_with_path() {
    let temp = create_project();
    let root = temp.path();
    fs::remove_file(root.join("src/cli/clone.ts")).unwrap();

    let err = build::execute(args_for(root)).await.unwrap_err();

    assert!(matches!(err, CliError::Bundler(brisk_bundler::Error::EntryNotFound(_))));
    assert!(err.to_string().contains("clone.ts"));
    assert!(!root.join("dist").exists());
}

#[tokio::test]
async fn test_output_outside_project_is_refused() {
    let temp = create_project();
    let root = temp.path();

    let args = BuildArgs {
        out_dir: Some(PathBuf::from("../../brisk-escape")),
        ..args_for(root)
    };
    let err = build::execute(args).await.unwrap_err();
    assert!(matches!(err, CliError::Build(BuildError::OutputNotWritable(_))));
}

#[tokio::test]
async fn test_clean_refuses_project_root() {
    let temp = create_project();
    let root = temp.path();

    let args = BuildArgs {
        out_dir: Some(PathBuf::from(".")),
        ..args_for(root)
    };
    let err = build::execute(args).await.unwrap_err();

    assert!(matches!(
        err,
        CliError::Bundler(brisk_bundler::Error::UnsafeClean { .. })
    ));
    assert!(root.join("package.json").is_file());
    assert!(root.join("src/index.ts").is_file());
}

#[tokio::test]
async fn test_iife_requires_global_name() {
    let temp = create_project();
    let root = temp.path();

    let args = BuildArgs {
        format: vec![Format::Iife],
        ..args_for(root)
    };
    let err = build::execute(args).await.unwrap_err();
    assert!(err.to_string().contains("globalName"));

    let args = BuildArgs {
        format: vec![Format::Iife],
        global_name: Some("Brisk".to_string()),
        no_dts: true,
        ..args_for(root)
    };
    build::execute(args).await.unwrap();
    assert!(root.join("dist/index.iife.js").is_file());
    assert!(root.join("dist/cli/zip.iife.js").is_file());
}

#[tokio::test]
async fn test_package_json_field_config() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "package.json",
        r#"{ "name": "pkg", "brisk": { "entry": ["lib/main.ts"], "outDir": "out" } }"#,
    );
    write(root, "lib/main.ts", "export const answer: number = 42;\n");

    build::execute(args_for(root)).await.unwrap();
    assert!(root.join("out/main.js").is_file());
}
