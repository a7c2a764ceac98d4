//! End-to-end tests of the `brisk` binary.

mod helpers;

use assert_cmd::prelude::*;
use helpers::{create_project, CANONICAL_CONFIG};
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn brisk() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brisk"));
    cmd.arg("--no-color");
    for var in ["BRISK_FORMAT", "BRISK_OUT_DIR", "BRISK_DTS", "BRISK_CLEAN", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_build_canonical_project() {
    let temp = create_project();

    brisk()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Build Summary"));

    let dist = temp.path().join("dist");
    assert!(dist.join("index.js").is_file());
    assert!(dist.join("cli/zip.js").is_file());
    assert!(dist.join("cli/clone.js").is_file());
    assert!(dist.join("index.d.ts").is_file());
}

#[test]
fn test_build_from_nested_directory_finds_project_root() {
    let temp = create_project();

    brisk()
        .current_dir(temp.path().join("src/cli"))
        .arg("build")
        .assert()
        .success();

    assert!(temp.path().join("dist/index.js").is_file());
    assert!(!temp.path().join("src/cli/dist").exists());
}

#[test]
fn test_env_overrides_config_file() {
    let temp = create_project();

    brisk()
        .current_dir(temp.path())
        .env("BRISK_FORMAT", "cjs")
        .env("BRISK_DTS", "false")
        .arg("build")
        .assert()
        .success();

    let dist = temp.path().join("dist");
    assert!(dist.join("index.cjs").is_file());
    assert!(!dist.join("index.js").exists());
    assert!(!dist.join("index.d.ts").exists());
}

#[test]
fn test_missing_entry_fails_with_path() {
    let temp = create_project();
    fs::remove_file(temp.path().join("src/cli/zip.ts")).unwrap();

    brisk()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("zip.ts"));
}

#[test]
fn test_invalid_format_flag_is_rejected() {
    brisk()
        .args(["build", "--format", "umd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("umd"));
}

#[test]
fn test_init_then_check() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), r#"{ "name": "fresh" }"#).unwrap();

    brisk()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let written = fs::read_to_string(temp.path().join("brisk.config.json")).unwrap();
    let written: serde_json::Value = serde_json::from_str(&written).unwrap();
    let expected: serde_json::Value = serde_json::from_str(CANONICAL_CONFIG).unwrap();
    assert_eq!(written, expected);

    brisk()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    brisk()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();

    // entries don't exist yet
    brisk()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("index.ts"));
}

#[test]
fn test_check_valid_project_prints_plan() {
    let temp = create_project();

    brisk()
        .current_dir(temp.path())
        .args(["check", "--warnings"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cli/zip"))
        .stderr(predicate::str::contains("esm"))
        .stderr(predicate::str::contains("All checks passed"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_check_rejects_unknown_field() {
    let temp = create_project();
    fs::write(
        temp.path().join("brisk.config.json"),
        r#"{ "entry": ["src/index.ts"], "bundle": false }"#,
    )
    .unwrap();

    brisk()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bundle"));
}

#[test]
fn test_check_schema_goes_to_stdout() {
    let output = brisk().args(["check", "--schema"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let schema: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("entry"));
    assert!(properties.contains_key("format"));
    assert!(properties.contains_key("dts"));
    assert!(properties.contains_key("clean"));
}

#[test]
fn test_quiet_build_prints_nothing_on_success() {
    let temp = create_project();

    brisk()
        .current_dir(temp.path())
        .args(["--quiet", "build"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Build Summary").not());
}
