//! End-to-end builds through rolldown.

mod helpers;

use std::fs;

use brisk_bundler::{BuildOptions, BuildResult, Error, OutputFormat, OutputKind, Platform, SourceMapMode};
use helpers::{create_cli_project, write, CLI_ENTRIES};
use tempfile::TempDir;

#[tokio::test]
async fn multi_entry_esm_build_mirrors_source_layout() {
    let project = create_cli_project();

    let report = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .format(OutputFormat::Esm)
        .run()
        .await
        .expect("build");

    let dist = project.path().join("dist");
    assert_eq!(report.out_dir, dist);
    assert!(dist.join("index.js").is_file());
    assert!(dist.join("cli/zip.js").is_file());
    assert!(dist.join("cli/clone.js").is_file());

    let zip = fs::read_to_string(dist.join("cli/zip.js")).unwrap();
    assert!(zip.contains("zip"));
    assert!(!zip.contains(": string"), "type annotations must be stripped");

    let entries = report
        .files
        .iter()
        .filter(|f| f.kind == OutputKind::Entry)
        .count();
    assert_eq!(entries, 3);
}

#[tokio::test]
async fn esm_and_cjs_coexist_in_one_out_dir() {
    let project = create_cli_project();

    BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .formats([OutputFormat::Esm, OutputFormat::Cjs])
        .run()
        .await
        .expect("build");

    let dist = project.path().join("dist");
    for name in ["index", "cli/zip", "cli/clone"] {
        assert!(dist.join(format!("{name}.js")).is_file(), "{name}.js");
        assert!(dist.join(format!("{name}.cjs")).is_file(), "{name}.cjs");
    }

    let cjs = fs::read_to_string(dist.join("index.cjs")).unwrap();
    assert!(cjs.contains("exports"));
}

#[tokio::test]
async fn iife_builds_one_script_per_entry() {
    let project = create_cli_project();

    let result = BuildOptions::new(project.path())
        .entries(["src/cli/zip.ts", "src/cli/clone.ts"])
        .format(OutputFormat::Iife)
        .global_name("BriskTools")
        .build()
        .await
        .expect("build");

    let mut paths: Vec<_> = result
        .files_of(OutputKind::Entry)
        .map(|f| f.path.as_str())
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["clone.iife.js", "zip.iife.js"]);
    assert_eq!(result.files_of(OutputKind::Chunk).count(), 0);

    let zip = result.file("zip.iife.js").unwrap();
    assert!(String::from_utf8_lossy(&zip.contents).contains("BriskTools"));
}

#[tokio::test]
async fn build_is_in_memory_only() {
    let project = create_cli_project();

    let result = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .build()
        .await
        .expect("build");

    assert!(result.file("index.js").is_some());
    assert!(!project.path().join("dist").exists());
}

#[tokio::test]
async fn output_is_deterministic() {
    let project = create_cli_project();
    let options = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .formats([OutputFormat::Cjs, OutputFormat::Esm])
        .max_parallel_builds(4);

    let first = options.build().await.expect("first build");
    let second = options.build().await.expect("second build");

    let paths = |r: &brisk_bundler::BuildResult| {
        r.files.iter().map(|f| f.path.clone()).collect::<Vec<_>>()
    };
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.files[0].format, Some(OutputFormat::Cjs));
}

#[tokio::test]
async fn clean_removes_stale_output() {
    let project = create_cli_project();
    write(project.path(), "dist/stale.js", "old");

    let report = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .clean(true)
        .run()
        .await
        .expect("build");

    assert!(report.cleaned);
    assert!(!project.path().join("dist/stale.js").exists());
    assert!(project.path().join("dist/index.js").exists());
}

#[tokio::test]
async fn disabled_clean_keeps_stale_output() {
    let project = create_cli_project();
    write(project.path(), "dist/stale.js", "old");

    let report = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .clean(false)
        .run()
        .await
        .expect("build");

    assert!(!report.cleaned);
    assert!(project.path().join("dist/stale.js").exists());
}

#[tokio::test]
async fn clean_refuses_project_root() {
    let project = create_cli_project();

    let err = BuildOptions::new(project.path())
        .entries(CLI_ENTRIES)
        .out_dir(".")
        .clean(true)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsafeClean { .. }), "got {err}");
    assert!(project.path().join("package.json").exists());
    assert!(project.path().join("src/index.ts").exists());
}

#[tokio::test]
async fn missing_entry_is_reported_with_path() {
    let project = create_cli_project();

    let err = BuildOptions::new(project.path())
        .entries(["src/index.ts", "src/cli/missing.ts"])
        .run()
        .await
        .unwrap_err();

    match err {
        Error::EntryNotFound(path) => assert!(path.ends_with("src/cli/missing.ts")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!project.path().join("dist").exists());
}

#[tokio::test]
async fn engine_errors_leave_previous_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/index.ts", "import { nope } from './does-not-exist';\nnope();\n");
    write(dir.path(), "dist/previous.js", "keep me");

    let err = BuildOptions::new(dir.path())
        .entry("src/index.ts")
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Bundler(_)), "got {err}");
    assert!(dir.path().join("dist/previous.js").exists());
}

#[tokio::test]
async fn externals_are_not_bundled() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/index.ts",
        "import { thing } from 'some-package';\nexport const value = thing;\n",
    );

    let result = BuildOptions::new(dir.path())
        .entry("src/index.ts")
        .external(["some-package"])
        .build()
        .await
        .expect("build");

    let index = result.file("index.js").unwrap();
    assert!(String::from_utf8_lossy(&index.contents).contains("some-package"));
}

fn text(result: &BuildResult, path: &str) -> String {
    let file = result
        .file(path)
        .unwrap_or_else(|| panic!("missing output {path}"));
    String::from_utf8_lossy(&file.contents).into_owned()
}

async fn build_with_sourcemap(mode: SourceMapMode) -> BuildResult {
    let project = create_cli_project();
    BuildOptions::new(project.path())
        .entry("src/index.ts")
        .formats([OutputFormat::Esm, OutputFormat::Cjs])
        .sourcemap(Some(mode))
        .build()
        .await
        .expect("build")
}

#[tokio::test]
async fn external_sourcemaps_are_separate_and_referenced() {
    let result = build_with_sourcemap(SourceMapMode::External).await;

    for (code, map) in [("index.js", "index.js.map"), ("index.cjs", "index.cjs.map")] {
        let asset = result.file(map).unwrap_or_else(|| panic!("missing {map}"));
        assert_eq!(asset.kind, OutputKind::Asset);
        assert!(String::from_utf8_lossy(&asset.contents).contains("\"mappings\""));
        assert!(text(&result, code).contains(&format!("sourceMappingURL={map}")));
    }
}

#[tokio::test]
async fn hidden_sourcemaps_have_no_reference() {
    let result = build_with_sourcemap(SourceMapMode::Hidden).await;

    assert!(result.file("index.js.map").is_some());
    assert!(result.file("index.cjs.map").is_some());
    assert!(!text(&result, "index.js").contains("sourceMappingURL"));
    assert!(!text(&result, "index.cjs").contains("sourceMappingURL"));
}

#[tokio::test]
async fn inline_sourcemaps_are_data_urls() {
    let result = build_with_sourcemap(SourceMapMode::Inline).await;

    assert!(text(&result, "index.js").contains("sourceMappingURL=data:application/json"));
    assert!(result.files.iter().all(|f| !f.path.ends_with(".map")));
}

#[tokio::test]
async fn minify_shrinks_output() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/index.ts",
        r#"
export function describe(count: number): string {
    const label = count === 1 ? 'file' : 'files';
    const message = `${count} ${label}`;
    return message;
}

export const LIMIT: number = 10;
"#,
    );
    let options = BuildOptions::new(dir.path()).entry("src/index.ts");

    let plain = options.clone().build().await.expect("plain build");
    let minified = options.minify(true).build().await.expect("minified build");

    let plain = text(&plain, "index.js");
    let minified = text(&minified, "index.js");
    assert!(minified.len() < plain.len(), "{minified}");
    assert!(minified.trim().lines().count() < plain.trim().lines().count());
    assert!(!minified.contains("const message"));
}

fn create_dual_package_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "node_modules/dual/package.json",
        r#"{
  "name": "dual",
  "exports": {
    ".": {
      "node": "./node.js",
      "browser": "./browser.js",
      "default": "./node.js"
    }
  }
}"#,
    );
    write(root, "node_modules/dual/node.js", "export const target = 'node-build';\n");
    write(root, "node_modules/dual/browser.js", "export const target = 'browser-build';\n");
    write(
        root,
        "src/index.ts",
        "import { target } from 'dual';\nexport const where: string = target;\n",
    );
    dir
}

#[tokio::test]
async fn platform_selects_export_condition() {
    let project = create_dual_package_project();
    let options = BuildOptions::new(project.path()).entry("src/index.ts");

    let browser = options
        .clone()
        .platform(Platform::Browser)
        .build()
        .await
        .expect("browser build");
    let browser = text(&browser, "index.js");
    assert!(browser.contains("browser-build"), "{browser}");
    assert!(!browser.contains("node-build"));

    let node = options.platform(Platform::Node).build().await.expect("node build");
    assert!(text(&node, "index.js").contains("node-build"));
}
