//! Configuration system for brisk with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use conversions::CliOverrides;
pub use defaults::*;
pub use loading::{ConfigSource, CONFIG_FILE_NAMES, ENV_PREFIX};
pub use types::*;
pub use validation::*;

/// brisk configuration - loaded from brisk.config.json, brisk.config.toml,
/// the `brisk` field of package.json, `BRISK_*` variables or CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BriskConfig {
    /// Entry points to build (e.g., ["src/index.ts"])
    #[serde(default = "default_entry")]
    pub entry: Vec<String>,

    /// Output formats: one of esm, cjs, iife, or a list of them
    #[serde(default = "default_formats", deserialize_with = "types::deserialize_formats")]
    #[schemars(with = "FormatSetting")]
    pub format: Vec<Format>,

    /// Generate TypeScript declarations
    #[serde(default)]
    pub dts: bool,

    /// Drop declarations annotated with @internal (requires dts: true)
    #[serde(default)]
    pub strip_internal: bool,

    /// Empty the output directory before writing
    #[serde(default = "default_clean")]
    pub clean: bool,

    /// Output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Target platform
    #[serde(default = "default_platform")]
    pub platform: Platform,

    /// Source map mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<SourceMapMode>,

    /// Enable minification
    #[serde(default)]
    pub minify: bool,

    /// External packages to exclude from the bundle
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,

    /// Global variable name for IIFE bundles (must be valid JS identifier)
    #[schemars(regex(pattern = r"^[a-zA-Z_$][a-zA-Z0-9_$]*(\.[a-zA-Z_$][a-zA-Z0-9_$]*)*$"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,

    /// Project root, relative to the directory the config was found in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Default for BriskConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            format: default_formats(),
            dts: false,
            strip_internal: false,
            clean: default_clean(),
            out_dir: default_out_dir(),
            platform: default_platform(),
            sourcemap: None,
            minify: false,
            external: Vec::new(),
            global_name: None,
            cwd: None,
        }
    }
}

impl BriskConfig {
    /// The package build this tool was made for: a library entry plus two
    /// CLI entries, ESM only, with declarations and a clean output directory.
    pub fn canonical() -> Self {
        Self {
            entry: vec![
                "src/index.ts".to_string(),
                "src/cli/zip.ts".to_string(),
                "src/cli/clone.ts".to_string(),
            ],
            format: vec![Format::Esm],
            dts: true,
            clean: true,
            ..Self::default()
        }
    }

    /// Contents of the `brisk.config.json` written by `brisk init`.
    pub fn canonical_json() -> crate::error::Result<String> {
        let canonical = Self::canonical();
        let document = serde_json::json!({
            "entry": canonical.entry,
            "format": canonical.format,
            "dts": canonical.dts,
            "clean": canonical.clean,
        });
        Ok(serde_json::to_string_pretty(&document)? + "\n")
    }

    /// Generate JSON Schema for brisk.config.json.
    pub fn json_schema() -> crate::error::Result<serde_json::Value> {
        let schema = schemars::schema_for!(BriskConfig);
        Ok(serde_json::to_value(schema)?)
    }
}
