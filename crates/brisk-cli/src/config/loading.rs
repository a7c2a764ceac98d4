use crate::config::{BriskConfig, CliOverrides};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config files looked up in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["brisk.config.json", "brisk.config.toml"];

/// Prefix of the environment variables read into the config.
pub const ENV_PREFIX: &str = "BRISK_";

/// Config keys that may come from the environment (`BRISK_OUT_DIR` -> `outDir`).
const ENV_KEYS: [&str; 9] = [
    "format",
    "out_dir",
    "dts",
    "strip_internal",
    "clean",
    "platform",
    "sourcemap",
    "minify",
    "global_name",
];

/// Where the file layer of a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// brisk.config.json / brisk.config.toml or a `--config` path
    File(PathBuf),
    /// The `brisk` field of package.json
    PackageJson(PathBuf),
    /// Defaults, environment and CLI only
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::PackageJson(path) => write!(f, "{} (\"brisk\" field)", path.display()),
            ConfigSource::Defaults => f.write_str("defaults"),
        }
    }
}

impl BriskConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// `project_root` is where config files are looked up; `config_path`
    /// replaces the lookup.
    pub fn load(
        overrides: &CliOverrides,
        config_path: Option<&Path>,
        project_root: &Path,
    ) -> Result<(Self, ConfigSource)> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let source = discover_config(config_path, project_root)?;
        match &source {
            ConfigSource::File(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                figment = match path.extension().and_then(|e| e.to_str()) {
                    Some("toml") => figment.merge(Toml::file(path)),
                    _ => figment.merge(Json::file(path)),
                };
            }
            ConfigSource::PackageJson(path) => {
                tracing::debug!(path = %path.display(), "loading \"brisk\" field of package.json");
                if let Some(value) = read_package_json_field(path)? {
                    figment = figment.merge(Serialized::defaults(value));
                }
            }
            ConfigSource::Defaults => {
                tracing::debug!("no config file found, using defaults");
            }
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .only(&ENV_KEYS)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        let config = figment.extract::<Self>().map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        Ok((config, source))
    }
}

/// Pick the file layer: an explicit path, a config file in the project root,
/// or the `brisk` field of package.json.
fn discover_config(config_path: Option<&Path>, project_root: &Path) -> Result<ConfigSource> {
    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        return Ok(match path.file_name().and_then(|n| n.to_str()) {
            Some("package.json") => ConfigSource::PackageJson(path.to_path_buf()),
            _ => ConfigSource::File(path.to_path_buf()),
        });
    }

    for name in CONFIG_FILE_NAMES {
        let candidate = project_root.join(name);
        if candidate.is_file() {
            return Ok(ConfigSource::File(candidate));
        }
    }

    let package_json = project_root.join("package.json");
    if package_json.is_file() && read_package_json_field(&package_json)?.is_some() {
        return Ok(ConfigSource::PackageJson(package_json));
    }

    Ok(ConfigSource::Defaults)
}

fn read_package_json_field(path: &Path) -> Result<Option<serde_json::Value>> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut manifest: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    match manifest.get_mut("brisk").map(serde_json::Value::take) {
        None => Ok(None),
        Some(value @ serde_json::Value::Object(_)) => Ok(Some(value)),
        Some(other) => Err(ConfigError::InvalidValue {
            field: "brisk".to_string(),
            value: other.to_string(),
            hint: "The \"brisk\" field of package.json must be an object".to_string(),
        }
        .into()),
    }
}

/// `OUT_DIR` / `out_dir` -> `outDir`.
fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}
