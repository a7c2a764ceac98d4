use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for bundled code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Esm,
    Cjs,
    Iife,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Esm => "esm",
            Format::Cjs => "cjs",
            Format::Iife => "iife",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esm" => Ok(Format::Esm),
            "cjs" => Ok(Format::Cjs),
            "iife" => Ok(Format::Iife),
            other => Err(format!(
                "unknown format '{}', expected one of: esm, cjs, iife",
                other
            )),
        }
    }
}

/// Accepted shapes of the `format` field.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FormatSetting {
    /// A list of formats, e.g. ["esm", "cjs"]
    Many(Vec<Format>),
    /// A single format or a comma separated list, e.g. "esm" or "esm,cjs"
    One(String),
}

impl FormatSetting {
    pub fn into_formats(self) -> Result<Vec<Format>, String> {
        match self {
            FormatSetting::Many(formats) => Ok(formats),
            FormatSetting::One(text) => text
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse)
                .collect(),
        }
    }
}

pub(crate) fn deserialize_formats<'de, D>(deserializer: D) -> Result<Vec<Format>, D::Error>
where
    D: Deserializer<'de>,
{
    FormatSetting::deserialize(deserializer)?
        .into_formats()
        .map_err(serde::de::Error::custom)
}

/// Source map generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    Inline,
    External,
    Hidden,
}

/// Target platform environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Node,
    Browser,
    Neutral,
}
