use crate::config::{BriskConfig, Format};
use crate::error::{ConfigError, Result};
use brisk_bundler::is_valid_identifier;
use std::collections::HashSet;
use std::path::Path;

/// Validate global name follows JavaScript identifier rules.
pub fn validate_global_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "globalName".to_string(),
            value: "".to_string(),
            hint: "Global name cannot be empty".to_string(),
        }
        .into());
    }

    if !is_valid_identifier(name) {
        return Err(ConfigError::InvalidValue {
            field: "globalName".to_string(),
            value: name.to_string(),
            hint: "Use letters, digits, '_' or '$', not starting with a digit (e.g. MyLib)"
                .to_string(),
        }
        .into());
    }

    Ok(())
}

impl BriskConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entry".to_string(),
                hint: "Provide at least one entry point, e.g. \"entry\": [\"src/index.ts\"]"
                    .to_string(),
            }
            .into());
        }

        if let Some(blank) = self.entry.iter().find(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "entry".to_string(),
                value: format!("{:?}", blank),
                hint: "Entry paths cannot be empty".to_string(),
            }
            .into());
        }

        if self.format.is_empty() {
            return Err(ConfigError::MissingField {
                field: "format".to_string(),
                hint: "Provide at least one format: esm, cjs or iife".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        if let Some(repeated) = self.format.iter().find(|f| !seen.insert(**f)) {
            return Err(ConfigError::InvalidValue {
                field: "format".to_string(),
                value: repeated.to_string(),
                hint: "List each format once".to_string(),
            }
            .into());
        }

        if self.format.contains(&Format::Iife) && self.global_name.is_none() {
            return Err(ConfigError::MissingField {
                field: "globalName".to_string(),
                hint: "IIFE format requires a global variable name".to_string(),
            }
            .into());
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: "\"\"".to_string(),
                hint: "Use a dedicated directory such as \"dist\"".to_string(),
            }
            .into());
        }

        if let Some(ref name) = self.global_name {
            validate_global_name(name)?;
        }

        Ok(())
    }

    /// Settings that are valid but probably not intended.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.strip_internal && !self.dts {
            warnings.push("stripInternal has no effect without dts: true".to_string());
        }

        if self.global_name.is_some() && !self.format.contains(&Format::Iife) {
            warnings.push("globalName is only used by the iife format".to_string());
        }

        if self.dts && !self.entry.iter().any(|e| is_typescript_entry(e)) {
            warnings.push(
                "dts is enabled but no entry is a TypeScript file; no declarations will be emitted"
                    .to_string(),
            );
        }

        if !self.clean {
            warnings.push(
                "clean is disabled; files from earlier builds stay in the output directory"
                    .to_string(),
            );
        }

        warnings
    }
}

fn is_typescript_entry(entry: &str) -> bool {
    brisk_bundler::entry::is_typescript_source(Path::new(entry))
}
