use crate::cli::BuildArgs;
use crate::config::types::*;
use crate::config::BriskConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

// CLI enums -> config enums

impl From<crate::cli::Format> for Format {
    fn from(f: crate::cli::Format) -> Self {
        match f {
            crate::cli::Format::Esm => Format::Esm,
            crate::cli::Format::Cjs => Format::Cjs,
            crate::cli::Format::Iife => Format::Iife,
        }
    }
}

impl From<crate::cli::Platform> for Platform {
    fn from(p: crate::cli::Platform) -> Self {
        match p {
            crate::cli::Platform::Node => Platform::Node,
            crate::cli::Platform::Browser => Platform::Browser,
            crate::cli::Platform::Neutral => Platform::Neutral,
        }
    }
}

impl From<crate::cli::SourceMapMode> for SourceMapMode {
    fn from(s: crate::cli::SourceMapMode) -> Self {
        match s {
            crate::cli::SourceMapMode::Inline => SourceMapMode::Inline,
            crate::cli::SourceMapMode::External => SourceMapMode::External,
            crate::cli::SourceMapMode::Hidden => SourceMapMode::Hidden,
        }
    }
}

// Config enums -> bundler enums

impl From<Format> for brisk_bundler::OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Esm => brisk_bundler::OutputFormat::Esm,
            Format::Cjs => brisk_bundler::OutputFormat::Cjs,
            Format::Iife => brisk_bundler::OutputFormat::Iife,
        }
    }
}

impl From<Platform> for brisk_bundler::Platform {
    fn from(p: Platform) -> Self {
        match p {
            Platform::Node => brisk_bundler::Platform::Node,
            Platform::Browser => brisk_bundler::Platform::Browser,
            Platform::Neutral => brisk_bundler::Platform::Neutral,
        }
    }
}

impl From<SourceMapMode> for brisk_bundler::SourceMapMode {
    fn from(s: SourceMapMode) -> Self {
        match s {
            SourceMapMode::Inline => brisk_bundler::SourceMapMode::Inline,
            SourceMapMode::External => brisk_bundler::SourceMapMode::External,
            SourceMapMode::Hidden => brisk_bundler::SourceMapMode::Hidden,
        }
    }
}

/// Values given on the command line. Unset fields are not serialized, so they
/// never shadow the environment or the config file.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Vec<Format>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_internal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<SourceMapMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

impl From<&BuildArgs> for CliOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            entry: (!args.entry.is_empty()).then(|| args.entry.clone()),
            format: (!args.format.is_empty())
                .then(|| args.format.iter().copied().map(Into::into).collect()),
            dts: args.dts_flag(),
            strip_internal: args.strip_internal.then_some(true),
            clean: args.clean_flag(),
            out_dir: args.out_dir.clone(),
            platform: args.platform.map(Into::into),
            sourcemap: args.sourcemap.map(Into::into),
            minify: args.minify.then_some(true),
            external: (!args.external.is_empty()).then(|| args.external.clone()),
            global_name: args.global_name.clone(),
        }
    }
}

impl BriskConfig {
    /// Library build options for a project rooted at `project_root`.
    pub fn to_build_options(&self, project_root: &Path) -> brisk_bundler::BuildOptions {
        let mut options = brisk_bundler::BuildOptions::new(project_root)
            .entries(self.entry.iter().map(PathBuf::from))
            .formats(self.format.iter().copied().map(Into::into))
            .out_dir(&self.out_dir)
            .dts(self.dts)
            .strip_internal(self.strip_internal)
            .clean(self.clean)
            .platform(self.platform.into())
            .sourcemap(self.sourcemap.map(Into::into))
            .minify(self.minify)
            .external(self.external.iter().cloned());

        if let Some(name) = &self.global_name {
            options = options.global_name(name.clone());
        }

        options
    }
}
