use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::clean::clean_output_dir;
use crate::dts::{emit_declarations, DtsOptions};
use crate::entry::{absolutize, ResolvedEntries};
use crate::executor::{default_parallelism, execute_jobs, JobSettings};
use crate::format::{dedupe_formats, OutputFormat, Platform, SourceMapMode};
use crate::output::{BuildReport, BuildResult, WrittenFile};
use crate::plan::plan_jobs;
use crate::{Error, Result};

/// Configuration of a build.
///
/// Fields are public for direct construction; the builder methods cover the
/// common cases.
///
/// ```no_run
/// use brisk_bundler::{BuildOptions, OutputFormat};
///
/// # async fn run() -> brisk_bundler::Result<()> {
/// let report = BuildOptions::new(".")
///     .entries(["src/index.ts", "src/cli/zip.ts", "src/cli/clone.ts"])
///     .format(OutputFormat::Esm)
///     .dts(true)
///     .clean(true)
///     .run()
///     .await?;
/// println!("wrote {} files", report.files.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root. Relative entries and `out_dir` are resolved against it.
    pub cwd: PathBuf,

    /// Entry-point source files.
    pub entries: Vec<PathBuf>,

    /// Output formats (default: ESM). Repeats are ignored.
    pub formats: Vec<OutputFormat>,

    /// Output directory (default: `dist`).
    pub out_dir: PathBuf,

    /// Emit `.d.ts` declarations for TypeScript sources (default: false).
    pub dts: bool,

    /// Drop `@internal` declarations.
    pub strip_internal: bool,

    /// Empty `out_dir` before writing (default: true).
    pub clean: bool,

    /// Target platform (default: Node).
    pub platform: Platform,

    /// Source map mode; `None` disables source maps.
    pub sourcemap: Option<SourceMapMode>,

    pub minify: bool,

    /// Packages that are never bundled.
    pub external: Vec<String>,

    /// Global variable name for IIFE output.
    pub global_name: Option<String>,

    /// Upper bound for concurrently running jobs (default: `min(cpus, 8)`).
    pub max_parallel_builds: Option<usize>,
}

impl BuildOptions {
    /// Options for a project rooted at `cwd`, with no entries yet.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            entries: Vec::new(),
            formats: vec![OutputFormat::Esm],
            out_dir: PathBuf::from("dist"),
            dts: false,
            strip_internal: false,
            clean: true,
            platform: Platform::default(),
            sourcemap: None,
            minify: false,
            external: Vec::new(),
            global_name: None,
            max_parallel_builds: None,
        }
    }

    /// Add one entry point.
    pub fn entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entries.push(entry.into());
        self
    }

    /// Replace the entry points.
    pub fn entries<P, I>(mut self, entries: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = P>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Build a single format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.formats = vec![format];
        self
    }

    /// Build several formats.
    pub fn formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = OutputFormat>,
    {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn dts(mut self, enabled: bool) -> Self {
        self.dts = enabled;
        self
    }

    pub fn strip_internal(mut self, enabled: bool) -> Self {
        self.strip_internal = enabled;
        self
    }

    pub fn clean(mut self, enabled: bool) -> Self {
        self.clean = enabled;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn sourcemap(mut self, mode: Option<SourceMapMode>) -> Self {
        self.sourcemap = mode;
        self
    }

    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn external<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn global_name(mut self, name: impl Into<String>) -> Self {
        self.global_name = Some(name.into());
        self
    }

    pub fn max_parallel_builds(mut self, n: usize) -> Self {
        self.max_parallel_builds = Some(n);
        self
    }

    /// Check the options without touching the file system.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for an empty entry or format list, an empty
    /// output directory, IIFE output without a global name, or a global name that
    /// is not a JavaScript identifier.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one entry point is required".to_string(),
            ));
        }

        if self.formats.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one output format is required".to_string(),
            ));
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "output directory must not be empty".to_string(),
            ));
        }

        match &self.global_name {
            Some(name) if !is_valid_identifier(name) => {
                return Err(Error::InvalidConfig(format!(
                    "global name '{}' is not a valid JavaScript identifier",
                    name
                )));
            }
            None if self.formats.contains(&OutputFormat::Iife) => {
                return Err(Error::InvalidConfig(
                    "iife output requires a global name".to_string(),
                ));
            }
            _ => {}
        }

        Ok(())
    }

    /// Absolute project root.
    pub fn project_root(&self) -> Result<PathBuf> {
        if self.cwd.is_absolute() {
            return Ok(absolutize(&self.cwd, Path::new("")));
        }
        let current = std::env::current_dir()?;
        Ok(absolutize(&current, &self.cwd))
    }

    /// Absolute output directory.
    pub fn resolved_out_dir(&self) -> Result<PathBuf> {
        Ok(absolutize(&self.project_root()?, &self.out_dir))
    }

    /// Resolve entries against the project root.
    pub fn resolve_entries(&self) -> Result<ResolvedEntries> {
        ResolvedEntries::resolve(&self.project_root()?, &self.entries)
    }

    /// Build every format in memory. Nothing is written.
    pub async fn build(&self) -> Result<BuildResult> {
        self.validate()?;
        let entries = self.resolve_entries()?;
        self.build_entries(&entries).await
    }

    /// Build, clean the output directory if enabled, and write the output.
    ///
    /// Cleaning happens only once the build succeeded, so a failing build leaves
    /// the previous output in place.
    pub async fn run(&self) -> Result<BuildReport> {
        let started = Instant::now();
        self.validate()?;

        let root = self.project_root()?;
        let entries = ResolvedEntries::resolve(&root, &self.entries)?;
        let out_dir = absolutize(&root, &self.out_dir);

        let result = self.build_entries(&entries).await?;

        let cleaned = if self.clean {
            clean_output_dir(&out_dir, &root, &entries.entries)?;
            true
        } else {
            false
        };

        let written = result.write_to(&out_dir)?;
        let files = written
            .into_iter()
            .zip(&result.files)
            .map(|(path, file)| WrittenFile {
                path,
                size: file.size(),
                kind: file.kind,
                format: file.format,
            })
            .collect();

        let report = BuildReport {
            out_dir,
            files,
            warnings: result.warnings,
            cleaned,
            duration: started.elapsed(),
        };

        tracing::info!(
            files = report.files.len(),
            bytes = report.total_size(),
            elapsed_ms = report.duration.as_millis() as u64,
            "build complete"
        );
        Ok(report)
    }

    async fn build_entries(&self, entries: &ResolvedEntries) -> Result<BuildResult> {
        let formats = dedupe_formats(&self.formats);
        let jobs = plan_jobs(&entries.entries, &formats);
        tracing::info!(
            entries = entries.entries.len(),
            formats = ?formats,
            jobs = jobs.len(),
            "building"
        );

        let settings = JobSettings {
            cwd: self.project_root()?,
            platform: self.platform,
            sourcemap: self.sourcemap,
            minify: self.minify,
            external: self.external.clone(),
            global_name: self.global_name.clone(),
        };
        let parallel = self
            .max_parallel_builds
            .unwrap_or_else(default_parallelism);

        let outputs = execute_jobs(jobs, settings, parallel).await?;

        let mut result = BuildResult::default();
        let mut module_ids = Vec::new();
        for output in outputs {
            result.files.extend(output.files);
            result.warnings.extend(output.warnings);
            module_ids.extend(output.module_ids);
        }

        if self.dts {
            if entries.typescript_entries().next().is_none() {
                let message =
                    "dts is enabled but no entry is a TypeScript file; no declarations emitted"
                        .to_string();
                tracing::warn!("{}", message);
                result.warnings.push(message);
            } else {
                let declarations = emit_declarations(
                    entries,
                    &module_ids,
                    DtsOptions {
                        strip_internal: self.strip_internal,
                    },
                )?;
                result.files.extend(declarations);
            }
        }

        Ok(result)
    }
}

/// Whether `name` can be used as a JavaScript global variable name.
///
/// Accepts ASCII identifiers and dotted paths such as `MyLib.tools`.
pub fn is_valid_identifier(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "export", "extends", "false", "finally", "for", "function", "if", "import",
        "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true",
        "try", "typeof", "var", "void", "while", "with", "yield", "let", "static", "enum",
        "await",
    ];

    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                && !RESERVED.contains(&part)
        })
}
