//! Build job execution.
//!
//! Every [`BuildJob`] becomes one rolldown `Bundler::generate` call. Jobs run as
//! tokio tasks bounded by a semaphore and their results are merged back in plan
//! order, so the produced file list does not depend on scheduling.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rolldown::{BundlerBuilder, BundlerOptions, InputItem, IsExternal, ResolveOptions};
use rolldown_common::Output;
use rustc_hash::FxHashMap;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};

use crate::format::{OutputFormat, Platform, SourceMapMode};
use crate::output::{OutputFile, OutputKind};
use crate::plan::BuildJob;
use crate::{Error, Result};

/// Settings shared by every job of a build.
#[derive(Debug, Clone)]
pub(crate) struct JobSettings {
    pub cwd: PathBuf,
    pub platform: Platform,
    pub sourcemap: Option<SourceMapMode>,
    pub minify: bool,
    pub external: Vec<String>,
    pub global_name: Option<String>,
}

/// What one job produced.
#[derive(Debug, Default)]
pub(crate) struct JobOutput {
    pub files: Vec<OutputFile>,
    /// Ids of every module rendered into a chunk.
    pub module_ids: Vec<String>,
    pub warnings: Vec<String>,
}

/// Default job parallelism.
pub fn default_parallelism() -> usize {
    num_cpus::get().clamp(1, 8)
}

/// Run `jobs` concurrently and return their outputs in job order.
///
/// All jobs run to completion; if any failed, the build fails. A single failure
/// is returned as is, several are folded into [`Error::JobsFailed`].
pub(crate) async fn execute_jobs(
    jobs: Vec<BuildJob>,
    settings: JobSettings,
    max_parallel: usize,
) -> Result<Vec<JobOutput>> {
    let settings = Arc::new(settings);
    let permits = max_parallel.clamp(1, Semaphore::MAX_PERMITS);
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut join_set = JoinSet::new();
    let mut job_index: FxHashMap<Id, usize> = FxHashMap::default();

    let labels: Vec<String> = jobs.iter().map(BuildJob::label).collect();
    tracing::debug!(jobs = jobs.len(), max_parallel = permits, "executing build jobs");

    for (index, job) in jobs.into_iter().enumerate() {
        let settings = Arc::clone(&settings);
        let semaphore = Arc::clone(&semaphore);

        let handle = join_set.spawn(async move {
            match semaphore.acquire_owned().await {
                Ok(_permit) => run_job(&job, &settings).await,
                Err(e) => Err(Error::Bundler(format!("job scheduler closed: {}", e))),
            }
        });
        job_index.insert(handle.id(), index);
    }

    let mut slots: Vec<Option<Result<JobOutput>>> = labels.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(join_err) => (
                join_err.id(),
                Err(Error::Bundler(format!("build task panicked: {}", join_err))),
            ),
        };
        if let Some(&index) = job_index.get(&id) {
            slots[index] = Some(result);
        }
    }

    let mut outputs = Vec::with_capacity(slots.len());
    let mut failures: Vec<(String, Error)> = Vec::new();
    for (label, slot) in labels.into_iter().zip(slots) {
        match slot {
            Some(Ok(output)) => outputs.push(output),
            Some(Err(e)) => failures.push((label, e)),
            None => failures.push((label, Error::Bundler("missing result".to_string()))),
        }
    }

    match failures.len() {
        0 => Ok(outputs),
        1 => {
            let (label, error) = failures.remove(0);
            tracing::debug!(job = %label, "build job failed");
            Err(error)
        }
        count => Err(Error::JobsFailed {
            count,
            details: failures
                .iter()
                .map(|(label, e)| format!("{}: {}", label, e))
                .collect::<Vec<_>>()
                .join("\n"),
        }),
    }
}

/// Run one job through rolldown and collect its output in memory.
pub(crate) async fn run_job(job: &BuildJob, settings: &JobSettings) -> Result<JobOutput> {
    let options = configure_rolldown_options(job, settings);
    tracing::debug!(job = %job.label(), "starting engine");

    let mut bundler = BundlerBuilder::default()
        .with_options(options)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let mut output = JobOutput::default();
    for asset in &bundle.assets {
        match asset {
            Output::Chunk(chunk) => {
                output
                    .module_ids
                    .extend(chunk.module_ids.iter().map(|id| id.to_string()));
                output.files.push(OutputFile {
                    path: chunk.filename.to_string(),
                    contents: chunk.code.clone().into_bytes(),
                    kind: if chunk.is_entry {
                        OutputKind::Entry
                    } else {
                        OutputKind::Chunk
                    },
                    format: Some(job.format),
                });
            }
            Output::Asset(asset) => {
                output.files.push(OutputFile {
                    path: asset.filename.to_string(),
                    contents: asset.source.as_bytes().to_vec(),
                    kind: OutputKind::Asset,
                    format: Some(job.format),
                });
            }
        }
    }

    for warning in &bundle.warnings {
        let message = format!("[{}] {:?}", job.format, warning);
        tracing::warn!(job = %job.label(), "{}", message);
        output.warnings.push(message);
    }

    tracing::debug!(
        job = %job.label(),
        files = output.files.len(),
        modules = output.module_ids.len(),
        "engine finished"
    );
    Ok(output)
}

fn configure_rolldown_options(job: &BuildJob, settings: &JobSettings) -> BundlerOptions {
    let mut options = BundlerOptions {
        input: Some(
            job.entries
                .iter()
                .map(|entry| InputItem {
                    name: Some(entry.name.clone()),
                    import: entry.path.to_string_lossy().into_owned(),
                })
                .collect(),
        ),
        cwd: Some(settings.cwd.clone()),
        format: Some(job.format.to_rolldown()),
        platform: Some(settings.platform.to_rolldown()),
        sourcemap: settings.sourcemap.map(SourceMapMode::to_rolldown),
        entry_filenames: Some(job.format.entry_filename_template().into()),
        chunk_filenames: Some(job.format.chunk_filename_template().into()),
        external: Some(IsExternal::from(settings.external.clone())),
        resolve: Some(configure_resolution(&settings.cwd, settings.platform)),
        ..Default::default()
    };

    if settings.minify {
        options.minify = Some(rolldown::RawMinifyOptions::from(true));
    }

    if job.format == OutputFormat::Iife {
        options.name = settings.global_name.clone();
    }

    options
}

/// Resolution settings: `node_modules` lookup from the project root upwards and
/// export conditions matching the platform.
fn configure_resolution(cwd: &Path, platform: Platform) -> ResolveOptions {
    let modules: Vec<String> = cwd
        .ancestors()
        .map(|dir| dir.join("node_modules").to_string_lossy().into_owned())
        .chain(std::iter::once("node_modules".to_string()))
        .collect();

    let (conditions, main_fields): (&[&str], &[&str]) = match platform {
        Platform::Node => (&["node", "import", "require", "default"], &["module", "main"]),
        Platform::Browser => (
            &["browser", "import", "require", "default"],
            &["browser", "module", "main"],
        ),
        Platform::Neutral => (&["import", "require", "default"], &["module", "main"]),
    };

    ResolveOptions {
        main_fields: Some(main_fields.iter().map(|s| s.to_string()).collect()),
        condition_names: Some(conditions.iter().map(|s| s.to_string()).collect()),
        extensions: Some(
            [".ts", ".tsx", ".mts", ".cts", ".js", ".mjs", ".cjs", ".json"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        modules: Some(modules),
        symlinks: Some(true),
        ..Default::default()
    }
}
