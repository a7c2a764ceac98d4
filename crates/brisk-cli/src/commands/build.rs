//! Build command implementation.
//!
//! Implements `brisk build`: loads the layered configuration and hands it to
//! [`brisk_bundler::BuildOptions::run`].

use crate::cli::BuildArgs;
use crate::commands::utils::{self, LoadedConfig};
use crate::config::CliOverrides;
use crate::error::Result;
use crate::ui;
use crate::watch::{self, FileChange, FileWatcher};
use brisk_bundler::{BuildOptions, BuildReport};

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Check the output directory is safe to write to
/// 3. Build every format, emit declarations, clean and write
/// 4. Display build summary
/// 5. With `--watch`, rebuild on every change until Ctrl-C
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration
/// - Missing entry points
/// - Build failures
/// - File system errors
pub async fn execute(args: BuildArgs) -> Result<()> {
    let overrides = CliOverrides::from(&args);
    let LoadedConfig {
        config,
        root,
        source,
    } = utils::load_project(args.cwd.as_deref(), args.config.as_deref(), &overrides)?;

    ui::debug(&format!("Configuration from {}", source));
    config.validate()?;
    utils::validate_output_dir(&config.out_dir, &root)?;

    let options = config.to_build_options(&root);
    build(&options).await?;

    if args.watch {
        watch_and_rebuild(options).await?;
    }

    Ok(())
}

/// Run one build with a spinner, then print warnings and the summary.
pub(crate) async fn build(options: &BuildOptions) -> Result<BuildReport> {
    let formats = options
        .formats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let spinner = ui::Spinner::new(&format!(
        "Building {} {} ({})...",
        options.entries.len(),
        if options.entries.len() == 1 { "entry" } else { "entries" },
        formats
    ));

    let report = match options.run().await {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Build failed");
            return Err(e.into());
        }
    };

    spinner.finish(&format!(
        "Built to {} in {}",
        report.out_dir.display(),
        ui::format_duration(report.duration)
    ));
    for warning in &report.warnings {
        ui::warning(warning);
    }
    ui::print_build_summary(&report);

    Ok(report)
}

/// Rebuild on source changes until Ctrl-C.
async fn watch_and_rebuild(options: BuildOptions) -> Result<()> {
    let entries = options.resolve_entries()?;
    let out_dir = options.resolved_out_dir()?;
    let rebuilder = Rebuilder::new(options);

    let (watcher, mut changes) = FileWatcher::new(entries.base, vec![out_dir])?;
    ui::info(&format!(
        "Watching {} for changes (press Ctrl-C to stop)",
        watcher.root().display()
    ));

    // One listener for the whole session so a Ctrl-C during a rebuild is not lost
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let batch = tokio::select! {
            _ = &mut ctrl_c => break,
            batch = watch::next_batch(&mut changes, watch::DEFAULT_DEBOUNCE) => batch,
        };
        let Some(batch) = batch else { break };

        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = rebuilder.rebuild(&batch) => {}
        }
    }

    ui::info("Stopping watch mode");
    Ok(())
}

/// Watch-mode rebuild step.
///
/// Rebuilds never clean the output directory, and a failing rebuild only
/// reports its error so watching continues.
pub(crate) struct Rebuilder {
    options: BuildOptions,
}

impl Rebuilder {
    pub(crate) fn new(options: BuildOptions) -> Self {
        Self {
            options: options.clean(false),
        }
    }

    /// Rebuild after `changes`. Returns `None` when the build failed.
    pub(crate) async fn rebuild(&self, changes: &[FileChange]) -> Option<BuildReport> {
        match changes {
            [] => {}
            [single] => ui::info(&format!("Changed: {}", single.path().display())),
            many => ui::info(&format!("{} files changed", many.len())),
        }

        match build(&self.options).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::debug!("rebuild failed: {:?}", e);
                ui::error(&e.to_string());
                None
            }
        }
    }
}
