//! Check command implementation.
//!
//! Validates configuration without building, or prints the config schema.

use crate::cli::CheckArgs;
use crate::commands::utils::{self, LoadedConfig};
use crate::config::{BriskConfig, CliOverrides, ConfigSource};
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the configuration from every source
/// 2. Validate field values and combinations
/// 3. Check the output directory and the entry points
/// 4. Print the build plan
/// 5. Report warnings (if --warnings flag)
///
/// With `--schema` only the JSON Schema is printed, to stdout.
///
/// # Errors
///
/// Returns errors for invalid configuration or missing files.
pub async fn execute(args: CheckArgs) -> Result<()> {
    if args.schema {
        let schema = BriskConfig::json_schema()?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    ui::info("Checking configuration...");

    let LoadedConfig {
        config,
        root,
        source,
    } = utils::load_project(
        args.cwd.as_deref(),
        args.config.as_deref(),
        &CliOverrides::default(),
    )?;

    match &source {
        ConfigSource::Defaults => ui::warning("No config file found, using defaults"),
        source => ui::info(&format!("Loaded {}", source)),
    }

    config.validate()?;
    utils::validate_output_dir(&config.out_dir, &root)?;
    ui::success("Configuration is valid");

    ui::info("Checking entry points...");
    let options = config.to_build_options(&root);
    let entries = options.resolve_entries()?;
    let plan = brisk_bundler::plan_jobs(&entries.entries, &options.formats);

    for entry in &entries.entries {
        ui::success(&format!("  {} -> {}", entry.path.display(), entry.name));
    }

    ui::info(&format!(
        "Build plan: {} {} into {}",
        plan.len(),
        if plan.len() == 1 { "job" } else { "jobs" },
        options.resolved_out_dir()?.display()
    ));
    for job in &plan {
        ui::info(&format!("  {}", job.label()));
    }

    if args.warnings {
        let warnings = config.warnings();
        if warnings.is_empty() {
            ui::success("No warnings");
        }
        for warning in warnings {
            ui::warning(&warning);
        }
    }

    ui::success("All checks passed!");
    Ok(())
}
