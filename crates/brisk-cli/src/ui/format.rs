//! Formatting utilities for sizes, durations, and build summaries.

use brisk_bundler::{BuildReport, OutputKind, WrittenFile};
use console::Term;
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

use super::{colors_enabled, is_quiet};

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use brisk_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use brisk_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the files a build wrote, grouped by format, to stderr.
pub fn print_build_summary(report: &BuildReport) {
    if is_quiet() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);

    if colors_enabled() {
        eprintln!("\n{}", "Build Summary".bold().underline());
    } else {
        eprintln!("\nBuild Summary");
    }
    eprintln!("{}", rule);

    for file in &report.files {
        let name = display_path(&file.path, &report.out_dir);
        let size = format_size(file.size);
        let label = file_label(file);
        if colors_enabled() {
            eprintln!(
                "  {} {} {} {}",
                "▸".blue(),
                name.bright_white().bold(),
                size.dimmed(),
                format!("[{}]", label).dimmed()
            );
        } else {
            eprintln!("  ▸ {} {} [{}]", name, size, label);
        }
    }

    eprintln!("{}", rule);

    let total = format!(
        "{} files, {}",
        report.files.len(),
        format_size(report.total_size())
    );
    let elapsed = format_duration(report.duration);
    if colors_enabled() {
        eprintln!("  {} {} in {}", "Total:".bold(), total.green(), elapsed.green());
    } else {
        eprintln!("  Total: {} in {}", total, elapsed);
    }
}

fn file_label(file: &WrittenFile) -> String {
    match (file.kind, file.format) {
        (OutputKind::Declaration, _) => "dts".to_string(),
        (OutputKind::Asset, Some(format)) => format!("{} asset", format),
        (OutputKind::Chunk, Some(format)) => format!("{} chunk", format),
        (_, Some(format)) => format.to_string(),
        (_, None) => "asset".to_string(),
    }
}

fn display_path(path: &Path, out_dir: &Path) -> String {
    let relative = path.strip_prefix(out_dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
