//! Build planning: turn entries x formats into independent engine jobs.

use crate::entry::EntrySpec;
use crate::format::{dedupe_formats, OutputFormat};

/// One invocation of the bundling engine.
#[derive(Debug, Clone)]
pub struct BuildJob {
    pub format: OutputFormat,
    pub entries: Vec<EntrySpec>,
}

impl BuildJob {
    /// Short label for logs and error messages.
    pub fn label(&self) -> String {
        match self.entries.as_slice() {
            [single] => format!("{} ({})", self.format, single.name),
            entries => format!("{} ({} entries)", self.format, entries.len()),
        }
    }
}

/// Plan the jobs for a build.
///
/// Formats that can share chunks get one job containing every entry. IIFE gets one
/// job per entry. Job order follows format order, then entry order.
pub fn plan_jobs(entries: &[EntrySpec], formats: &[OutputFormat]) -> Vec<BuildJob> {
    let mut jobs = Vec::new();

    for format in dedupe_formats(formats) {
        if format.supports_shared_chunks() {
            jobs.push(BuildJob {
                format,
                entries: entries.to_vec(),
            });
        } else {
            jobs.extend(entries.iter().map(|entry| BuildJob {
                format,
                entries: vec![entry.clone()],
            }));
        }
    }

    jobs
}
