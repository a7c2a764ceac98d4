//! In-memory build output.

pub mod writer;

use std::path::{Path, PathBuf};

use crate::format::OutputFormat;
use crate::Result;

/// What an output file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// JavaScript chunk produced for an entry point.
    Entry,
    /// Shared JavaScript chunk.
    Chunk,
    /// Non-code asset such as a source map.
    Asset,
    /// TypeScript declaration file.
    Declaration,
}

/// A single file produced by a build, relative to the output directory.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// `/`-separated path relative to the output directory.
    pub path: String,
    pub contents: Vec<u8>,
    pub kind: OutputKind,
    /// Format that produced the file; `None` for declarations.
    pub format: Option<OutputFormat>,
}

impl OutputFile {
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }
}

/// Result of an in-memory build.
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    pub files: Vec<OutputFile>,
    /// Engine and declaration warnings, already formatted.
    pub warnings: Vec<String>,
}

impl BuildResult {
    /// Files of the given kind, in output order.
    pub fn files_of(&self, kind: OutputKind) -> impl Iterator<Item = &OutputFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// Look up a file by its relative path.
    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Write every file below `dir`, atomically.
    ///
    /// Returns the absolute paths written, in output order.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        writer::write_files_to(&self.files, dir)
    }
}

/// A file that has been written to disk.
#[derive(Debug, Clone)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub size: u64,
    pub kind: OutputKind,
    pub format: Option<OutputFormat>,
}

/// Summary of a complete `run`: what was written and how long it took.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub files: Vec<WrittenFile>,
    pub warnings: Vec<String>,
    pub cleaned: bool,
    pub duration: std::time::Duration,
}

impl BuildReport {
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}
