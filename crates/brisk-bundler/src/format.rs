//! Output formats, platforms and source map modes understood by the orchestrator.
//!
//! These are brisk's own types. Each one knows how to translate itself into the
//! corresponding rolldown option, and [`OutputFormat`] additionally owns the file
//! naming scheme that lets several formats share one output directory.

use std::fmt;

/// Output module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    /// ECMAScript modules (`import`/`export`).
    Esm,
    /// CommonJS (`require`/`module.exports`).
    Cjs,
    /// Immediately invoked function expression for `<script>` tags.
    Iife,
}

impl OutputFormat {
    /// Extension used for entry files and shared chunks of this format.
    ///
    /// ```
    /// use brisk_bundler::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Esm.extension(), "js");
    /// assert_eq!(OutputFormat::Cjs.extension(), "cjs");
    /// assert_eq!(OutputFormat::Iife.extension(), "iife.js");
    /// ```
    pub fn extension(self) -> &'static str {
        match self {
            Self::Esm => "js",
            Self::Cjs => "cjs",
            Self::Iife => "iife.js",
        }
    }

    /// Filename template for entry chunks.
    pub fn entry_filename_template(self) -> String {
        format!("[name].{}", self.extension())
    }

    /// Filename template for shared (non-entry) chunks.
    pub fn chunk_filename_template(self) -> String {
        format!("[name]-[hash].{}", self.extension())
    }

    /// Whether entries of this format may share chunks within a single build.
    ///
    /// IIFE output is one self-contained script per entry, so it cannot.
    pub fn supports_shared_chunks(self) -> bool {
        !matches!(self, Self::Iife)
    }

    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            Self::Esm => rolldown::OutputFormat::Esm,
            Self::Cjs => rolldown::OutputFormat::Cjs,
            Self::Iife => rolldown::OutputFormat::Iife,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Esm => write!(f, "esm"),
            Self::Cjs => write!(f, "cjs"),
            Self::Iife => write!(f, "iife"),
        }
    }
}

/// Target runtime platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Node.js: built-in modules are available.
    #[default]
    Node,
    /// Browsers: no Node.js built-ins.
    Browser,
    /// No platform assumptions.
    Neutral,
}

impl Platform {
    pub(crate) fn to_rolldown(self) -> rolldown::Platform {
        match self {
            Self::Node => rolldown::Platform::Node,
            Self::Browser => rolldown::Platform::Browser,
            Self::Neutral => rolldown::Platform::Neutral,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Browser => write!(f, "browser"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Source map emission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapMode {
    /// Base64 data URL appended to each chunk.
    Inline,
    /// Separate `.map` files referenced by a comment.
    External,
    /// Separate `.map` files without a reference comment.
    Hidden,
}

impl SourceMapMode {
    pub(crate) fn to_rolldown(self) -> rolldown::SourceMapType {
        match self {
            Self::Inline => rolldown::SourceMapType::Inline,
            Self::External => rolldown::SourceMapType::File,
            Self::Hidden => rolldown::SourceMapType::Hidden,
        }
    }
}

/// Remove repeated formats while keeping the first occurrence order.
pub fn dedupe_formats(formats: &[OutputFormat]) -> Vec<OutputFormat> {
    let mut seen = Vec::with_capacity(formats.len());
    for format in formats {
        if !seen.contains(format) {
            seen.push(*format);
        }
    }
    seen
}
