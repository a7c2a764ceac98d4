use clap::ValueEnum;

/// Output format for bundled code
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// ECMAScript modules (import/export syntax)
    #[value(name = "esm")]
    Esm,

    /// CommonJS modules (require/module.exports)
    ///
    /// Written with a `.cjs` extension so it can sit next to ESM output.
    #[value(name = "cjs")]
    Cjs,

    /// Immediately Invoked Function Expression
    ///
    /// Self-contained script for `<script>` tags. One file per entry.
    #[value(name = "iife")]
    Iife,
}

/// Source map generation mode
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum SourceMapMode {
    /// Source map embedded in the bundle as a data URL
    #[value(name = "inline")]
    Inline,

    /// Separate .map files referenced from the bundle
    #[value(name = "external")]
    External,

    /// Separate .map files without a sourceMappingURL comment
    #[value(name = "hidden")]
    Hidden,
}

/// Target platform environment
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Platform {
    /// Node.js: built-in modules stay external, `node` export condition
    #[value(name = "node")]
    Node,

    /// Browser: `browser` field and export condition
    #[value(name = "browser")]
    Browser,

    /// No platform assumptions
    #[value(name = "neutral")]
    Neutral,
}
