//! TypeScript declaration emission.
//!
//! Declarations are produced per source module with OXC's isolated declarations,
//! which needs no type checker: every exported signature must carry explicit
//! types. Which modules get a declaration is decided by the engine: every
//! TypeScript module that ended up in a chunk, plus the TypeScript entries
//! themselves, limited to files under the entry base and outside `node_modules`.
//!
//! ```text
//! src/index.ts      ->  dist/index.d.ts
//! src/cli/zip.ts    ->  dist/cli/zip.d.ts
//! src/util/fs.mts   ->  dist/util/fs.d.mts
//! ```

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_isolated_declarations::{IsolatedDeclarations, IsolatedDeclarationsOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::entry::{is_typescript_source, ResolvedEntries};
use crate::output::{OutputFile, OutputKind};
use crate::Error;

/// Declaration emission settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtsOptions {
    /// Remove declarations annotated with `@internal`.
    pub strip_internal: bool,
}

/// Emit declarations for the TypeScript modules of a build.
///
/// `module_ids` are the module identifiers reported by the engine; anything that
/// is not a TypeScript file under the entry base is ignored.
pub fn emit_declarations(
    entries: &ResolvedEntries,
    module_ids: &[String],
    options: DtsOptions,
) -> crate::Result<Vec<OutputFile>> {
    let mut modules: BTreeSet<PathBuf> = entries
        .typescript_entries()
        .map(|entry| entry.path.clone())
        .collect();

    modules.extend(
        module_ids
            .iter()
            .map(PathBuf::from)
            .filter(|path| is_declarable(&entries.base, path)),
    );

    let mut files = Vec::with_capacity(modules.len());
    for module in modules {
        let source = std::fs::read_to_string(&module).map_err(|e| Error::Declaration {
            file: module.clone(),
            message: format!("failed to read source: {}", e),
        })?;

        let code = generate_dts(&source, &module, options.strip_internal).map_err(|e| {
            Error::Declaration {
                file: module.clone(),
                message: format!("{:#}", e),
            }
        })?;

        let path = declaration_path(&entries.base, &module);
        tracing::debug!(module = %module.display(), output = %path, "emitted declaration");

        files.push(OutputFile {
            path,
            contents: code.into_bytes(),
            kind: OutputKind::Declaration,
            format: None,
        });
    }

    Ok(files)
}

fn is_declarable(base: &Path, path: &Path) -> bool {
    path.is_absolute()
        && path.starts_with(base)
        && is_typescript_source(path)
        && !path
            .components()
            .any(|c| c == Component::Normal("node_modules".as_ref()))
        && path.is_file()
}

/// Output path of the declaration for `module`, relative to the output directory.
pub(crate) fn declaration_path(base: &Path, module: &Path) -> String {
    let relative = module.strip_prefix(base).unwrap_or(module);
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        let stem = Path::new(last.as_str())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index")
            .to_string();
        let extension = match Path::new(last.as_str())
            .extension()
            .and_then(|e| e.to_str())
        {
            Some("mts") => "d.mts",
            Some("cts") => "d.cts",
            _ => "d.ts",
        };
        *last = format!("{}.{}", stem, extension);
    }

    parts.join("/")
}

/// Generate `.d.ts` content from TypeScript source.
fn generate_dts(source: &str, file_path: &Path, strip_internal: bool) -> Result<String> {
    let allocator = Allocator::default();

    let source_type = SourceType::from_path(file_path)
        .with_context(|| format!("Invalid TypeScript file: {}", file_path.display()))?;

    let parse_result = Parser::new(&allocator, source, source_type).parse();

    if !parse_result.errors.is_empty() {
        let messages: Vec<String> = parse_result
            .errors
            .iter()
            .map(|e| format!("{:?}", e))
            .collect();
        anyhow::bail!("parse failed: {}", messages.join(", "));
    }

    let options = IsolatedDeclarationsOptions { strip_internal };
    let dts_result = IsolatedDeclarations::new(&allocator, options).build(&parse_result.program);

    if !dts_result.errors.is_empty() {
        let messages: Vec<String> = dts_result
            .errors
            .iter()
            .map(|e| format!("{:?}", e))
            .collect();
        anyhow::bail!("isolated declarations failed: {}", messages.join(", "));
    }

    Ok(Codegen::new().build(&dts_result.program).code)
}
