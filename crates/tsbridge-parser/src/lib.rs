//! TypeScript source units from SWC
//!
//! This crate parses TypeScript source code with the SWC parser and turns it
//! into the [`SourceUnit`]s the adaptation layer works on: module specifiers
//! and `/// <reference path>` directives are collected, syntax errors become
//! diagnostics, and [`ModuleResolver`] fills in the module resolution map.

pub mod directives;
pub mod resolver;

use anyhow::{Context, Result};
use std::path::Path;
use swc_common::{input::StringInput, sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::{Module, ModuleDecl, ModuleItem, Str, TsModuleRef};
use swc_ecma_parser::{lexer::Lexer, Parser, Syntax, TsSyntax};
use tsbridge_host::file_extension_is;
use tsbridge_types::SourceUnit;

pub use resolver::{CheckedSource, ModuleResolver, DEFAULT_EXTENSIONS};

// Re-export AST types for consumers that need to inspect the AST
pub use swc_ecma_ast;

// Re-export Spanned trait for getting spans from AST nodes and errors
pub use swc_common::Spanned;

/// A module specifier as written in an import or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    pub text: String,
    /// Byte offset of the string literal, including its quote
    pub start: u32,
    /// Byte offset just past the string literal
    pub end: u32,
}

/// A syntax error reported by SWC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub start: u32,
    pub end: u32,
}

/// Result of parsing one file, before module resolution.
#[derive(Debug)]
pub struct ParsedSource {
    /// The unit, with referenced files but no resolved modules yet
    pub unit: SourceUnit,
    /// Module specifiers in source order
    pub imports: Vec<ModuleSpecifier>,
    /// Recoverable and fatal syntax errors
    pub syntax_errors: Vec<SyntaxError>,
}

/// Parse TypeScript source code into a source unit.
///
/// Syntax errors do not fail the parse: they are collected in
/// [`ParsedSource::syntax_errors`]. A fatal error leaves the import list
/// empty.
pub fn parse_source_unit(source: &str, filename: &str) -> ParsedSource {
    // SWC source map, used internally by SWC for span offsets
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );
    let base = source_file.start_pos.0;

    let lexer = Lexer::new(
        Syntax::Typescript(TsSyntax {
            tsx: filename.ends_with(".tsx"),
            decorators: true,
            dts: file_extension_is(filename, ".d.ts"),
            no_early_errors: false,
            disallow_ambiguous_jsx_like: false,
        }),
        swc_ecma_ast::EsVersion::Es2022,
        StringInput::from(&*source_file),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let mut syntax_errors = Vec::new();

    let module = match parser.parse_module() {
        Ok(module) => Some(module),
        Err(e) => {
            syntax_errors.push(SyntaxError {
                message: e.kind().msg().to_string(),
                start: e.span().lo.0.saturating_sub(base),
                end: e.span().hi.0.saturating_sub(base),
            });
            None
        }
    };

    // Fatal and recoverable errors arrive separately; report them in source order.
    for error in parser.take_errors() {
        syntax_errors.push(SyntaxError {
            message: error.kind().msg().to_string(),
            start: error.span().lo.0.saturating_sub(base),
            end: error.span().hi.0.saturating_sub(base),
        });
    }
    syntax_errors.sort_by_key(|e| e.start);

    let imports = module
        .as_ref()
        .map(|module| collect_imports(module, base))
        .unwrap_or_default();

    let references = directives::referenced_files(source);
    log::debug!(
        "parsed {}: {} import(s), {} reference(s), {} syntax error(s)",
        filename,
        imports.len(),
        references.len(),
        syntax_errors.len()
    );

    ParsedSource {
        unit: SourceUnit::new(filename, source).with_referenced_files(references),
        imports,
        syntax_errors,
    }
}

/// Read and parse a file from disk.
pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let filename = tsbridge_host::normalize_slashes(&path.to_string_lossy());
    Ok(parse_source_unit(&source, &filename))
}

/// Collect module specifiers from imports and re-exports.
fn collect_imports(module: &Module, base: u32) -> Vec<ModuleSpecifier> {
    let mut imports = Vec::new();
    let mut push = |src: &Str| {
        // Use as_str() to get &str from the Wtf8Atom
        if let Some(text) = src.value.as_str() {
            imports.push(ModuleSpecifier {
                text: text.to_string(),
                start: src.span.lo.0.saturating_sub(base),
                end: src.span.hi.0.saturating_sub(base),
            });
        }
    };

    for item in &module.body {
        if let ModuleItem::ModuleDecl(decl) = item {
            match decl {
                ModuleDecl::Import(import) => push(&*import.src),
                ModuleDecl::ExportNamed(export) => {
                    if let Some(src) = &export.src {
                        push(&**src);
                    }
                }
                ModuleDecl::ExportAll(export) => push(&*export.src),
                ModuleDecl::TsImportEquals(import) => {
                    if let TsModuleRef::TsExternalModuleRef(ext) = &import.module_ref {
                        push(&ext.expr);
                    }
                }
                _ => {}
            }
        }
    }
    imports
}
