//! Adaptation layer between a TypeScript compiler and a build pipeline
//!
//! Takes what the compiler produced (parsed source units, diagnostics,
//! source maps) and reshapes it into the flat values a build pipeline works
//! with:
//!
//! - [`normalize_path`]: compiler file names to extensionless module paths
//! - [`prepare_source_map`]: source maps pointing at exactly one source
//! - [`get_references`]: resolved modules, referenced files and typings
//! - [`flatten_diagnostics`] / [`create_diagnostics`]: flat diagnostics and
//!   the [`DiagnosticsReport`] built from them
//!
//! Compiler capabilities are passed in through the traits of
//! `tsbridge_host`; [`TsHost`] is the TypeScript-compatible default.

pub mod error;
pub mod exclude;
pub mod flatten;
pub mod path;
pub mod references;
pub mod source_map;

pub use error::{Error, Result};
pub use exclude::{exclude_regex, exclude_regex_in};
pub use flatten::{create_diagnostics, flatten_diagnostics};
pub use path::{is_source_map, is_typings, normalize_path};
pub use references::get_references;
pub use source_map::{prepare_source_map, SourceMap};

// Re-export the types that appear in this crate's signatures
pub use tsbridge_diagnostics::{
    codes, has_errors, DiagnosticRecord, DiagnosticsReport, FlatDiagnostic, MessageChain,
    MessageText,
};
pub use tsbridge_host::{PathClassifier, PatternCompiler, PositionResolver, TsHost};
pub use tsbridge_types::{FileReference, ReferenceSet, ResolvedModule, SourceUnit};
