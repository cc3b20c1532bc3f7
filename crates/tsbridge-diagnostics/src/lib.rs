//! Diagnostic plumbing for tsbridge.
//!
//! This crate provides:
//! - Compiler diagnostic records with nested message chains
//! - Flat diagnostics (file, 1-based line/column, code, message)
//! - Diagnostics reports with error classification
//! - Multiple output formats (terminal, JSON, simple text)
//!
//! # Example
//!
//! ```
//! use tsbridge_diagnostics::{
//!     codes, DiagnosticEmitter, DiagnosticsReport, FlatDiagnostic, SimpleEmitter, SourceCache,
//! };
//!
//! let report = DiagnosticsReport::new(
//!     Vec::new(),
//!     vec![FlatDiagnostic {
//!         code: codes::CANNOT_FIND_MODULE,
//!         file_name: "main.ts".to_string(),
//!         message: "Cannot find module './missing'.".to_string(),
//!         line: 1,
//!         column: 15,
//!     }],
//! );
//! assert!(report.has_unresolved_modules());
//!
//! let mut out = Vec::new();
//! let mut emitter = SimpleEmitter::new(&mut out);
//! emitter.emit_all(&report, &SourceCache::new()).unwrap();
//! ```

pub mod codes;
pub mod diagnostic;
pub mod emitter;
pub mod message;
pub mod report;
pub mod source_cache;

// Re-export commonly used types
pub use diagnostic::{Category, DiagnosticBuilder, DiagnosticRecord, FlatDiagnostic};
pub use emitter::{DiagnosticEmitter, JsonEmitter, SimpleEmitter, Summary, TerminalEmitter};
pub use message::{flatten_message_text, MessageChain, MessageText};
pub use report::{has_errors, DiagnosticsReport, ReportError};
pub use source_cache::SourceCache;
