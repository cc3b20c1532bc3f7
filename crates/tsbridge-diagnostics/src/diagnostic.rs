//! Compiler diagnostic records and their flattened form.

use crate::message::MessageText;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tsbridge_types::SourceUnit;

/// Category of a diagnostic, as the compiler reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl Category {
    /// Get the string representation for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Suggestion => "suggestion",
            Category::Message => "message",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A diagnostic as produced by the compiler.
#[derive(Debug, Clone)]
pub struct DiagnosticRecord {
    /// File the diagnostic belongs to; `None` for global or options diagnostics
    pub file: Option<Arc<SourceUnit>>,
    /// Byte offset of the start of the diagnostic in `file`
    pub start: u32,
    /// Length of the highlighted range in bytes
    pub length: u32,
    /// Message, possibly a chain
    pub message_text: MessageText,
    /// Numeric compiler code
    pub code: u32,
    pub category: Category,
}

impl DiagnosticRecord {
    /// Create a new error diagnostic.
    pub fn error(code: u32, message: impl Into<MessageText>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Category::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: u32, message: impl Into<MessageText>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Category::Warning, message)
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        self.category == Category::Error
    }
}

/// Builder for constructing diagnostic records fluently.
pub struct DiagnosticBuilder {
    inner: DiagnosticRecord,
}

impl DiagnosticBuilder {
    /// Create a new diagnostic builder.
    pub fn new(code: u32, category: Category, message: impl Into<MessageText>) -> Self {
        Self {
            inner: DiagnosticRecord {
                file: None,
                start: 0,
                length: 0,
                message_text: message.into(),
                code,
                category,
            },
        }
    }

    /// Attach the diagnostic to a range of a source unit.
    pub fn in_file(mut self, file: Arc<SourceUnit>, start: u32, length: u32) -> Self {
        self.inner.file = Some(file);
        self.inner.start = start;
        self.inner.length = length;
        self
    }

    /// Build the diagnostic.
    pub fn build(self) -> DiagnosticRecord {
        self.inner
    }
}

/// A diagnostic reduced to what a build pipeline needs to show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDiagnostic {
    pub code: u32,
    pub file_name: String,
    pub message: String,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
}

impl std::fmt::Display for FlatDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: TS{}: {}",
            self.file_name, self.line, self.column, self.code, self.message
        )
    }
}
