//! Parsed source files with line information.

use crate::reference::{FileReference, ResolvedModule};
use indexmap::IndexMap;

/// A zero-based line and character pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineAndCharacter {
    /// Line index (0-indexed)
    pub line: u32,
    /// Byte offset from the start of the line (0-indexed)
    pub character: u32,
}

/// One parsed source file together with its resolution metadata.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File name as the compiler knows it
    pub file_name: String,
    /// Source code content
    pub text: String,
    /// Module specifier -> resolution record, in import order.
    /// `None` until the resolver has run; a `None` value means the
    /// specifier did not resolve.
    pub resolved_modules: Option<IndexMap<String, Option<ResolvedModule>>>,
    /// `/// <reference path="..."/>` directives
    pub referenced_files: Option<Vec<FileReference>>,
    /// Byte offsets where each line starts
    line_starts: Vec<u32>,
}

impl SourceUnit {
    /// Create a new source unit without resolution metadata.
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            file_name: file_name.into(),
            text,
            resolved_modules: None,
            referenced_files: None,
            line_starts,
        }
    }

    /// Attach a module resolution map.
    pub fn with_resolved_modules(
        mut self,
        modules: IndexMap<String, Option<ResolvedModule>>,
    ) -> Self {
        self.resolved_modules = Some(modules);
        self
    }

    /// Attach referenced files.
    pub fn with_referenced_files(mut self, files: Vec<FileReference>) -> Self {
        self.referenced_files = Some(files);
        self
    }

    /// Byte offsets where each line starts.
    pub fn line_starts(&self) -> &[u32] {
        &self.line_starts
    }

    /// Get the zero-based line and character for a byte offset.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_and_character(&self, offset: u32) -> LineAndCharacter {
        let offset = offset.min(self.text.len() as u32);

        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        LineAndCharacter {
            line: line_idx as u32,
            character: offset - self.line_starts[line_idx],
        }
    }

    /// Get the text of a specific line (1-indexed), without its line break.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }

        let idx = (line - 1) as usize;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&e| e as usize)
            .unwrap_or(self.text.len());

        Some(self.text[start..end].trim_end_matches(['\n', '\r', '\u{2028}', '\u{2029}']))
    }

    /// Get the number of lines in this file.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Compute the byte offset where each line starts.
///
/// `\r\n`, `\r`, `\n`, U+2028 and U+2029 all end a line, as they do for the
/// TypeScript scanner.
pub fn compute_line_starts(text: &str) -> Vec<u32> {
    let mut starts = vec![0];
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\r' => {
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    starts.push((i + 2) as u32);
                } else {
                    starts.push((i + 1) as u32);
                }
            }
            '\n' => starts.push((i + 1) as u32),
            '\u{2028}' | '\u{2029}' => starts.push((i + c.len_utf8()) as u32),
            _ => {}
        }
    }
    starts
}
