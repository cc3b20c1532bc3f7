//! Diagnostic emitters for different output formats.

use crate::diagnostic::FlatDiagnostic;
use crate::report::DiagnosticsReport;
use crate::source_cache::SourceCache;
use std::io::Write;

/// Totals over every report emitted in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub syntactic: usize,
    pub semantic: usize,
    pub unresolved_modules: usize,
    /// Files that produced no report (unreadable or not checkable)
    pub failed: usize,
}

impl Summary {
    /// Account for the report of one more file.
    pub fn add(&mut self, report: &DiagnosticsReport) {
        self.files += 1;
        self.syntactic += report.syntactic_errors().len();
        self.semantic += report.semantic_errors().len();
        self.unresolved_modules += report.unresolved_module_count();
    }

    /// Account for a file that produced no report.
    pub fn add_missing(&mut self) {
        self.failed += 1;
    }

    pub fn errors(&self) -> usize {
        self.syntactic + self.semantic
    }

    /// A missing report counts as having errors.
    pub fn has_errors(&self) -> bool {
        self.errors() > 0 || self.failed > 0
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &FlatDiagnostic, cache: &SourceCache) -> std::io::Result<()>;

    /// Emit every diagnostic of a report.
    fn emit_all(&mut self, report: &DiagnosticsReport, cache: &SourceCache) -> std::io::Result<()> {
        for diag in report.iter() {
            self.emit(diag, cache)?;
        }
        Ok(())
    }

    /// Emit a summary line.
    fn emit_summary(&mut self, summary: &Summary) -> std::io::Result<()>;
}

/// Rich terminal output with colors and code snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colored: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter.
    pub fn new(writer: W, colored: bool) -> Self {
        Self { writer, colored }
    }

    fn red(&self) -> &'static str {
        if self.colored {
            "\x1b[31m"
        } else {
            ""
        }
    }

    fn reset(&self) -> &'static str {
        if self.colored {
            "\x1b[0m"
        } else {
            ""
        }
    }

    fn bold(&self) -> &'static str {
        if self.colored {
            "\x1b[1m"
        } else {
            ""
        }
    }

    /// Line numbers and gutters.
    fn cyan(&self) -> &'static str {
        if self.colored {
            "\x1b[36m"
        } else {
            ""
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &FlatDiagnostic, cache: &SourceCache) -> std::io::Result<()> {
        let red = self.red();
        let reset = self.reset();
        let bold = self.bold();
        let cyan = self.cyan();

        // Header: error[TS2307]: message
        // Chained messages keep their own indentation on the following lines.
        let mut lines = diagnostic.message.lines();
        writeln!(
            self.writer,
            "{}{}error[TS{}]{}: {}",
            bold,
            red,
            diagnostic.code,
            reset,
            lines.next().unwrap_or("")
        )?;
        for rest in lines {
            writeln!(self.writer, "  {}", rest)?;
        }

        // Location: --> file:line:column
        writeln!(
            self.writer,
            "  {}-->{} {}:{}:{}",
            cyan, reset, diagnostic.file_name, diagnostic.line, diagnostic.column
        )?;

        // Code snippet
        if let Some(line_text) = cache.line_text(&diagnostic.file_name, diagnostic.line) {
            let line_str = diagnostic.line.to_string();
            let padding = " ".repeat(line_str.len());

            writeln!(self.writer, "{} {}|{}", padding, cyan, reset)?;
            writeln!(self.writer, "{}{} |{} {}", cyan, line_str, reset, line_text)?;

            let caret_padding = " ".repeat(diagnostic.column.saturating_sub(1) as usize);
            writeln!(
                self.writer,
                "{} {}|{} {}{}^{}",
                padding, cyan, reset, caret_padding, red, reset
            )?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn emit_summary(&mut self, summary: &Summary) -> std::io::Result<()> {
        let errors = summary.errors();
        let files = summary.files;
        let file_word = if files == 1 { "file" } else { "files" };

        if !summary.has_errors() {
            return writeln!(self.writer, "Checked {} {}, no errors", files, file_word);
        }

        write!(
            self.writer,
            "{}{} error{} in {} {}",
            self.red(),
            errors,
            if errors == 1 { "" } else { "s" },
            files,
            file_word
        )?;
        if summary.failed > 0 {
            write!(
                self.writer,
                ", {} {} could not be checked",
                summary.failed,
                if summary.failed == 1 { "file" } else { "files" }
            )?;
        }
        if summary.unresolved_modules > 0 {
            write!(
                self.writer,
                " ({} unresolved module{})",
                summary.unresolved_modules,
                if summary.unresolved_modules == 1 { "" } else { "s" }
            )?;
        }
        writeln!(self.writer, "{}", self.reset())
    }
}

/// JSON output for tooling integration, one object per line.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &FlatDiagnostic, _cache: &SourceCache) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, diagnostic)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn emit_summary(&mut self, summary: &Summary) -> std::io::Result<()> {
        let json = serde_json::json!({
            "type": "summary",
            "files": summary.files,
            "syntacticErrors": summary.syntactic,
            "semanticErrors": summary.semantic,
            "unresolvedModules": summary.unresolved_modules,
            "failedFiles": summary.failed,
            "total": summary.errors(),
        });
        serde_json::to_writer(&mut self.writer, &json)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Simple text output (no colors, minimal formatting).
pub struct SimpleEmitter<W: Write> {
    writer: W,
}

impl<W: Write> SimpleEmitter<W> {
    /// Create a new simple emitter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticEmitter for SimpleEmitter<W> {
    fn emit(&mut self, diagnostic: &FlatDiagnostic, _cache: &SourceCache) -> std::io::Result<()> {
        writeln!(self.writer, "{}", diagnostic)
    }

    fn emit_summary(&mut self, summary: &Summary) -> std::io::Result<()> {
        write!(
            self.writer,
            "{} error(s) in {} file(s)",
            summary.errors(),
            summary.files
        )?;
        if summary.failed > 0 {
            write!(self.writer, ", {} file(s) not checked", summary.failed)?;
        }
        writeln!(self.writer)
    }
}
