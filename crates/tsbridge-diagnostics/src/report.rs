//! Syntactic and semantic diagnostics of a compilation, with classification.

use crate::codes;
use crate::diagnostic::FlatDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const REQUIRED_FIELDS: [&str; 2] = ["syntacticErrors", "semanticErrors"];

/// Errors from reading a report out of untyped data.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid diagnostics report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("diagnostics report is missing field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("diagnostic in {file_name} has invalid position {line}:{column} (both must be at least 1)")]
    InvalidPosition {
        file_name: String,
        line: u32,
        column: u32,
    },
}

/// Flattened diagnostics of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    syntactic_errors: Vec<FlatDiagnostic>,
    semantic_errors: Vec<FlatDiagnostic>,
}

impl DiagnosticsReport {
    pub fn new(syntactic_errors: Vec<FlatDiagnostic>, semantic_errors: Vec<FlatDiagnostic>) -> Self {
        Self {
            syntactic_errors,
            semantic_errors,
        }
    }

    /// Read a report from JSON, e.g. one persisted by an earlier build.
    ///
    /// Both `syntacticErrors` and `semanticErrors` must be present; every
    /// missing one is named in the error. Lines and columns are 1-based, so
    /// a zero in either is rejected.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ReportError> {
        let missing: Vec<&'static str> = match value.as_object() {
            Some(obj) => REQUIRED_FIELDS
                .iter()
                .copied()
                .filter(|field| !obj.contains_key(*field))
                .collect(),
            None => REQUIRED_FIELDS.to_vec(),
        };
        if !missing.is_empty() {
            return Err(ReportError::MissingFields(missing));
        }
        let report: Self = serde_json::from_value(value)?;
        if let Some(bad) = report.iter().find(|d| d.line == 0 || d.column == 0) {
            return Err(ReportError::InvalidPosition {
                file_name: bad.file_name.clone(),
                line: bad.line,
                column: bad.column,
            });
        }
        Ok(report)
    }

    /// Parse a report from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ReportError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(value)
    }

    pub fn syntactic_errors(&self) -> &[FlatDiagnostic] {
        &self.syntactic_errors
    }

    pub fn semantic_errors(&self) -> &[FlatDiagnostic] {
        &self.semantic_errors
    }

    /// Check if there are any diagnostics at all.
    pub fn has_errors(&self) -> bool {
        !self.semantic_errors.is_empty() || !self.syntactic_errors.is_empty()
    }

    /// Check if any semantic diagnostic is a "Cannot find module" error.
    pub fn has_unresolved_modules(&self) -> bool {
        self.unresolved_modules().next().is_some()
    }

    /// Count the "Cannot find module" errors.
    pub fn unresolved_module_count(&self) -> usize {
        self.unresolved_modules().count()
    }

    fn unresolved_modules(&self) -> impl Iterator<Item = &FlatDiagnostic> {
        self.semantic_errors
            .iter()
            .filter(|d| d.code == codes::CANNOT_FIND_MODULE)
    }

    /// Count diagnostics across both lists.
    pub fn error_count(&self) -> usize {
        self.syntactic_errors.len() + self.semantic_errors.len()
    }

    /// Iterate over all diagnostics, syntactic first.
    pub fn iter(&self) -> impl Iterator<Item = &FlatDiagnostic> {
        self.syntactic_errors.iter().chain(self.semantic_errors.iter())
    }
}

/// Check a possibly absent report for errors.
///
/// A missing report counts as having errors.
pub fn has_errors(report: Option<&DiagnosticsReport>) -> bool {
    report.map_or(true, DiagnosticsReport::has_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(code: u32) -> FlatDiagnostic {
        FlatDiagnostic {
            code,
            file_name: "main.ts".to_string(),
            message: "message".to_string(),
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn test_empty_report_has_no_errors() {
        let report = DiagnosticsReport::new(Vec::new(), Vec::new());
        assert!(!report.has_errors());
        assert!(!report.has_unresolved_modules());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_either_list_counts_as_errors() {
        assert!(DiagnosticsReport::new(vec![flat(1005)], Vec::new()).has_errors());
        assert!(DiagnosticsReport::new(Vec::new(), vec![flat(2322)]).has_errors());
    }

    #[test]
    fn test_unresolved_modules() {
        let report = DiagnosticsReport::new(Vec::new(), vec![flat(2322), flat(2307)]);
        assert!(report.has_unresolved_modules());

        let report = DiagnosticsReport::new(Vec::new(), vec![flat(2322), flat(2304)]);
        assert!(!report.has_unresolved_modules());
        assert_eq!(report.unresolved_module_count(), 0);

        let report = DiagnosticsReport::new(vec![flat(2307)], vec![flat(2307), flat(2307)]);
        assert_eq!(report.unresolved_module_count(), 2);
    }

    #[test]
    fn test_unresolved_modules_ignores_syntactic_list() {
        let report = DiagnosticsReport::new(vec![flat(2307)], Vec::new());
        assert!(!report.has_unresolved_modules());
    }

    #[test]
    fn test_missing_report_has_errors() {
        assert!(has_errors(None));
        assert!(!has_errors(Some(&DiagnosticsReport::default())));
        assert!(has_errors(Some(&DiagnosticsReport::new(vec![flat(1005)], Vec::new()))));
    }

    #[test]
    fn test_iter_orders_syntactic_first() {
        let report = DiagnosticsReport::new(vec![flat(1005)], vec![flat(2307)]);
        let codes: Vec<u32> = report.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![1005, 2307]);
    }

    #[test]
    fn test_from_json() {
        let report = DiagnosticsReport::from_json(json!({
            "syntacticErrors": [],
            "semanticErrors": [{
                "code": 2307,
                "fileName": "main.ts",
                "message": "Cannot find module 'x'.",
                "line": 3,
                "column": 8
            }]
        }))
        .unwrap();

        assert!(report.has_unresolved_modules());
        assert_eq!(report.semantic_errors()[0].line, 3);
    }

    #[test]
    fn test_from_json_names_missing_fields() {
        let err = DiagnosticsReport::from_json(json!({ "syntacticErrors": [] })).unwrap_err();
        match err {
            ReportError::MissingFields(fields) => assert_eq!(fields, vec!["semanticErrors"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = DiagnosticsReport::from_json(json!(null)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "diagnostics report is missing field(s): syntacticErrors, semanticErrors"
        );
    }

    #[test]
    fn test_from_json_str_rejects_bad_elements() {
        let err = DiagnosticsReport::from_json_str(
            r#"{"syntacticErrors": [{"code": "x"}], "semanticErrors": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_zero_positions() {
        let err = DiagnosticsReport::from_json(json!({
            "syntacticErrors": [],
            "semanticErrors": [{
                "code": 2307,
                "fileName": "main.ts",
                "message": "Cannot find module 'x'.",
                "line": 1,
                "column": 0
            }]
        }))
        .unwrap_err();

        match err {
            ReportError::InvalidPosition {
                file_name,
                line,
                column,
            } => {
                assert_eq!(file_name, "main.ts");
                assert_eq!((line, column), (1, 0));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = DiagnosticsReport::from_json_str(
            r#"{"syntacticErrors": [{"code": 1005, "fileName": "a.ts", "message": "m", "line": 0, "column": 4}], "semanticErrors": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidPosition { line: 0, .. }));
    }

    #[test]
    fn test_json_roundtrip_keeps_field_names() {
        let report = DiagnosticsReport::new(vec![flat(1005)], Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("syntacticErrors").is_some());
        assert_eq!(DiagnosticsReport::from_json(value).unwrap(), report);
    }
}
