use thiserror::Error;
use tsbridge_diagnostics::ReportError;
use tsbridge_host::PatternError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid argument: missing field(s) {}", .missing.join(", "))]
    InvalidArgument { missing: Vec<&'static str> },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Report(ReportError),
}

impl From<ReportError> for Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Json(e) => Error::Parse(e),
            ReportError::MissingFields(missing) => Error::InvalidArgument { missing },
            err @ ReportError::InvalidPosition { .. } => Error::Report(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsbridge_diagnostics::DiagnosticsReport;

    #[test]
    fn test_missing_report_fields_become_invalid_argument() {
        let err: Error = DiagnosticsReport::from_json_str("{}").unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid argument: missing field(s) syntacticErrors, semanticErrors"
        );
    }

    #[test]
    fn test_bad_json_becomes_parse_error() {
        let err: Error = DiagnosticsReport::from_json_str("{").unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_zero_position_becomes_report_error() {
        let err: Error = DiagnosticsReport::from_json_str(
            r#"{"syntacticErrors": [], "semanticErrors": [{"code": 2307, "fileName": "a.ts", "message": "m", "line": 2, "column": 0}]}"#,
        )
        .unwrap_err()
        .into();
        assert!(matches!(err, Error::Report(_)));
        assert!(err.to_string().contains("a.ts has invalid position 2:0"));
    }
}
