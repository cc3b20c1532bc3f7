//! Compiler diagnostics reduced to flat records.

use tsbridge_diagnostics::{flatten_message_text, DiagnosticRecord, DiagnosticsReport, FlatDiagnostic};
use tsbridge_host::PositionResolver;

/// Flatten diagnostics, keeping their order.
///
/// Diagnostics that are not attached to a file (global or compiler-option
/// diagnostics) are dropped.
pub fn flatten_diagnostics(
    diagnostics: &[DiagnosticRecord],
    resolver: &impl PositionResolver,
) -> Vec<FlatDiagnostic> {
    let flat: Vec<FlatDiagnostic> = diagnostics
        .iter()
        .filter_map(|diagnostic| {
            let file = diagnostic.file.as_deref()?;
            let pos = resolver.line_and_character(file, diagnostic.start);
            Some(FlatDiagnostic {
                code: diagnostic.code,
                file_name: file.file_name.clone(),
                message: flatten_message_text(&diagnostic.message_text, "\n"),
                line: pos.line + 1,
                column: pos.character + 1,
            })
        })
        .collect();

    let dropped = diagnostics.len() - flat.len();
    if dropped > 0 {
        log::debug!("dropped {} diagnostic(s) without a file", dropped);
    }
    flat
}

/// Build a report from the syntactic and semantic diagnostics of a program.
pub fn create_diagnostics(
    syntactic: &[DiagnosticRecord],
    semantic: &[DiagnosticRecord],
    resolver: &impl PositionResolver,
) -> DiagnosticsReport {
    DiagnosticsReport::new(
        flatten_diagnostics(syntactic, resolver),
        flatten_diagnostics(semantic, resolver),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tsbridge_diagnostics::{codes, MessageChain};
    use tsbridge_host::TsHost;
    use tsbridge_types::{LineAndCharacter, SourceUnit};

    fn unit() -> Arc<SourceUnit> {
        Arc::new(SourceUnit::new(
            "src/main.ts",
            "import { a } from './a';\nimport b from 'b';\nlet x: number = 'x';\n",
        ))
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten_diagnostics(&[], &TsHost::new()).is_empty());
    }

    #[test]
    fn test_positions_are_one_based() {
        let diag = DiagnosticRecord::error(codes::CANNOT_FIND_MODULE, "Cannot find module 'b'.")
            .in_file(unit(), 39, 3)
            .build();

        let flat = flatten_diagnostics(&[diag], &TsHost::new());
        assert_eq!(
            flat,
            vec![FlatDiagnostic {
                code: 2307,
                file_name: "src/main.ts".to_string(),
                message: "Cannot find module 'b'.".to_string(),
                line: 2,
                column: 15,
            }]
        );
    }

    #[test]
    fn test_offset_zero_is_line_one_column_one() {
        let diag = DiagnosticRecord::error(1005, "';' expected.")
            .in_file(unit(), 0, 1)
            .build();
        let flat = flatten_diagnostics(&[diag], &TsHost::new());
        assert_eq!((flat[0].line, flat[0].column), (1, 1));
    }

    #[test]
    fn test_drops_diagnostics_without_file() {
        let diags = vec![
            DiagnosticRecord::error(5023, "Unknown compiler option 'x'.").build(),
            DiagnosticRecord::error(2322, "Type 'string' is not assignable to type 'number'.")
                .in_file(unit(), 48, 1)
                .build(),
        ];

        let flat = flatten_diagnostics(&diags, &TsHost::new());
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].code, 2322);
        assert_eq!((flat[0].line, flat[0].column), (3, 5));
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let diag = DiagnosticRecord::error(2304, "Cannot find name 'y'.")
            .in_file(unit(), 4, 1)
            .build();
        let other = DiagnosticRecord::error(2307, "Cannot find module './a'.")
            .in_file(unit(), 18, 5)
            .build();

        let flat = flatten_diagnostics(&[diag.clone(), other, diag], &TsHost::new());
        let codes: Vec<u32> = flat.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![2304, 2307, 2304]);
        assert_eq!(flat[0], flat[2]);
    }

    #[test]
    fn test_message_chain_is_flattened() {
        let chain = MessageChain::new("Type 'A' is not assignable to type 'B'.", 2322)
            .with_next(MessageChain::new("Property 'x' is missing.", 2741));
        let diag = DiagnosticRecord::error(2322, chain).in_file(unit(), 0, 1).build();

        let flat = flatten_diagnostics(&[diag], &TsHost::new());
        assert_eq!(
            flat[0].message,
            "Type 'A' is not assignable to type 'B'.\n  Property 'x' is missing."
        );
    }

    /// Reports every position as the third character of line ten.
    struct FixedResolver;

    impl PositionResolver for FixedResolver {
        fn line_and_character(&self, _unit: &SourceUnit, _position: u32) -> LineAndCharacter {
            LineAndCharacter {
                line: 9,
                character: 2,
            }
        }
    }

    #[test]
    fn test_positions_come_from_resolver() {
        let diag = DiagnosticRecord::error(2304, "x").in_file(unit(), 0, 0).build();
        let flat = flatten_diagnostics(&[diag], &FixedResolver);
        assert_eq!((flat[0].line, flat[0].column), (10, 3));
    }

    #[test]
    fn test_create_diagnostics() {
        let syntactic = vec![DiagnosticRecord::error(1005, "';' expected.").build()];
        let semantic = vec![DiagnosticRecord::error(2307, "Cannot find module 'b'.")
            .in_file(unit(), 39, 3)
            .build()];

        let report = create_diagnostics(&syntactic, &semantic, &TsHost::new());
        assert!(report.syntactic_errors().is_empty());
        assert_eq!(report.semantic_errors().len(), 1);
        assert!(report.has_errors());
        assert!(report.has_unresolved_modules());

        let clean = create_diagnostics(&[], &[], &TsHost::new());
        assert!(!clean.has_errors());
        assert!(!clean.has_unresolved_modules());
    }
}
