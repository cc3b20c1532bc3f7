//! Well-known compiler diagnostic codes and their message templates.

/// `'{0}' expected.`
pub const SYNTAX_EXPECTED: u32 = 1005;

/// Code given to every syntax error from the parser.
///
/// Parser messages do not map onto individual compiler codes, so they all
/// share 1005 and keep the parser's own message text rather than the
/// `'{0}' expected.` template.
pub const SYNTAX_ERROR: u32 = SYNTAX_EXPECTED;

/// `Cannot find module '{0}'.`
pub const CANNOT_FIND_MODULE: u32 = 2307;

/// `File '{0}' not found.`
pub const FILE_NOT_FOUND: u32 = 6053;

/// Get the message template for a known code.
pub fn message_template(code: u32) -> Option<&'static str> {
    match code {
        SYNTAX_EXPECTED => Some("'{0}' expected."),
        CANNOT_FIND_MODULE => Some("Cannot find module '{0}'."),
        FILE_NOT_FOUND => Some("File '{0}' not found."),
        _ => None,
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders in a message template.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i), arg);
    }
    out
}

/// Format the message of a known code; unknown codes get their arguments
/// joined by spaces.
pub fn diagnostic_message(code: u32, args: &[&str]) -> String {
    match message_template(code) {
        Some(template) => format_message(template, args),
        None => args.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_template() {
        let template = message_template(CANNOT_FIND_MODULE).unwrap();
        assert_eq!(
            format_message(template, &["./util"]),
            "Cannot find module './util'."
        );
    }

    #[test]
    fn test_unknown_code_has_no_template() {
        assert_eq!(message_template(9999), None);
        assert_eq!(diagnostic_message(9999, &["a", "b"]), "a b");
    }

    #[test]
    fn test_diagnostic_message() {
        assert_eq!(
            diagnostic_message(FILE_NOT_FOUND, &["/src/a.d.ts"]),
            "File '/src/a.d.ts' not found."
        );
    }

    #[test]
    fn test_unused_placeholders_are_kept() {
        assert_eq!(format_message("{0} and {1}", &["a"]), "a and {1}");
    }
}
