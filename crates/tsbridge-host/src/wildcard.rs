//! Wildcard file patterns (`tsconfig` style `exclude` entries) translated to
//! regular expressions.

use crate::extensions::normalize_slashes;
use thiserror::Error;

const SINGLE_ASTERISK: &str = "[^/]*";
const DOUBLE_ASTERISK: &str = "(/.+?)?";
const QUESTION_MARK: &str = "[^/]";

/// A pattern that did not translate into a valid regex.
#[derive(Debug, Error)]
#[error("invalid file pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Build the regex source for a list of exclude specs.
///
/// Relative specs are resolved against `base_path`. The resulting pattern
/// matches any path equal to a spec or below it. Returns `None` when every
/// spec is empty.
pub fn exclude_pattern_source(specs: &[&str], base_path: &str) -> Option<String> {
    let patterns: Vec<String> = specs
        .iter()
        .filter(|spec| !spec.is_empty())
        .map(|spec| format!("({})", sub_pattern(spec, base_path)))
        .collect();

    if patterns.is_empty() {
        return None;
    }
    Some(format!("^({})($|/)", patterns.join("|")))
}

fn sub_pattern(spec: &str, base_path: &str) -> String {
    let mut components = normalized_path_components(spec, base_path);

    // The root component carries its separator; separators are written
    // between components below.
    if let Some(root) = components.first_mut() {
        if root.ends_with('/') {
            root.pop();
        }
    }

    let last = components.last().cloned().unwrap_or_default();
    if is_implicit_glob(&last) {
        components.push("**".to_string());
        components.push("*".to_string());
    }

    let mut pattern = String::new();
    let mut has_written_component = false;
    for component in &components {
        if component == "**" {
            pattern.push_str(DOUBLE_ASTERISK);
        } else {
            if has_written_component {
                pattern.push('/');
            }
            push_component(&mut pattern, component);
        }
        has_written_component = true;
    }
    pattern
}

/// A last component without `.`, `*` or `?` names a directory.
fn is_implicit_glob(component: &str) -> bool {
    !component.contains(['.', '*', '?'])
}

fn push_component(pattern: &mut String, component: &str) {
    for c in component.chars() {
        match c {
            '*' => pattern.push_str(SINGLE_ASTERISK),
            '?' => pattern.push_str(QUESTION_MARK),
            c if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() => pattern.push(c),
            c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
}

/// Split `spec` (joined onto `base_path` when relative) into a root and
/// path components, resolving `.` and `..`.
fn normalized_path_components(spec: &str, base_path: &str) -> Vec<String> {
    let spec = normalize_slashes(spec);
    let path = if root_length(&spec) > 0 || base_path.is_empty() {
        spec
    } else {
        let base = normalize_slashes(base_path);
        if base.ends_with('/') {
            format!("{}{}", base, spec)
        } else {
            format!("{}/{}", base, spec)
        }
    };

    let root_len = root_length(&path);
    let (root, rest) = path.split_at(root_len);

    let mut reduced = vec![root.to_string()];
    for component in rest.split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                if reduced.len() > 1 {
                    if reduced.last().map(String::as_str) != Some("..") {
                        reduced.pop();
                        continue;
                    }
                } else if !reduced[0].is_empty() {
                    // `..` above a root stays at the root
                    continue;
                }
                reduced.push(component.to_string());
            }
            _ => reduced.push(component.to_string()),
        }
    }
    reduced
}

/// Length of the root of a normalized path: `/`, `//server/`, `c:/` or `c:`.
fn root_length(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.first() == Some(&b'/') {
        if bytes.get(1) != Some(&b'/') {
            return 1;
        }
        // UNC path: //server/share
        return match path[2..].find('/') {
            Some(idx) => idx + 3,
            None => path.len(),
        };
    }
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            return 3;
        }
        return 2;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compile(specs: &[&str], base: &str) -> Regex {
        Regex::new(&exclude_pattern_source(specs, base).unwrap()).unwrap()
    }

    #[test]
    fn test_directory_spec_is_implicit_glob() {
        assert_eq!(
            exclude_pattern_source(&["dist"], "/proj").unwrap(),
            "^((/proj/dist(/.+?)?/[^/]*))($|/)"
        );

        let re = compile(&["node_modules"], "/proj");
        assert!(re.is_match("/proj/node_modules/pkg/index.d.ts"));
        assert!(re.is_match("/proj/node_modules/a.ts"));
        assert!(!re.is_match("/proj/src/node_modules.ts"));
        assert!(!re.is_match("/other/node_modules/a.ts"));
    }

    #[test]
    fn test_double_asterisk() {
        let re = compile(&["**/*.spec.ts"], "/proj");
        assert!(re.is_match("/proj/a.spec.ts"));
        assert!(re.is_match("/proj/src/deep/a.spec.ts"));
        assert!(!re.is_match("/proj/src/a.ts"));
    }

    #[test]
    fn test_question_mark_and_escaping() {
        let re = compile(&["src/v?.(old).ts"], "/proj");
        assert!(re.is_match("/proj/src/v1.(old).ts"));
        assert!(!re.is_match("/proj/src/v12.(old).ts"));
        assert!(!re.is_match("/proj/src/v1xoldxxts"));
    }

    #[test]
    fn test_multiple_specs() {
        let re = compile(&["dist", "**/*.test.ts"], "/proj");
        assert!(re.is_match("/proj/dist/index.js"));
        assert!(re.is_match("/proj/src/a.test.ts"));
        assert!(!re.is_match("/proj/src/a.ts"));
    }

    #[test]
    fn test_empty_base_anchors_at_root() {
        assert_eq!(
            exclude_pattern_source(&["dist/**"], "").unwrap(),
            "^((/dist(/.+?)?))($|/)"
        );
    }

    #[test]
    fn test_absolute_spec_ignores_base() {
        let re = compile(&["/tmp/gen"], "/proj");
        assert!(re.is_match("/tmp/gen/a.ts"));
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let re = compile(&["./src/../build"], "/proj/");
        assert!(re.is_match("/proj/build/out.js"));
    }

    #[test]
    fn test_empty_specs() {
        assert_eq!(exclude_pattern_source(&[], "/proj"), None);
        assert_eq!(exclude_pattern_source(&["", ""], "/proj"), None);
    }

    #[test]
    fn test_root_length() {
        assert_eq!(root_length("/a"), 1);
        assert_eq!(root_length("c:/a"), 3);
        assert_eq!(root_length("c:"), 2);
        assert_eq!(root_length("//server/share/a"), 9);
        assert_eq!(root_length("a/b"), 0);
    }
}
