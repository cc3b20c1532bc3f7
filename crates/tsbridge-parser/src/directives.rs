//! Triple-slash reference directives.

use regex::Regex;
use std::sync::OnceLock;
use tsbridge_types::FileReference;

fn reference_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^///\s*<reference\s+path\s*=\s*(?:'([^']*)'|"([^"]*)")[^\n]*?/>"#)
            .expect("reference directive regex is valid")
    })
}

/// Collect `/// <reference path="..."/>` directives.
///
/// Directives only count in the comment block at the top of the file: line
/// comments and `/* ... */` blocks (such as a license header) are skipped,
/// and the first line that holds anything else ends the scan.
pub fn referenced_files(source: &str) -> Vec<FileReference> {
    let mut references = Vec::new();
    let mut line_start = 0usize;
    let mut in_block_comment = false;

    for line in source.split_inclusive('\n') {
        let mut content = line.trim();

        if in_block_comment {
            match content.find("*/") {
                Some(end) => {
                    in_block_comment = false;
                    content = content[end + 2..].trim_start();
                }
                None => {
                    line_start += line.len();
                    continue;
                }
            }
        }

        // Block comments opening (and maybe closing) on this line
        while let Some(rest) = content.strip_prefix("/*") {
            match rest.find("*/") {
                Some(end) => content = rest[end + 2..].trim_start(),
                None => {
                    in_block_comment = true;
                    content = "";
                }
            }
        }

        if content.is_empty() {
            line_start += line.len();
            continue;
        }
        if !content.starts_with("//") {
            break;
        }

        if let Some(caps) = reference_path_regex().captures(content) {
            if let Some(path) = caps.get(1).or_else(|| caps.get(2)) {
                // `content` is a suffix of the line without its trailing whitespace
                let offset = line.trim_end().len() - content.len();
                let pos = (line_start + offset + path.start()) as u32;
                references.push(FileReference::new(
                    path.as_str(),
                    pos,
                    pos + path.as_str().len() as u32,
                ));
            }
        }
        line_start += line.len();
    }
    references
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_quote_styles() {
        let source = "/// <reference path=\"a.d.ts\" />\n///<reference path='b.ts'/>\n";
        let refs = referenced_files(source);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].file_name, "a.d.ts");
        assert_eq!(refs[1].file_name, "b.ts");
    }

    #[test]
    fn test_offsets_point_at_path() {
        let source = "// header\n  /// <reference path=\"lib/x.ts\" />\n";
        let refs = referenced_files(source);

        let r = &refs[0];
        assert_eq!(&source[r.pos as usize..r.end as usize], "lib/x.ts");
    }

    #[test]
    fn test_scan_stops_at_first_statement() {
        let source = "/// <reference path=\"a.ts\" />\nlet x = 1;\n/// <reference path=\"b.ts\" />\n";
        let refs = referenced_files(source);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].file_name, "a.ts");
    }

    #[test]
    fn test_type_references_are_not_file_references() {
        let source = "/// <reference types=\"node\" />\n/// <reference lib=\"es2020\" />\n";
        assert!(referenced_files(source).is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "// a\r\n/// <reference path=\"x.d.ts\" />\r\nexport {};\r\n";
        let refs = referenced_files(source);
        assert_eq!(refs.len(), 1);
        assert_eq!(&source[refs[0].pos as usize..refs[0].end as usize], "x.d.ts");
    }

    #[test]
    fn test_scan_continues_past_block_comments() {
        let source = "/*\n * Copyright (c) Example.\n * Licensed under MIT.\n */\n/// <reference path=\"a.d.ts\" />\n/* inline */ /// <reference path=\"b.ts\" />\nexport {};\n/// <reference path=\"c.ts\" />\n";
        let refs = referenced_files(source);

        let names: Vec<&str> = refs.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.d.ts", "b.ts"]);
        for r in &refs {
            assert_eq!(&source[r.pos as usize..r.end as usize], r.file_name);
        }
    }

    #[test]
    fn test_code_after_block_comment_ends_scan() {
        let source = "/* header */ let x = 1;\n/// <reference path=\"a.ts\" />\n";
        assert!(referenced_files(source).is_empty());
    }
}
