use crate::error::Result;
use regex::Regex;
use tsbridge_host::PatternCompiler;

/// Compile exclude patterns with no base directory.
///
/// Returns `Ok(None)` when there is no non-empty pattern.
pub fn exclude_regex<S: AsRef<str>>(
    patterns: &[S],
    compiler: &impl PatternCompiler,
) -> Result<Option<Regex>> {
    exclude_regex_in(patterns, "", compiler)
}

/// Compile exclude patterns relative to `base_path`.
pub fn exclude_regex_in<S: AsRef<str>>(
    patterns: &[S],
    base_path: &str,
    compiler: &impl PatternCompiler,
) -> Result<Option<Regex>> {
    let specs: Vec<&str> = patterns
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect();
    if specs.is_empty() {
        return Ok(None);
    }
    Ok(compiler.exclude_pattern(&specs, base_path)?)
}
