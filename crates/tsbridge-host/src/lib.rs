//! Compiler capabilities behind tsbridge
//!
//! The adaptation layer never talks to a compiler directly. It asks for the
//! three things it needs through traits:
//!
//! - [`PositionResolver`]: byte offset -> zero-based line and character
//! - [`PathClassifier`]: extension rules for source and declaration files
//! - [`PatternCompiler`]: wildcard patterns -> regular expressions
//!
//! [`TsHost`] implements all three the way the TypeScript compiler does.

pub mod extensions;
pub mod wildcard;

use regex::Regex;
use tsbridge_types::{LineAndCharacter, SourceUnit};

pub use extensions::{file_extension_is, normalize_slashes, remove_file_extension};
pub use wildcard::{exclude_pattern_source, PatternError};

/// Maps offsets inside a source unit to line and character.
pub trait PositionResolver {
    fn line_and_character(&self, unit: &SourceUnit, position: u32) -> LineAndCharacter;
}

/// File name rules of the compiler.
pub trait PathClassifier {
    /// Remove a recognized source extension, if any.
    fn remove_file_extension<'a>(&self, path: &'a str) -> &'a str;

    /// Check whether a file is a declaration file.
    fn is_typings(&self, file_name: &str) -> bool {
        file_extension_is(file_name, ".d.ts")
    }
}

/// Turns wildcard file patterns into regular expressions.
pub trait PatternCompiler {
    /// Build one regex matching any of `specs` (and everything beneath a
    /// match), with relative specs anchored at `base_path`.
    ///
    /// Returns `Ok(None)` when no usable spec is given.
    fn exclude_pattern(&self, specs: &[&str], base_path: &str)
        -> Result<Option<Regex>, PatternError>;
}

/// The TypeScript compiler's behavior.
#[derive(Debug, Clone, Copy)]
pub struct TsHost {
    case_sensitive_file_names: bool,
}

impl TsHost {
    pub fn new() -> Self {
        Self {
            case_sensitive_file_names: true,
        }
    }

    /// Match file patterns ignoring case, as on case-insensitive file systems.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive_file_names = false;
        self
    }

    pub fn use_case_sensitive_file_names(&self) -> bool {
        self.case_sensitive_file_names
    }
}

impl Default for TsHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionResolver for TsHost {
    fn line_and_character(&self, unit: &SourceUnit, position: u32) -> LineAndCharacter {
        unit.line_and_character(position)
    }
}

impl PathClassifier for TsHost {
    fn remove_file_extension<'a>(&self, path: &'a str) -> &'a str {
        remove_file_extension(path)
    }
}

impl PatternCompiler for TsHost {
    fn exclude_pattern(
        &self,
        specs: &[&str],
        base_path: &str,
    ) -> Result<Option<Regex>, PatternError> {
        let Some(source) = exclude_pattern_source(specs, base_path) else {
            return Ok(None);
        };
        log::trace!("exclude pattern {:?} -> {}", specs, source);

        regex::RegexBuilder::new(&source)
            .case_insensitive(!self.case_sensitive_file_names)
            .build()
            .map(Some)
            .map_err(|source| PatternError {
                pattern: specs.join(", "),
                source,
            })
    }
}
