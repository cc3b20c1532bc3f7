//! Module resolution records and file references.

use serde::{Deserialize, Serialize};

/// Where a module specifier ended up after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModule {
    /// Concrete file the specifier resolved to
    pub resolved_file_name: Option<String>,
    /// Extension of the resolved file (e.g. ".d.ts")
    pub extension: Option<String>,
    /// Whether the file came from a package (node_modules)
    #[serde(default)]
    pub is_external_library_import: bool,
}

impl ResolvedModule {
    /// Create a record pointing at a file.
    pub fn new(resolved_file_name: impl Into<String>) -> Self {
        Self {
            resolved_file_name: Some(resolved_file_name.into()),
            ..Self::default()
        }
    }
}

/// A `/// <reference path="..."/>` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    /// Path exactly as written in the directive
    pub file_name: String,
    /// Byte offset of the path text
    pub pos: u32,
    /// Byte offset just past the path text
    pub end: u32,
}

impl FileReference {
    pub fn new(file_name: impl Into<String>, pos: u32, end: u32) -> Self {
        Self {
            file_name: file_name.into(),
            pos,
            end,
        }
    }
}

/// Dependencies of one source unit, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    /// Referenced files that are not declaration files
    pub files: Vec<String>,
    /// Files that imported modules resolved to
    pub modules: Vec<String>,
    /// Referenced declaration files
    pub typings: Vec<String>,
}

impl ReferenceSet {
    /// Check if the unit has no dependencies at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.modules.is_empty() && self.typings.is_empty()
    }
}
