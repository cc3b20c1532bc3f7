//! Source unit cache for diagnostic rendering.

use std::collections::HashMap;
use std::sync::Arc;
use tsbridge_types::SourceUnit;

/// Source units indexed by file name, so emitters can show code snippets
/// for flattened diagnostics.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: HashMap<String, Arc<SourceUnit>>,
}

impl SourceCache {
    /// Create a new empty source cache.
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Add a unit to the cache.
    /// If a unit with the same file name was already added, it is kept.
    pub fn add(&mut self, unit: Arc<SourceUnit>) {
        self.files
            .entry(unit.file_name.clone())
            .or_insert(unit);
    }

    /// Get a source unit by file name.
    pub fn get(&self, file_name: &str) -> Option<&SourceUnit> {
        self.files.get(file_name).map(|unit| unit.as_ref())
    }

    /// Get the text of a line (1-indexed) of a cached file.
    pub fn line_text(&self, file_name: &str, line: u32) -> Option<&str> {
        self.get(file_name)?.line_text(line)
    }

    /// Get the number of files in the cache.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut cache = SourceCache::new();
        cache.add(Arc::new(SourceUnit::new("test.ts", "let x = 42;\nlet y = 100;")));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.line_text("test.ts", 2), Some("let y = 100;"));
        assert!(cache.get("other.ts").is_none());
    }

    #[test]
    fn test_first_unit_wins() {
        let mut cache = SourceCache::new();
        cache.add(Arc::new(SourceUnit::new("test.ts", "first")));
        cache.add(Arc::new(SourceUnit::new("test.ts", "second")));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.line_text("test.ts", 1), Some("first"));
    }
}
