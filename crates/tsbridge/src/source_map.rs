//! Source maps rewritten to describe exactly one source file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parse a source map and point it at a single source.
///
/// `sources` becomes `[source_map_path]` and `sourcesContent` becomes
/// `[file_content]`, whatever the map listed before. All other fields are
/// kept as they were.
pub fn prepare_source_map(
    source_map: &str,
    file_content: &str,
    source_map_path: &str,
) -> Result<Value> {
    let mut map: Map<String, Value> = serde_json::from_str(source_map)?;

    let previous = map.get("sources").and_then(Value::as_array).map_or(0, Vec::len);
    if previous > 1 {
        log::debug!(
            "collapsing {} sources of source map into {}",
            previous,
            source_map_path
        );
    }

    map.insert(
        "sourcesContent".to_string(),
        Value::Array(vec![Value::String(file_content.to_string())]),
    );
    map.insert(
        "sources".to_string(),
        Value::Array(vec![Value::String(source_map_path.to_string())]),
    );
    Ok(Value::Object(map))
}

/// A source map (revision 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
    /// Fields not covered above (e.g. `x_google_ignoreList`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SourceMap {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(Error::from)
    }

    /// Typed variant of [`prepare_source_map`].
    pub fn prepare(text: &str, file_content: &str, source_map_path: &str) -> Result<Self> {
        let mut map = Self::from_json(text)?;
        map.sources = vec![source_map_path.to_string()];
        map.sources_content = Some(vec![Some(file_content.to_string())]);
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }
}
