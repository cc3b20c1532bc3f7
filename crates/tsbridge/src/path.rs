//! File name normalization and classification.

use tsbridge_host::{file_extension_is, normalize_slashes, PathClassifier};

const SOURCE_MAP_EXTENSION: &str = ".map";
const TYPINGS_EXTENSION: &str = ".d.ts";

/// Turn a compiler file name into a module path: drop a trailing `.map`,
/// use forward slashes, drop the source extension.
///
/// `src\app.ts.map` and `src/app.ts` both become `src/app`.
pub fn normalize_path(path: &str, classifier: &impl PathClassifier) -> String {
    let path = if is_source_map(path) {
        &path[..path.len() - SOURCE_MAP_EXTENSION.len()]
    } else {
        path
    };
    let path = normalize_slashes(path);
    classifier.remove_file_extension(&path).to_string()
}

/// Check if a file name is a source map.
pub fn is_source_map(file_name: &str) -> bool {
    file_extension_is(file_name, SOURCE_MAP_EXTENSION)
}

/// Check if a file name is a declaration file.
pub fn is_typings(file_name: &str) -> bool {
    file_extension_is(file_name, TYPINGS_EXTENSION)
}
