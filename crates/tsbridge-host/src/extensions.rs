//! File extension and separator rules.

/// Extensions stripped by [`remove_file_extension`], checked in order so
/// declaration extensions win over their plain counterparts.
pub const EXTENSIONS_TO_REMOVE: &[&str] = &[
    ".d.ts", ".d.mts", ".d.cts", ".mjs", ".mts", ".cjs", ".cts", ".ts", ".js", ".tsx", ".jsx",
    ".json",
];

/// Check if `path` ends with `extension` and has something before it.
pub fn file_extension_is(path: &str, extension: &str) -> bool {
    path.len() > extension.len() && path.ends_with(extension)
}

/// Remove the first recognized extension from `path`.
pub fn remove_file_extension(path: &str) -> &str {
    EXTENSIONS_TO_REMOVE
        .iter()
        .find(|ext| file_extension_is(path, ext))
        .map_or(path, |ext| &path[..path.len() - ext.len()])
}

/// Normalize path separators, converting `\` into `/`.
pub fn normalize_slashes(path: &str) -> String {
    if path.contains('\\') {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}
