//! Module resolution on the file system.
//!
//! Relative specifiers are looked up next to the importing file, bare
//! specifiers in the closest `node_modules` directories (including
//! `@types`). Resolution turns a [`ParsedSource`] into a [`CheckedSource`]:
//! the source unit gets its resolution map, and every import that could not
//! be resolved becomes a "Cannot find module" diagnostic.

use crate::{ParsedSource, SyntaxError};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tsbridge_diagnostics::{codes, DiagnosticRecord};
use tsbridge_host::normalize_slashes;
use tsbridge_types::{ResolvedModule, SourceUnit};

/// Extensions tried, in order, when a specifier has none.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts"];

/// JavaScript extensions that may stand in for their TypeScript source in a
/// specifier (`import './a.js'` finds `a.ts`).
const JS_EXTENSIONS: &[&str] = &[".js", ".jsx", ".mjs", ".cjs"];

/// A source unit after module resolution, with its diagnostics.
#[derive(Debug, Clone)]
pub struct CheckedSource {
    pub unit: Arc<SourceUnit>,
    pub syntactic: Vec<DiagnosticRecord>,
    pub semantic: Vec<DiagnosticRecord>,
}

/// Resolves module specifiers against the file system.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    extensions: Vec<String>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }

    /// Use a custom extension list; entries are tried in order.
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Resolve one specifier imported from `containing_file`.
    pub fn resolve(&self, specifier: &str, containing_file: &Path) -> Option<ResolvedModule> {
        let dir = containing_file.parent().unwrap_or(Path::new(""));

        let resolved = if is_relative(specifier) || Path::new(specifier).is_absolute() {
            self.load_as_file_or_directory(&dir.join(specifier))
        } else {
            self.load_from_node_modules(specifier, dir)
        }?;

        let file_name = normalize_slashes(&resolved.to_string_lossy());
        let extension = self
            .extensions
            .iter()
            .filter(|ext| file_name.ends_with(ext.as_str()))
            .max_by_key(|ext| ext.len())
            .cloned();
        Some(ResolvedModule {
            is_external_library_import: file_name.contains("/node_modules/")
                || file_name.starts_with("node_modules/"),
            resolved_file_name: Some(file_name),
            extension,
        })
    }

    /// Resolve every import of a parsed file and build its diagnostics.
    pub fn resolve_source(&self, parsed: ParsedSource) -> CheckedSource {
        let ParsedSource {
            mut unit,
            imports,
            syntax_errors,
        } = parsed;
        let containing_file = PathBuf::from(&unit.file_name);

        let mut modules: IndexMap<String, Option<ResolvedModule>> = IndexMap::new();
        let mut unresolved = Vec::new();
        for import in &imports {
            if modules.contains_key(&import.text) {
                continue;
            }
            let resolved = self.resolve(&import.text, &containing_file);
            match &resolved {
                Some(module) => log::trace!(
                    "{}: '{}' -> {:?}",
                    unit.file_name,
                    import.text,
                    module.resolved_file_name
                ),
                None if is_ambient_builtin(&import.text, &containing_file) => {
                    log::trace!("{}: '{}' is a node builtin", unit.file_name, import.text)
                }
                None => unresolved.push(import),
            }
            modules.insert(import.text.clone(), resolved);
        }
        unit.resolved_modules = Some(modules);

        let dir = containing_file.parent().unwrap_or(Path::new("")).to_path_buf();
        let missing_references: Vec<_> = unit
            .referenced_files
            .iter()
            .flatten()
            .filter_map(|reference| {
                let target = dir.join(&reference.file_name);
                if target.is_file() {
                    None
                } else {
                    Some((reference.clone(), target))
                }
            })
            .collect();

        let unit = Arc::new(unit);

        let syntactic = syntax_errors
            .into_iter()
            .map(|SyntaxError { message, start, end }| {
                DiagnosticRecord::error(codes::SYNTAX_ERROR, message)
                    .in_file(unit.clone(), start, end.saturating_sub(start))
                    .build()
            })
            .collect();

        let mut semantic = Vec::new();
        for import in unresolved {
            let message =
                codes::diagnostic_message(codes::CANNOT_FIND_MODULE, &[import.text.as_str()]);
            semantic.push(
                DiagnosticRecord::error(codes::CANNOT_FIND_MODULE, message)
                    .in_file(unit.clone(), import.start, import.end - import.start)
                    .build(),
            );
        }
        for (reference, target) in missing_references {
            let target = normalize_slashes(&target.to_string_lossy());
            let message = codes::diagnostic_message(codes::FILE_NOT_FOUND, &[target.as_str()]);
            semantic.push(
                DiagnosticRecord::error(codes::FILE_NOT_FOUND, message)
                    .in_file(unit.clone(), reference.pos, reference.end - reference.pos)
                    .build(),
            );
        }

        log::debug!(
            "resolved {}: {} module(s), {} unresolved",
            unit.file_name,
            unit.resolved_modules.as_ref().map_or(0, IndexMap::len),
            semantic
                .iter()
                .filter(|d| d.code == codes::CANNOT_FIND_MODULE)
                .count()
        );

        CheckedSource {
            unit,
            syntactic,
            semantic,
        }
    }

    fn load_as_file_or_directory(&self, candidate: &Path) -> Option<PathBuf> {
        self.load_as_file(candidate)
            .or_else(|| self.load_as_directory(candidate))
    }

    fn load_as_file(&self, candidate: &Path) -> Option<PathBuf> {
        let path_text = candidate.to_string_lossy();
        let path: &str = &path_text;

        // Exact file with a known extension
        if self.extensions.iter().any(|ext| path.ends_with(ext.as_str())) && candidate.is_file() {
            return Some(candidate.to_path_buf());
        }

        // './a.js' may refer to 'a.ts'
        let stem = JS_EXTENSIONS
            .iter()
            .find_map(|ext| path.strip_suffix(ext))
            .unwrap_or(path);

        self.extensions
            .iter()
            .map(|ext| PathBuf::from(format!("{}{}", stem, ext)))
            .find(|p| p.is_file())
    }

    fn load_as_directory(&self, dir: &Path) -> Option<PathBuf> {
        if !dir.is_dir() {
            return None;
        }

        if let Some(entry) = package_entry(dir) {
            let entry = dir.join(entry);
            if let Some(found) = self.load_as_file(&entry) {
                return Some(found);
            }
            if entry.is_dir() {
                if let Some(found) = self.load_as_file(&entry.join("index")) {
                    return Some(found);
                }
            }
        }

        self.load_as_file(&dir.join("index"))
    }

    fn load_from_node_modules(&self, specifier: &str, from_dir: &Path) -> Option<PathBuf> {
        let (package, subpath) = split_package_name(specifier);
        let types_package = types_package_name(package);

        for dir in from_dir.ancestors() {
            let node_modules = dir.join("node_modules");
            if !node_modules.is_dir() {
                continue;
            }

            let package_dir = node_modules.join(package);
            let found = match subpath {
                Some(sub) => self.load_as_file_or_directory(&package_dir.join(sub)),
                None => self.load_as_file_or_directory(&package_dir),
            };
            if found.is_some() {
                return found;
            }

            let types_dir = node_modules.join("@types").join(&types_package);
            let found = match subpath {
                Some(sub) => self.load_as_file_or_directory(&types_dir.join(sub)),
                None => self.load_as_file_or_directory(&types_dir),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

impl Default for ModuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Entry point named by a package.json, if any.
fn package_entry(dir: &Path) -> Option<String> {
    let text = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let json: serde_json::Value = match serde_json::from_str(&text) {
        Ok(json) => json,
        Err(e) => {
            log::debug!("ignoring invalid package.json in {}: {}", dir.display(), e);
            return None;
        }
    };

    ["types", "typings", "main"]
        .iter()
        .find_map(|field| json.get(*field)?.as_str())
        .map(str::to_string)
}

/// Split `@scope/pkg/sub/path` into (`@scope/pkg`, `Some("sub/path")`).
fn split_package_name(specifier: &str) -> (&str, Option<&str>) {
    let name_segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut split_at = None;
    for (count, (idx, _)) in specifier.match_indices('/').enumerate() {
        if count + 1 == name_segments {
            split_at = Some(idx);
            break;
        }
    }
    match split_at {
        Some(idx) => (&specifier[..idx], Some(&specifier[idx + 1..])),
        None => (specifier, None),
    }
}

/// `@types` directory name for a package: `@scope/pkg` -> `scope__pkg`.
fn types_package_name(package: &str) -> String {
    match package.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => package.to_string(),
    }
}

/// Node.js built-in modules
fn is_node_builtin(name: &str) -> bool {
    let builtins = [
        "assert", "buffer", "child_process", "cluster", "console", "constants",
        "crypto", "dgram", "dns", "domain", "events", "fs", "http", "https",
        "module", "net", "os", "path", "perf_hooks", "process", "punycode",
        "querystring", "readline", "repl", "stream", "string_decoder", "sys",
        "timers", "tls", "tty", "url", "util", "v8", "vm", "worker_threads",
        "zlib",
    ];

    let base = name.split('/').next().unwrap_or(name);
    let base = base.strip_prefix("node:").unwrap_or(base);
    builtins.contains(&base)
}

/// Built-ins have no file of their own; `@types/node` declares them as
/// ambient modules, so they are fine whenever that package is installed.
fn is_ambient_builtin(specifier: &str, containing_file: &Path) -> bool {
    if !is_node_builtin(specifier) {
        return false;
    }
    containing_file
        .parent()
        .unwrap_or(Path::new(""))
        .ancestors()
        .any(|dir| dir.join("node_modules/@types/node").is_dir())
}
