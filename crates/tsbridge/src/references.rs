use tsbridge_host::PathClassifier;
use tsbridge_types::{ReferenceSet, SourceUnit};

/// Collect what a source unit depends on.
///
/// `modules` lists the files its imports resolved to, in import order;
/// unresolved imports are left out. Referenced files are split into
/// declaration files (`typings`) and everything else (`files`).
pub fn get_references(unit: &SourceUnit, classifier: &impl PathClassifier) -> ReferenceSet {
    let modules: Vec<String> = unit
        .resolved_modules
        .iter()
        .flatten()
        .filter_map(|(_, resolved)| resolved.as_ref()?.resolved_file_name.clone())
        .filter(|name| !name.is_empty())
        .collect();

    let (typings, files): (Vec<String>, Vec<String>) = unit
        .referenced_files
        .iter()
        .flatten()
        .map(|reference| reference.file_name.clone())
        .partition(|name| classifier.is_typings(name));

    log::trace!(
        "{}: {} module(s), {} file(s), {} typing(s)",
        unit.file_name,
        modules.len(),
        files.len(),
        typings.len()
    );

    ReferenceSet {
        files,
        modules,
        typings,
    }
}
