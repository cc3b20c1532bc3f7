//! Refs command - prints what a file depends on

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tsbridge::{get_references, ReferenceSet, TsHost};
use tsbridge_parser::ModuleResolver;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct RefsArgs {
    /// TypeScript file to inspect
    pub file: PathBuf,
}

/// Parse and resolve one file and extract its references.
fn references(file: &Path) -> Result<ReferenceSet> {
    let parsed = tsbridge_parser::parse_file(file)?;
    let checked = ModuleResolver::new().resolve_source(parsed);
    Ok(get_references(&checked.unit, &TsHost::default()))
}

fn print_text(refs: &ReferenceSet) {
    for (label, entries) in [
        ("files", &refs.files),
        ("modules", &refs.modules),
        ("typings", &refs.typings),
    ] {
        println!("{}:", label);
        for entry in entries {
            println!("  {}", entry);
        }
    }
}

pub fn run(args: RefsArgs, format: OutputFormat) -> Result<()> {
    let refs = references(&args.file)?;
    match format {
        OutputFormat::Text => print_text(&refs),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&refs)?),
    }
    Ok(())
}
