//! Sourcemap command - point a source map at a single source file

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tsbridge::prepare_source_map;

#[derive(Args, Debug)]
pub struct SourcemapArgs {
    /// Source map produced by the compiler
    pub map: PathBuf,

    /// Source file whose content is embedded in the map
    #[arg(long)]
    pub source: PathBuf,

    /// Path recorded in `sources` (default: the --source argument)
    #[arg(long)]
    pub path: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Read the map and source and produce the rewritten map as JSON text.
fn prepare(map: &Path, source: &Path, recorded_path: Option<&str>) -> Result<String> {
    let map_text = fs::read_to_string(map)
        .with_context(|| format!("Could not read {}", map.display()))?;
    let content = fs::read_to_string(source)
        .with_context(|| format!("Could not read {}", source.display()))?;

    let recorded = match recorded_path {
        Some(path) => path.to_string(),
        None => source.to_string_lossy().replace('\\', "/"),
    };

    let prepared = prepare_source_map(&map_text, &content, &recorded)
        .with_context(|| format!("Invalid source map {}", map.display()))?;
    Ok(serde_json::to_string(&prepared)?)
}

pub fn run(args: SourcemapArgs, quiet: bool) -> Result<()> {
    let json = prepare(&args.map, &args.source, args.path.as_deref())?;

    match &args.output {
        Some(output) => {
            fs::write(output, &json)
                .with_context(|| format!("Could not write {}", output.display()))?;
            if !quiet {
                println!("Wrote {}", output.display());
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}
