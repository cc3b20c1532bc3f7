//! Normalize command - compiler file names to module paths

use anyhow::Result;
use clap::Args;
use tsbridge::{normalize_path, TsHost};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// File names as the compiler reports them
    #[arg(required = true)]
    pub paths: Vec<String>,
}

pub fn run(args: NormalizeArgs, format: OutputFormat) -> Result<()> {
    let host = TsHost::default();

    let normalized: Vec<String> = args
        .paths
        .iter()
        .map(|path| normalize_path(path, &host))
        .collect();

    match format {
        OutputFormat::Text => {
            for path in &normalized {
                println!("{}", path);
            }
        }
        OutputFormat::Json => {
            let pairs: Vec<_> = args
                .paths
                .iter()
                .zip(&normalized)
                .map(|(input, output)| serde_json::json!({ "input": input, "path": output }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&pairs)?);
        }
    }
    Ok(())
}
