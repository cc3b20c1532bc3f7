//! Check command - parses and resolves TypeScript files, reporting diagnostics

use anyhow::{anyhow, Result};
use clap::Args;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tsbridge::{create_diagnostics, exclude_regex_in, DiagnosticsReport, SourceUnit, TsHost};
use tsbridge_diagnostics::{
    DiagnosticEmitter, JsonEmitter, SimpleEmitter, SourceCache, Summary, TerminalEmitter,
};
use tsbridge_host::normalize_slashes;
use tsbridge_parser::ModuleResolver;
use walkdir::WalkDir;

use crate::config::Config;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input TypeScript file or directory
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Configuration file (default: tsbridge.toml in the project root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip files matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Also check declaration files (.d.ts)
    #[arg(long)]
    pub strict: bool,

    /// Match exclude patterns case-insensitively
    #[arg(long)]
    pub ignore_case: bool,
}

/// Collect the TypeScript files under `path` that are not excluded.
fn collect_ts_files(
    path: &Path,
    include_declarations: bool,
    exclude: Option<&Regex>,
) -> Vec<PathBuf> {
    let wanted = |p: &Path| {
        let name = normalize_slashes(&p.to_string_lossy());
        let is_ts = name.ends_with(".ts") || name.ends_with(".tsx");
        let is_declaration = tsbridge::is_typings(&name);
        is_ts
            && (include_declarations || !is_declaration)
            && !exclude.map_or(false, |re| re.is_match(&name))
    };

    if path.is_file() {
        return if wanted(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && wanted(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Parse, resolve and flatten the diagnostics of one file.
fn check_file(
    path: &Path,
    resolver: &ModuleResolver,
    host: &TsHost,
) -> Result<(Arc<SourceUnit>, DiagnosticsReport)> {
    let parsed = tsbridge_parser::parse_file(path)?;
    let checked = resolver.resolve_source(parsed);
    let report = create_diagnostics(&checked.syntactic, &checked.semantic, host);
    Ok((checked.unit, report))
}

fn project_root(input: &Path) -> PathBuf {
    let dir = if input.is_file() {
        input.parent().unwrap_or(input)
    } else {
        input
    };
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

pub fn run(args: CheckArgs, format: OutputFormat, use_color: bool, quiet: bool) -> Result<()> {
    let project_root = project_root(&args.input);
    let config = Config::load(args.config.as_deref(), &project_root)?;

    let strict = args.strict || config.check.strict;
    let mut patterns = config.check.exclude;
    patterns.extend(args.exclude);

    let host = if args.ignore_case {
        TsHost::new().case_insensitive()
    } else {
        TsHost::new()
    };
    let base = normalize_slashes(&project_root.to_string_lossy());
    let exclude = exclude_regex_in(&patterns, &base, &host)?;

    let resolver = if config.resolve.extensions.is_empty() {
        ModuleResolver::new()
    } else {
        ModuleResolver::with_extensions(config.resolve.extensions)
    };

    let input = if args.input.is_file() {
        args.input.canonicalize().unwrap_or(args.input)
    } else {
        project_root.clone()
    };
    let files = collect_ts_files(&input, strict, exclude.as_ref());

    if files.is_empty() {
        match format {
            OutputFormat::Text => {
                if !quiet {
                    println!("No TypeScript files found.");
                }
            }
            OutputFormat::Json => {
                let mut emitter = JsonEmitter::new(std::io::stdout().lock());
                emitter.emit_summary(&Summary::default())?;
            }
        }
        return Ok(());
    }

    if matches!(format, OutputFormat::Text) && !quiet {
        println!("Checking {} file(s)...", files.len());
    }

    let mut emitter: Box<dyn DiagnosticEmitter> = match format {
        OutputFormat::Json => Box::new(JsonEmitter::new(std::io::stdout().lock())),
        OutputFormat::Text if quiet => Box::new(SimpleEmitter::new(std::io::stderr().lock())),
        OutputFormat::Text => Box::new(TerminalEmitter::new(std::io::stderr().lock(), use_color)),
    };

    let mut source_cache = SourceCache::new();
    let mut summary = Summary::default();
    let mut visited = HashSet::new();

    for file in &files {
        let canonical = file.canonicalize().unwrap_or_else(|_| file.clone());
        if !visited.insert(canonical.clone()) {
            continue;
        }

        let (unit, report) = match check_file(&canonical, &resolver, &host) {
            Ok(checked) => checked,
            Err(e) => {
                log::error!("{:#}", e);
                summary.add_missing();
                continue;
            }
        };
        source_cache.add(unit);
        summary.add(&report);
        emitter.emit_all(&report, &source_cache)?;
    }

    emitter.emit_summary(&summary)?;

    if summary.has_errors() {
        Err(anyhow!("Check failed with errors"))
    } else {
        Ok(())
    }
}
