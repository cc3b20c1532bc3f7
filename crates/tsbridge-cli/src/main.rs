//! tsbridge - TypeScript compiler output for build pipelines
//!
//! CLI driver for checking TypeScript sources and preparing compiler
//! output (normalized module paths, references, source maps).

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

/// TypeScript compiler adaptation layer
#[derive(Parser, Debug)]
#[command(name = "tsbridge")]
#[command(author, version, about = "Reshape TypeScript compiler output for build pipelines")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse and resolve TypeScript files, reporting diagnostics
    Check(commands::check::CheckArgs),

    /// Print the files, modules and typings a file depends on
    Refs(commands::refs::RefsArgs),

    /// Turn compiler file names into extensionless module paths
    Normalize(commands::normalize::NormalizeArgs),

    /// Point a source map at a single source file
    Sourcemap(commands::sourcemap::SourcemapArgs),
}

/// Default log filter for a verbosity level, used when RUST_LOG is unset.
fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose, cli.quiet)),
    )
    .init();

    // Determine if colors should be used
    let use_color = !cli.no_color && !cli.quiet && atty::is(atty::Stream::Stdout);

    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Check(args) => commands::check::run(args, cli.format, use_color, cli.quiet),
        Commands::Refs(args) => commands::refs::run(args, cli.format),
        Commands::Normalize(args) => commands::normalize::run(args, cli.format),
        Commands::Sourcemap(args) => commands::sourcemap::run(args, cli.quiet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(0, false), "warn");
        assert_eq!(log_filter(2, false), "debug");
        assert_eq!(log_filter(5, false), "trace");
        assert_eq!(log_filter(3, true), "error");
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::parse_from([
            "tsbridge",
            "--format",
            "json",
            "check",
            "src",
            "--exclude",
            "dist",
            "--exclude",
            "**/*.spec.ts",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.exclude, vec!["dist", "**/*.spec.ts"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
