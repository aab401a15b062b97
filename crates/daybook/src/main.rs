//! The `daybook` binary: one entry point dispatching to the subcommands.

use clap::{Parser, Subcommand};
use daybook::cmd::{check_cmd, import_cmd, report_cmd};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line front end for the daybook double-entry journal.
#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import journal entries from a CSV file
    Import(import_cmd::Args),
    /// Fetch a report from the API and render it
    Report(report_cmd::Args),
    /// Validate a draft entry file
    Check(check_cmd::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let result = match &cli.command {
        Command::Import(args) => import_cmd::run(args),
        Command::Report(args) => report_cmd::run(args),
        Command::Check(args) => check_cmd::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
