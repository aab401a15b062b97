//! daybook import - Group a CSV file into journal entries.
//!
//! Columns whose headers already match the logical field names are mapped
//! automatically; everything else is supplied with `--map field=Header`.
//! Without `--submit` the grouped entries are printed as a preview; with it
//! they are posted to the API one atomic create call per entry.

use anyhow::{Context, Result};
use clap::Parser;
use daybook_client::Client;
use daybook_entry::LedgerDirectory;
use daybook_importer::{CsvImport, FieldMapping, ImportResult, ImportedEntry};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Import journal entries from a CSV file.
#[derive(Parser, Debug)]
pub struct Args {
    /// The CSV file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Map a logical field to a CSV header, e.g. --map entry_date="Posting Date"
    #[arg(long = "map", value_name = "FIELD=HEADER")]
    pub map: Vec<String>,

    /// Date format of the file (chrono strftime syntax)
    #[arg(long, default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// API base URL
    #[arg(long, default_value = "http://localhost:8080/api")]
    pub base_url: String,

    /// Submit the imported entries instead of previewing them
    #[arg(long)]
    pub submit: bool,
}

/// Run the import command.
pub fn run(args: &Args) -> Result<ExitCode> {
    debug!(file = %args.file.display(), submit = args.submit, "importing");
    let mapping = build_mapping(args)?;
    let mut import = CsvImport::new(mapping).with_date_format(&args.date_format);

    let client = args.submit.then(|| Client::new(&args.base_url));
    if let Some(client) = &client {
        // Group and balance at the book's precision, not the default.
        let config = client.fetch_config().context("failed to fetch config")?;
        import = import.with_precision(config.precision());
    }

    let result = import
        .extract_file(&args.file)
        .with_context(|| format!("failed to import {}", args.file.display()))?;
    debug!(
        entries = result.entries.len(),
        issues = result.issues.len(),
        "grouped"
    );

    let mut stdout = io::stdout().lock();
    print_preview(&mut stdout, &result)?;

    for issue in &result.issues {
        eprintln!("skipped {}: {}", issue.reference, issue.message);
    }

    let mut failed = result.issues.len();
    if let Some(client) = &client {
        let directory = LedgerDirectory::new(
            client.ledger_list(None).context("failed to fetch ledgers")?,
        );
        let (payloads, rejects) = resolve_for_submit(&result.entries, &directory);
        for (reference, reason) in &rejects {
            failed += 1;
            eprintln!("rejected {reference}: {reason}");
        }

        let mut created = 0usize;
        for (reference, payload) in &payloads {
            match client.create_entry(payload) {
                Ok(_) => created += 1,
                Err(e) => {
                    failed += 1;
                    eprintln!("rejected {reference}: {e}");
                }
            }
        }
        writeln!(stdout, "created {created} of {} entries", result.entries.len())?;
    }

    if failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolve each entry's ledger codes through the lookup directory. Entries
/// with an unknown or disabled code are rejected with a reason instead of
/// being submitted with a raw code standing in for the ledger id.
fn resolve_for_submit(
    entries: &[ImportedEntry],
    directory: &LedgerDirectory,
) -> (
    Vec<(String, daybook_core::EntryPayload)>,
    Vec<(String, String)>,
) {
    let mut payloads = Vec::new();
    let mut rejects = Vec::new();
    for entry in entries {
        match entry.resolve_payload(directory) {
            Ok(payload) => payloads.push((entry.reference.clone(), payload)),
            Err(e) => rejects.push((entry.reference.clone(), e.to_string())),
        }
    }
    (payloads, rejects)
}

/// Auto-match the file's headers, then apply the `--map` overrides.
fn build_mapping(args: &Args) -> Result<FieldMapping> {
    let mut reader = csv::ReaderBuilder::new()
        .from_path(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let headers: Vec<String> = reader.headers()?.iter().map(ToString::to_string).collect();

    let mut builder = FieldMapping::auto_match(&headers);
    for pair in &args.map {
        let (field, header) = pair
            .split_once('=')
            .with_context(|| format!("expected FIELD=HEADER, got {pair:?}"))?;
        builder = builder.set(field, header)?;
    }
    Ok(builder.build()?)
}

fn print_preview(out: &mut impl Write, result: &ImportResult) -> io::Result<()> {
    for entry in &result.entries {
        writeln!(
            out,
            "{} {} {} ({} items)",
            entry.reference,
            entry.date,
            entry.entry_type,
            entry.items.len()
        )?;
        for item in &entry.items {
            writeln!(
                out,
                "  {} {:<24} {:>12.2}  {}",
                item.dc, item.ledger_code, item.amount, item.narration
            )?;
        }
    }
    Ok(())
}
