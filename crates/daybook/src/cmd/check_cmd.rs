//! daybook check - Validate a draft entry file.
//!
//! Reads an entry draft as JSON and prints coded diagnostics. With
//! `--base-url` the ledger directory and book configuration come from the
//! API; without it the referenced ledgers are taken at face value, so only
//! the structural checks can fail.

use anyhow::{Context, Result};
use clap::Parser;
use daybook_client::Client;
use daybook_core::{BookConfig, EntryDraft, LedgerOption};
use daybook_entry::{has_errors, validate_draft, CheckError, LedgerDirectory};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Validate a draft entry file.
#[derive(Parser, Debug)]
pub struct Args {
    /// The draft entry JSON file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// API base URL used to resolve ledgers and the book configuration
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Run the check command.
pub fn run(args: &Args) -> Result<ExitCode> {
    debug!(file = %args.file.display(), "checking draft");
    let findings = collect_findings(args)?;

    let mut stdout = io::stdout().lock();
    for finding in &findings {
        match finding.line {
            Some(line) => writeln!(stdout, "{finding} (line {})", line + 1)?,
            None => writeln!(stdout, "{finding}")?,
        }
    }

    if has_errors(&findings) {
        Ok(ExitCode::from(1))
    } else {
        writeln!(stdout, "{}: ok", args.file.display())?;
        Ok(ExitCode::SUCCESS)
    }
}

fn collect_findings(args: &Args) -> Result<Vec<CheckError>> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let draft: EntryDraft = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid entry draft", args.file.display()))?;

    let (config, directory) = match &args.base_url {
        Some(url) => {
            let client = Client::new(url);
            let config = client.fetch_config().context("failed to fetch config")?;
            let directory = LedgerDirectory::new(
                client.ledger_list(None).context("failed to fetch ledgers")?,
            );
            (config, directory)
        }
        None => {
            let options = draft
                .lines
                .iter()
                .map(|line| LedgerOption {
                    id: line.ledger.id.clone(),
                    name: line.ledger.label.clone(),
                    disabled: false,
                })
                .collect();
            (BookConfig::default(), LedgerDirectory::new(options))
        }
    };

    Ok(validate_draft(&draft, &config, &directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_entry::CheckCode;

    fn draft_file(credit_amount: f64) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
              "number": null,
              "date": "2025-01-05",
              "tag": {{ "id": "t1", "title": "Receipt" }},
              "lines": [
                {{ "dc": "D", "ledger": {{ "id": "7", "label": "Cash" }}, "amount": 500.0, "narration": "" }},
                {{ "dc": "C", "ledger": {{ "id": "9", "label": "Sales" }}, "amount": {credit_amount}, "narration": "" }}
              ],
              "notes": ""
            }}"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["check", "draft.json"]).unwrap();
        assert_eq!(args.file, PathBuf::from("draft.json"));
        assert!(args.base_url.is_none());
    }

    #[test]
    fn test_offline_check_flags_an_unbalanced_draft() {
        let file = draft_file(499.0);
        let args = Args {
            file: file.path().to_path_buf(),
            base_url: None,
        };
        let findings = collect_findings(&args).unwrap();
        assert!(has_errors(&findings));
        assert!(findings.iter().any(|f| f.code == CheckCode::Unbalanced));
    }

    #[test]
    fn test_offline_check_passes_a_balanced_draft() {
        let file = draft_file(500.0);
        let args = Args {
            file: file.path().to_path_buf(),
            base_url: None,
        };
        let findings = collect_findings(&args).unwrap();
        assert!(!has_errors(&findings));
    }

    #[test]
    fn test_garbage_file_is_a_hard_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = Args {
            file: file.path().to_path_buf(),
            base_url: None,
        };
        assert!(collect_findings(&args).is_err());
    }
}
