//! daybook report - Fetch and render financial reports.
//!
//! All figures come from the API already computed; this command only
//! flattens the account trees into indented rows and lines the columns up.
//!
//! # Usage
//!
//! ```bash
//! daybook report trial-balance
//! daybook report balance-sheet --base-url http://localhost:8080/api
//! daybook report profit-loss
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_client::Client;
use daybook_core::Precision;
use daybook_report::{BalanceSheetReport, FlattenedRows, ProfitLossReport, TrialBalanceReport};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

const NAME_WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 14;

/// Fetch a report from the API and render it.
#[derive(Parser, Debug)]
pub struct Args {
    /// The report to fetch
    #[command(subcommand)]
    pub report: Report,

    /// API base URL
    #[arg(long, default_value = "http://localhost:8080/api")]
    pub base_url: String,
}

/// The available reports.
#[derive(Subcommand, Debug)]
pub enum Report {
    /// Ledger balances with debit and credit columns
    TrialBalance,
    /// Assets against liabilities, with profit and loss carried down
    BalanceSheet,
    /// Gross and net sections of the profit and loss statement
    ProfitLoss,
}

/// Run the report command.
pub fn run(args: &Args) -> Result<ExitCode> {
    debug!(base_url = %args.base_url, report = ?args.report, "fetching report");
    let client = Client::new(&args.base_url);
    let config = client.fetch_config().context("failed to fetch config")?;
    let precision = config.precision();

    let mut stdout = io::stdout().lock();
    match &args.report {
        Report::TrialBalance => {
            let report = client.trial_balance()?;
            render_trial_balance(&mut stdout, &report, precision)?;
        }
        Report::BalanceSheet => {
            let report = client.balance_sheet()?;
            render_balance_sheet(&mut stdout, &report, precision)?;
        }
        Report::ProfitLoss => {
            let report = client.profit_loss()?;
            render_profit_loss(&mut stdout, &report, precision)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn render_trial_balance(
    out: &mut impl Write,
    report: &TrialBalanceReport,
    precision: Precision,
) -> io::Result<()> {
    let prec = precision.places() as usize;
    if !report.title.is_empty() {
        writeln!(out, "{}", report.title)?;
    }
    if !report.subtitle.is_empty() {
        writeln!(out, "{}", report.subtitle)?;
    }
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$}",
        "Account", "Debits", "Credits"
    )?;
    for row in report.rows() {
        let name = indented(&row.node.name, row.indent);
        writeln!(
            out,
            "{name:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$} {:>AMOUNT_WIDTH$.prec$}",
            row.node.dr_total, row.node.cr_total
        )?;
    }
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$} {:>AMOUNT_WIDTH$.prec$}",
        "Total", report.dr_total, report.cr_total
    )?;
    if !report.balanced(precision) {
        writeln!(
            out,
            "warning: debit and credit totals differ by {:.prec$}",
            precision.sub(report.dr_total, report.cr_total).abs()
        )?;
    }
    Ok(())
}

fn render_balance_sheet(
    out: &mut impl Write,
    report: &BalanceSheetReport,
    precision: Precision,
) -> io::Result<()> {
    let prec = precision.places() as usize;

    render_section(out, "Assets", report.asset_rows(), prec)?;
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}",
        "  Profit & Loss", report.pandl
    )?;
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}",
        "Total Assets", report.final_assets_total
    )?;
    writeln!(out)?;

    render_section(out, "Liabilities & Owners' Equities", report.liability_rows(), prec)?;
    if report.is_opdiff {
        if let Some(opdiff) = &report.opdiff {
            writeln!(
                out,
                "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$} ({})",
                "  Opening difference", opdiff.opdiff_balance, opdiff.opdiff_balance_dc
            )?;
        }
    }
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}",
        "Total Liabilities", report.final_liabilities_total
    )?;
    Ok(())
}

fn render_profit_loss(
    out: &mut impl Write,
    report: &ProfitLossReport,
    precision: Precision,
) -> io::Result<()> {
    let prec = precision.places() as usize;

    render_section(out, "Expenses (Direct)", report.gross_expense_rows(), prec)?;
    render_section(out, "Incomes (Direct)", report.gross_income_rows(), prec)?;
    let gross_label = if report.gross_pl >= 0.0 {
        "Gross Profit"
    } else {
        "Gross Loss"
    };
    writeln!(
        out,
        "{gross_label:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}",
        report.gross_pl.abs()
    )?;
    writeln!(out)?;

    render_section(out, "Expenses (Indirect)", report.net_expense_rows(), prec)?;
    render_section(out, "Incomes (Indirect)", report.net_income_rows(), prec)?;
    let net_label = if report.net_pl >= 0.0 {
        "Net Profit"
    } else {
        "Net Loss"
    };
    writeln!(
        out,
        "{net_label:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}",
        report.net_pl.abs()
    )?;
    writeln!(
        out,
        "{:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$} {:>AMOUNT_WIDTH$.prec$}",
        "Column totals",
        report.net_expense_column_total(precision),
        report.net_income_column_total(precision)
    )?;
    Ok(())
}

/// One section of closing balances. Flagged rows carry a `!` marker: a
/// non-zero closing balance sitting on the side the section does not expect.
fn render_section(
    out: &mut impl Write,
    heading: &str,
    rows: FlattenedRows<'_>,
    prec: usize,
) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    for row in rows {
        let name = indented(&row.node.name, row.indent + 1);
        let marker = if row.flagged { " !" } else { "" };
        writeln!(
            out,
            "{name:<NAME_WIDTH$} {:>AMOUNT_WIDTH$.prec$}{marker}",
            row.node.cl_total
        )?;
    }
    Ok(())
}

fn indented(name: &str, indent: usize) -> String {
    format!("{}{name}", "  ".repeat(indent))
}
