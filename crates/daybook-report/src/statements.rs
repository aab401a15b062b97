//! Report envelopes as returned by the reporting endpoints.
//!
//! All figures inside the envelopes are computed server-side; the types here
//! only deserialize them and apply the presentation totaling rules (which
//! column a gross profit or loss is carried down into, and so on) through
//! fixed-point arithmetic.

use daybook_core::{AccountNode, Dc, Precision};
use serde::{Deserialize, Serialize};

use crate::flatten::{flatten, flatten_for_side, FlattenedRows};

/// The trial balance response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report title.
    #[serde(default)]
    pub title: String,
    /// Report subtitle (usually the period).
    #[serde(default)]
    pub subtitle: String,
    /// The full chart of accounts with opening/period/closing figures.
    pub accountlist: AccountNode,
    /// Grand total of debit postings.
    pub dr_total: f64,
    /// Grand total of credit postings.
    pub cr_total: f64,
}

impl TrialBalanceReport {
    /// The flattened display rows.
    #[must_use]
    pub fn rows(&self) -> FlattenedRows<'_> {
        flatten(&self.accountlist)
    }

    /// Whether the grand totals agree at the given precision.
    #[must_use]
    pub fn balanced(&self, precision: Precision) -> bool {
        precision.sub(self.dr_total, self.cr_total) == 0.0
    }
}

/// An opening-balance difference reported alongside the balance sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningDifference {
    /// The difference amount.
    pub opdiff_balance: f64,
    /// Which side the difference falls on.
    pub opdiff_balance_dc: Dc,
}

/// The balance sheet response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Asset accounts; rows here are expected to close on the debit side.
    pub assets: AccountNode,
    /// Liability and equity accounts; expected to close on the credit side.
    pub liabilities: AccountNode,
    /// Total of the assets column.
    pub assets_total: f64,
    /// Total of the liabilities column.
    pub liabilities_total: f64,
    /// Current profit (positive) or loss (negative) carried into assets.
    #[serde(default)]
    pub pandl: f64,
    /// Assets column total after carrying profit and loss.
    pub final_assets_total: f64,
    /// Liabilities column total after the opening difference, if any.
    pub final_liabilities_total: f64,
    /// Whether an opening difference was detected.
    #[serde(default)]
    pub is_opdiff: bool,
    /// The opening difference, present when `is_opdiff` is set.
    #[serde(default)]
    pub opdiff: Option<OpeningDifference>,
}

impl BalanceSheetReport {
    /// Asset rows, flagged when a non-zero closing balance sits on the
    /// credit side.
    #[must_use]
    pub fn asset_rows(&self) -> FlattenedRows<'_> {
        flatten_for_side(&self.assets, Dc::Debit)
    }

    /// Liability rows, flagged when a non-zero closing balance sits on the
    /// debit side.
    #[must_use]
    pub fn liability_rows(&self) -> FlattenedRows<'_> {
        flatten_for_side(&self.liabilities, Dc::Credit)
    }
}

/// The profit and loss response: gross sections above the line, net
/// sections below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossReport {
    /// Direct expense accounts.
    pub gross_expenses: AccountNode,
    /// Direct income accounts.
    pub gross_incomes: AccountNode,
    /// Total of the gross expenses section.
    pub gross_expense_total: f64,
    /// Total of the gross incomes section.
    pub gross_income_total: f64,
    /// Gross profit (positive) or gross loss (negative).
    pub gross_pl: f64,
    /// Indirect expense accounts.
    pub net_expenses: AccountNode,
    /// Indirect income accounts.
    pub net_incomes: AccountNode,
    /// Total of the net expenses section.
    pub net_expense_total: f64,
    /// Total of the net incomes section.
    pub net_income_total: f64,
    /// Net profit (positive) or net loss (negative).
    pub net_pl: f64,
}

impl ProfitLossReport {
    /// Rows of the gross expenses section.
    #[must_use]
    pub fn gross_expense_rows(&self) -> FlattenedRows<'_> {
        flatten(&self.gross_expenses)
    }

    /// Rows of the gross incomes section.
    #[must_use]
    pub fn gross_income_rows(&self) -> FlattenedRows<'_> {
        flatten(&self.gross_incomes)
    }

    /// Rows of the net expenses section.
    #[must_use]
    pub fn net_expense_rows(&self) -> FlattenedRows<'_> {
        flatten(&self.net_expenses)
    }

    /// Rows of the net incomes section.
    #[must_use]
    pub fn net_income_rows(&self) -> FlattenedRows<'_> {
        flatten(&self.net_incomes)
    }

    /// Column total for gross expenses: a gross profit is carried down on
    /// this side to make the two columns agree.
    #[must_use]
    pub fn gross_expense_column_total(&self, precision: Precision) -> f64 {
        if self.gross_pl >= 0.0 {
            precision.add(self.gross_expense_total, self.gross_pl)
        } else {
            precision.quantize(self.gross_expense_total)
        }
    }

    /// Column total for gross incomes: a gross loss is carried down on this
    /// side.
    #[must_use]
    pub fn gross_income_column_total(&self, precision: Precision) -> f64 {
        if self.gross_pl < 0.0 {
            precision.add(self.gross_income_total, self.gross_pl.abs())
        } else {
            precision.quantize(self.gross_income_total)
        }
    }

    /// Column total for net expenses: gross loss brought down plus net
    /// profit, when present.
    #[must_use]
    pub fn net_expense_column_total(&self, precision: Precision) -> f64 {
        let mut total = precision.quantize(self.net_expense_total);
        if self.gross_pl < 0.0 {
            total = precision.add(total, self.gross_pl.abs());
        }
        if self.net_pl >= 0.0 {
            total = precision.add(total, self.net_pl);
        }
        total
    }

    /// Column total for net incomes: gross profit brought down plus net
    /// loss, when present.
    #[must_use]
    pub fn net_income_column_total(&self, precision: Precision) -> f64 {
        let mut total = precision.quantize(self.net_income_total);
        if self.gross_pl >= 0.0 {
            total = precision.add(total, self.gross_pl);
        }
        if self.net_pl < 0.0 {
            total = precision.add(total, self.net_pl.abs());
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::NodeKind;

    fn leaf(id: &str, code: &str, cl_total: f64, cl_dc: Dc) -> AccountNode {
        AccountNode {
            id: Some(id.to_string()),
            code: code.to_string(),
            name: format!("Account {code}"),
            kind: NodeKind::Ledger,
            op_total: 0.0,
            op_total_dc: Dc::Debit,
            dr_total: 0.0,
            cr_total: 0.0,
            cl_total,
            cl_total_dc: cl_dc,
            children_groups: Vec::new(),
            children_ledgers: Vec::new(),
        }
    }

    fn root(ledgers: Vec<AccountNode>) -> AccountNode {
        AccountNode {
            id: None,
            code: String::new(),
            name: String::new(),
            kind: NodeKind::Group,
            op_total: 0.0,
            op_total_dc: Dc::Debit,
            dr_total: 0.0,
            cr_total: 0.0,
            cl_total: 0.0,
            cl_total_dc: Dc::Debit,
            children_groups: Vec::new(),
            children_ledgers: ledgers,
        }
    }

    #[test]
    fn test_trial_balance_balanced_flag() {
        let report = TrialBalanceReport {
            title: "Trial Balance".to_string(),
            subtitle: String::new(),
            accountlist: root(vec![]),
            dr_total: 1000.00,
            cr_total: 1000.00,
        };
        assert!(report.balanced(Precision::CENTS));

        let off = TrialBalanceReport {
            cr_total: 999.99,
            ..report
        };
        assert!(!off.balanced(Precision::CENTS));
    }

    #[test]
    fn test_balance_sheet_flags_per_column() {
        let report = BalanceSheetReport {
            assets: root(vec![leaf("a", "1100", 50.0, Dc::Credit)]),
            liabilities: root(vec![leaf("b", "2100", 50.0, Dc::Credit)]),
            assets_total: 50.0,
            liabilities_total: 50.0,
            pandl: 0.0,
            final_assets_total: 50.0,
            final_liabilities_total: 50.0,
            is_opdiff: false,
            opdiff: None,
        };
        // Credit-closing asset is wrong, credit-closing liability is fine.
        assert!(report.asset_rows().next().unwrap().flagged);
        assert!(!report.liability_rows().next().unwrap().flagged);
    }

    fn pl_report(gross_pl: f64, net_pl: f64) -> ProfitLossReport {
        ProfitLossReport {
            gross_expenses: root(vec![]),
            gross_incomes: root(vec![]),
            gross_expense_total: 400.0,
            gross_income_total: 500.0,
            gross_pl,
            net_expenses: root(vec![]),
            net_incomes: root(vec![]),
            net_expense_total: 80.0,
            net_income_total: 30.0,
            net_pl,
        }
    }

    #[test]
    fn test_profit_columns_agree_under_gross_profit() {
        // income 500 vs expense 400: gross profit 100 carried to expenses
        let report = pl_report(100.0, 50.0);
        let p = Precision::CENTS;
        assert_eq!(report.gross_expense_column_total(p), 500.0);
        assert_eq!(report.gross_income_column_total(p), 500.0);
        // net side: incomes 30 + gross profit b/d 100 = expenses 80 + net profit 50
        assert_eq!(report.net_expense_column_total(p), 130.0);
        assert_eq!(report.net_income_column_total(p), 130.0);
    }

    #[test]
    fn test_loss_carried_to_income_side() {
        let mut report = pl_report(-100.0, -150.0);
        report.gross_expense_total = 600.0;
        report.gross_income_total = 500.0;
        let p = Precision::CENTS;
        assert_eq!(report.gross_expense_column_total(p), 600.0);
        assert_eq!(report.gross_income_column_total(p), 600.0);
        // net side: expenses 80 + gross loss b/d 100 = incomes 30 + net loss 150
        assert_eq!(report.net_expense_column_total(p), 180.0);
        assert_eq!(report.net_income_column_total(p), 180.0);
    }

    #[test]
    fn test_envelope_deserializes() {
        let json = r#"{
            "title": "Trial Balance",
            "subtitle": "FY 2025",
            "accountlist": {"id": null, "kind": "group",
                "children_ledgers": [{
                    "id": "7", "code": "1100", "name": "Cash", "kind": "ledger",
                    "cl_total": 650.0, "cl_total_dc": "D"
                }]},
            "dr_total": 650.0,
            "cr_total": 650.0
        }"#;
        let report: TrialBalanceReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.rows().count(), 1);
        assert!(report.balanced(Precision::CENTS));
    }
}
