//! The chart-of-accounts report tree.
//!
//! Report endpoints return a nested tree of groups and ledgers with opening,
//! period, and closing figures already computed server-side. The tree is
//! deserialized fresh on every fetch, treated as immutable for the duration
//! of a render pass, and discarded on the next fetch.

use crate::Dc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a node aggregates children or receives postings directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A non-leaf node aggregating child groups and ledgers.
    Group,
    /// A leaf account that postings reference.
    Ledger,
}

/// A ledger or group in the chart of accounts, with report figures.
///
/// All amounts are non-negative; the side each balance falls on is carried
/// separately as a [`Dc`]. A group's closing balance is the net of all
/// descendant ledgers reachable through it, as computed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    /// Identifier; the synthetic root of a report tree carries none and is
    /// not rendered as a row.
    pub id: Option<String>,
    /// Account code, e.g. `"1100"`.
    #[serde(default)]
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Group or ledger.
    pub kind: NodeKind,
    /// Opening balance amount.
    #[serde(default)]
    pub op_total: f64,
    /// Side of the opening balance.
    #[serde(default = "default_dc")]
    pub op_total_dc: Dc,
    /// Total of debit postings in the period.
    #[serde(default)]
    pub dr_total: f64,
    /// Total of credit postings in the period.
    #[serde(default)]
    pub cr_total: f64,
    /// Closing balance amount.
    #[serde(default)]
    pub cl_total: f64,
    /// Side of the closing balance.
    #[serde(default = "default_dc")]
    pub cl_total_dc: Dc,
    /// Child groups, in the order the API returned them.
    #[serde(default)]
    pub children_groups: Vec<AccountNode>,
    /// Child ledgers belonging to this node, in API order.
    #[serde(default)]
    pub children_ledgers: Vec<AccountNode>,
}

const fn default_dc() -> Dc {
    Dc::Debit
}

impl AccountNode {
    /// Check whether this node has no children at all.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children_groups.is_empty() && self.children_ledgers.is_empty()
    }

    /// The closing balance as a `(side, amount)` pair.
    #[must_use]
    pub fn closing(&self) -> (Dc, f64) {
        (self.cl_total_dc, self.cl_total)
    }

    /// The opening balance as a `(side, amount)` pair.
    #[must_use]
    pub fn opening(&self) -> (Dc, f64) {
        (self.op_total_dc, self.op_total)
    }

    /// Validate the structural invariants of the tree.
    ///
    /// A ledger node must not carry children of either kind. Walks the whole
    /// tree and reports the first violation.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.kind == NodeKind::Ledger && !self.is_leaf() {
            return Err(TreeError::LedgerWithChildren {
                code: self.code.clone(),
            });
        }
        for child in self.children_groups.iter().chain(&self.children_ledgers) {
            child.validate()?;
        }
        Ok(())
    }
}

/// Structural violation in a fetched account tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node marked as a ledger carries children.
    #[error("ledger {code:?} has children; only groups may aggregate")]
    LedgerWithChildren {
        /// Account code of the offending node.
        code: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(id: &str, code: &str) -> AccountNode {
        AccountNode {
            id: Some(id.to_string()),
            code: code.to_string(),
            name: format!("Ledger {code}"),
            kind: NodeKind::Ledger,
            op_total: 0.0,
            op_total_dc: Dc::Debit,
            dr_total: 0.0,
            cr_total: 0.0,
            cl_total: 0.0,
            cl_total_dc: Dc::Debit,
            children_groups: Vec::new(),
            children_ledgers: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_leaf_ledgers() {
        let mut root = ledger("1", "1000");
        root.kind = NodeKind::Group;
        root.children_ledgers.push(ledger("2", "1100"));
        assert!(root.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_ledger_with_children() {
        let mut bad = ledger("1", "1000");
        bad.children_ledgers.push(ledger("2", "1100"));
        assert_eq!(
            bad.validate(),
            Err(TreeError::LedgerWithChildren {
                code: "1000".to_string()
            })
        );
    }

    #[test]
    fn test_deserialize_report_node() {
        let json = r#"{
            "id": "7",
            "code": "1100",
            "name": "Cash",
            "kind": "ledger",
            "op_total": 250.00,
            "op_total_dc": "D",
            "dr_total": 500.00,
            "cr_total": 100.00,
            "cl_total": 650.00,
            "cl_total_dc": "D"
        }"#;
        let node: AccountNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Ledger);
        assert_eq!(node.closing(), (Dc::Debit, 650.00));
        assert!(node.is_leaf());
    }

    #[test]
    fn test_deserialize_defaults_for_synthetic_root() {
        // The report root has a null id and may omit totals entirely.
        let json = r#"{"id": null, "kind": "group", "children_groups": []}"#;
        let node: AccountNode = serde_json::from_str(json).unwrap();
        assert!(node.id.is_none());
        assert_eq!(node.op_total, 0.0);
        assert_eq!(node.op_total_dc, Dc::Debit);
    }
}
