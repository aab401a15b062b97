//! Deterministic flattening of an account tree into display rows.
//!
//! Traversal order is canonical across every report: the node itself first
//! (when it carries an identifier), then its child groups depth-first in the
//! order the API returned them, then the node's own child ledgers. Each
//! recursion level adds one indent unit; ledgers render one unit deeper than
//! their owning group. The iterator holds no hidden mutable state beyond its
//! work stack, so re-running it over the same tree always yields the same
//! finite sequence.

use daybook_core::{AccountNode, Dc};

/// One display row produced by flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    /// The tree node this row renders.
    pub node: &'a AccountNode,
    /// Indentation depth in units.
    pub indent: usize,
    /// Set when the node's closing balance sits on the wrong side for the
    /// report column it appears in. Purely presentational: flagged rows are
    /// highlighted, never excluded from totals.
    pub flagged: bool,
}

/// Lazy iterator over the rows of a flattened account tree.
#[derive(Debug, Clone)]
pub struct FlattenedRows<'a> {
    stack: Vec<(&'a AccountNode, usize)>,
    expected: Option<Dc>,
}

impl<'a> FlattenedRows<'a> {
    fn new(root: &'a AccountNode, expected: Option<Dc>) -> Self {
        Self {
            stack: vec![(root, 0)],
            expected,
        }
    }

    fn mismatch(&self, node: &AccountNode) -> bool {
        match self.expected {
            Some(expected) => node.cl_total_dc != expected && node.cl_total != 0.0,
            None => false,
        }
    }
}

impl<'a> Iterator for FlattenedRows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, indent)) = self.stack.pop() {
            // Children are pushed in reverse so they pop in API order:
            // groups (each a full subtree) before this node's own ledgers.
            for ledger in node.children_ledgers.iter().rev() {
                self.stack.push((ledger, indent + 1));
            }
            for group in node.children_groups.iter().rev() {
                self.stack.push((group, indent + 1));
            }

            // Synthetic roots carry no identifier and produce no row, but
            // their children still indent one level deeper.
            if node.id.is_some() {
                return Some(Row {
                    node,
                    indent,
                    flagged: self.mismatch(node),
                });
            }
        }
        None
    }
}

/// Flatten a tree without side checking (trial balance, profit and loss).
#[must_use]
pub fn flatten(root: &AccountNode) -> FlattenedRows<'_> {
    FlattenedRows::new(root, None)
}

/// Flatten a tree for a balance-sheet column whose rows are expected to
/// close on `expected` (assets `D`, liabilities `C`), flagging rows whose
/// non-zero closing balance contradicts it.
#[must_use]
pub fn flatten_for_side(root: &AccountNode, expected: Dc) -> FlattenedRows<'_> {
    FlattenedRows::new(root, Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::NodeKind;

    fn node(id: Option<&str>, code: &str, kind: NodeKind) -> AccountNode {
        AccountNode {
            id: id.map(ToString::to_string),
            code: code.to_string(),
            name: format!("Account {code}"),
            kind,
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

    /// root (no id)
    /// ├── ledger 1100
    /// └── group 1200
    ///     └── ledger 1210
    fn two_level_tree() -> AccountNode {
        let mut root = node(None, "", NodeKind::Group);
        root.children_ledgers
            .push(node(Some("l1"), "1100", NodeKind::Ledger));
        let mut child = node(Some("g2"), "1200", NodeKind::Group);
        child
            .children_ledgers
            .push(node(Some("l2"), "1210", NodeKind::Ledger));
        root.children_groups.push(child);
        root
    }

    #[test]
    fn test_groups_before_ledgers_of_same_parent() {
        let tree = two_level_tree();
        let codes: Vec<&str> = flatten(&tree).map(|r| r.node.code.as_str()).collect();
        // Group subtree first, then the root's own ledgers
        assert_eq!(codes, vec!["1200", "1210", "1100"]);
    }

    #[test]
    fn test_indentation_levels() {
        let tree = two_level_tree();
        let rows: Vec<(String, usize)> = flatten(&tree)
            .map(|r| (r.node.code.clone(), r.indent))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("1200".to_string(), 1),
                ("1210".to_string(), 2),
                ("1100".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_rerun_yields_identical_sequence() {
        let tree = two_level_tree();
        let first: Vec<(Option<String>, usize, bool)> = flatten(&tree)
            .map(|r| (r.node.id.clone(), r.indent, r.flagged))
            .collect();
        let second: Vec<(Option<String>, usize, bool)> = flatten(&tree)
            .map(|r| (r.node.id.clone(), r.indent, r.flagged))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_synthetic_root_produces_no_row() {
        let tree = two_level_tree();
        assert!(flatten(&tree).all(|r| r.node.id.is_some()));
    }

    #[test]
    fn test_rooted_tree_emits_root_first() {
        let mut tree = two_level_tree();
        tree.id = Some("g0".to_string());
        tree.code = "1000".to_string();
        let codes: Vec<&str> = flatten(&tree).map(|r| r.node.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "1200", "1210", "1100"]);
        assert_eq!(flatten(&tree).next().unwrap().indent, 0);
    }

    #[test]
    fn test_mismatch_flag_only_for_nonzero_wrong_side() {
        let mut tree = node(None, "", NodeKind::Group);

        let mut wrong = node(Some("l1"), "1100", NodeKind::Ledger);
        wrong.cl_total = 25.0;
        wrong.cl_total_dc = Dc::Credit;

        let mut zero_wrong = node(Some("l2"), "1110", NodeKind::Ledger);
        zero_wrong.cl_total = 0.0;
        zero_wrong.cl_total_dc = Dc::Credit;

        let mut right = node(Some("l3"), "1120", NodeKind::Ledger);
        right.cl_total = 10.0;
        right.cl_total_dc = Dc::Debit;

        tree.children_ledgers.extend([wrong, zero_wrong, right]);

        let flags: Vec<(String, bool)> = flatten_for_side(&tree, Dc::Debit)
            .map(|r| (r.node.code.clone(), r.flagged))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("1100".to_string(), true),
                ("1110".to_string(), false),
                ("1120".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_no_flags_without_expected_side() {
        let mut tree = node(None, "", NodeKind::Group);
        let mut wrong = node(Some("l1"), "1100", NodeKind::Ledger);
        wrong.cl_total = 25.0;
        wrong.cl_total_dc = Dc::Credit;
        tree.children_ledgers.push(wrong);

        assert!(flatten(&tree).all(|r| !r.flagged));
    }

    #[test]
    fn test_deep_nesting_remains_finite() {
        // five levels of single-child groups ending in one ledger
        let mut current = node(Some("leaf-group"), "9000", NodeKind::Group);
        current
            .children_ledgers
            .push(node(Some("l"), "9999", NodeKind::Ledger));
        for depth in (0..5).rev() {
            let mut parent = node(Some(&format!("g{depth}")), &format!("{depth}"), NodeKind::Group);
            parent.children_groups.push(current);
            current = parent;
        }
        let rows: Vec<usize> = flatten(&current).map(|r| r.indent).collect();
        assert_eq!(rows.len(), 7);
        assert_eq!(*rows.last().unwrap(), 6);
    }
}
