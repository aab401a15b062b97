//! Running totals over the posting lines of a draft entry.

use daybook_core::{Dc, PostingLine, Precision};

/// Debit and credit totals with the signed difference between them.
///
/// A derived read over the line collection: it never mutates the lines and
/// must be recomputed after every add, remove, or edit so the displayed
/// totals are never stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of all debit-side amounts.
    pub dr_total: f64,
    /// Sum of all credit-side amounts.
    pub cr_total: f64,
    /// `dr_total - cr_total`, positive when debits are heavier.
    pub difference: f64,
    /// Whether the difference is exactly zero after fixed-point rounding.
    pub balanced: bool,
}

impl Totals {
    /// The side carrying the excess, or `None` when balanced.
    #[must_use]
    pub fn heavier_side(&self) -> Option<Dc> {
        if self.balanced {
            None
        } else if self.difference > 0.0 {
            Some(Dc::Debit)
        } else {
            Some(Dc::Credit)
        }
    }
}

/// Fold the debit and credit sides of `lines` independently through the
/// fixed-point adder and report the imbalance.
#[must_use]
pub fn compute_totals(lines: &[PostingLine], precision: Precision) -> Totals {
    let dr_total = lines
        .iter()
        .filter(|line| line.dc == Dc::Debit)
        .fold(0.0, |sum, line| precision.add(sum, line.amount));

    let cr_total = lines
        .iter()
        .filter(|line| line.dc == Dc::Credit)
        .fold(0.0, |sum, line| precision.add(sum, line.amount));

    let difference = precision.sub(dr_total, cr_total);

    Totals {
        dr_total,
        cr_total,
        difference,
        balanced: difference == 0.0,
    }
}
