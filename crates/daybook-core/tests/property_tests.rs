//! Property-based tests for daybook-core.
//!
//! These tests verify the fixed-point arithmetic invariants hold for
//! arbitrary inputs using proptest.
//!
//! Run with: cargo test -p daybook-core --test `property_tests`

use daybook_core::Precision;
use proptest::prelude::*;

/// Amounts with at most two fractional digits, as minor units.
fn arb_cents() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

fn to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

proptest! {
    /// Adding amounts representable at two places is exact: the result in
    /// minor units equals plain integer addition.
    #[test]
    fn prop_add_matches_integer_math(a in arb_cents(), b in arb_cents()) {
        let p = Precision::new(2);
        let sum = p.add(to_amount(a), to_amount(b));
        prop_assert_eq!(sum, to_amount(a + b));
    }

    /// Subtraction mirrors integer subtraction in minor units.
    #[test]
    fn prop_sub_matches_integer_math(a in arb_cents(), b in arb_cents()) {
        let p = Precision::new(2);
        let diff = p.sub(to_amount(a), to_amount(b));
        prop_assert_eq!(diff, to_amount(a - b));
    }

    /// A chained fold over many two-place amounts never drifts from the
    /// exact integer total.
    #[test]
    fn prop_chained_fold_is_exact(values in prop::collection::vec(-100_000i64..100_000i64, 1..1500)) {
        let p = Precision::new(2);
        let folded = values.iter().fold(0.0, |acc, &v| p.add(acc, to_amount(v)));
        let exact: i64 = values.iter().sum();
        prop_assert_eq!(folded, to_amount(exact));
    }

    /// Quantizing twice is the same as quantizing once.
    #[test]
    fn prop_quantize_idempotent(v in -1_000_000.0f64..1_000_000.0f64) {
        let p = Precision::new(2);
        let once = p.quantize(v);
        prop_assert_eq!(p.quantize(once), once);
    }

    /// add(a, b) - b recovers a for two-place inputs.
    #[test]
    fn prop_add_then_sub_roundtrips(a in arb_cents(), b in arb_cents()) {
        let p = Precision::new(2);
        let back = p.sub(p.add(to_amount(a), to_amount(b)), to_amount(b));
        prop_assert_eq!(back, to_amount(a));
    }
}

#[test]
fn thousand_dimes_make_a_hundred() {
    let p = Precision::new(2);
    let total = (0..1000).fold(0.0, |acc, _| p.add(acc, 0.1));
    assert_eq!(total, 100.0);
}
