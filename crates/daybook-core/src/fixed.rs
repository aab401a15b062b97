//! Fixed-point arithmetic on monetary values.
//!
//! Monetary amounts cross the API boundary as plain JSON numbers and are held
//! as `f64`. Adding them directly accumulates binary rounding error
//! (`0.1 + 0.2 != 0.3`), which would make a perfectly balanced entry appear
//! unbalanced. [`Precision`] avoids that by scaling every operand into an
//! integer domain before operating: multiply by `10^P`, round to the nearest
//! integer, do the arithmetic there, and divide back out. Integers up to
//! 2^53 are exact in an `f64`, so chained folds over realistic ledgers do
//! not drift.

use serde::{Deserialize, Serialize};

/// The number of decimal places monetary arithmetic is carried out at.
///
/// # Examples
///
/// ```
/// use daybook_core::Precision;
///
/// let p = Precision::new(2);
/// assert_eq!(p.add(0.1, 0.2), 0.3);
/// assert_eq!(p.sub(500.00, 499.99), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision(u32);

impl Precision {
    /// Two decimal places, the common configuration for currency amounts.
    pub const CENTS: Self = Self(2);

    /// Create a precision of `places` decimal digits.
    #[must_use]
    pub const fn new(places: u32) -> Self {
        Self(places)
    }

    /// The configured number of decimal places.
    #[must_use]
    pub const fn places(self) -> u32 {
        self.0
    }

    fn multiplier(self) -> f64 {
        10f64.powi(self.0 as i32)
    }

    /// Round a value to this precision.
    ///
    /// Inputs with more fractional digits than the precision are silently
    /// rounded (half away from zero); this matches what the entry form does
    /// and is documented behavior, not an error.
    #[must_use]
    pub fn quantize(self, value: f64) -> f64 {
        let m = self.multiplier();
        (value * m).round() / m
    }

    /// Add two amounts in the scaled integer domain.
    ///
    /// Exact for inputs representable with at most `places()` fractional
    /// digits; repeated chained calls do not drift.
    #[must_use]
    pub fn add(self, a: f64, b: f64) -> f64 {
        let m = self.multiplier();
        ((a * m).round() + (b * m).round()) / m
    }

    /// Subtract `b` from `a` in the scaled integer domain.
    #[must_use]
    pub fn sub(self, a: f64, b: f64) -> f64 {
        let m = self.multiplier();
        ((a * m).round() - (b * m).round()) / m
    }

    /// Check whether a value rounds to zero at this precision.
    #[must_use]
    pub fn is_zero(self, value: f64) -> bool {
        (value * self.multiplier()).round() == 0.0
    }

    /// Check whether a value is strictly positive once quantized.
    #[must_use]
    pub fn is_positive(self, value: f64) -> bool {
        (value * self.multiplier()).round() > 0.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::CENTS
    }
}
