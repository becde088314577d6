//! Money type for monetary values.
//!
//! Amounts are stored in integer pence. The marketplace trades in a single
//! currency (GBP), so no currency tag travels with the amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Basis points in a whole (100%).
pub const BASIS_POINTS: i64 = 10_000;

/// A monetary value in pence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    pence: i64,
}

impl Money {
    /// Create a Money value from pence.
    pub fn new(pence: i64) -> Self {
        Self { pence }
    }

    /// Create a Money value from a whole-pounds-and-pence pair.
    ///
    /// ```
    /// use bazaar_commerce::money::Money;
    /// assert_eq!(Money::from_pounds(49, 99), Money::new(4999));
    /// ```
    pub fn from_pounds(pounds: i64, pence: i64) -> Self {
        Self::new(pounds * 100 + pence)
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Amount in pence.
    pub fn pence(&self) -> i64 {
        self.pence
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.pence == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.pence < 0
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.pence.checked_add(other.pence).map(Money::new)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.pence.checked_sub(other.pence).map(Money::new)
    }

    /// Checked multiplication by a quantity.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        self.pence.checked_mul(quantity).map(Money::new)
    }

    /// Scale by a basis-point rate, rounding half-up.
    ///
    /// Used for percentage charges such as tax: 20% is 2000 basis points.
    ///
    /// ```
    /// use bazaar_commerce::money::Money;
    /// // 20% of 25.00 is exactly 5.00
    /// assert_eq!(Money::new(2500).scale_bp(2000), Some(Money::new(500)));
    /// // 0.125 rounds up to 0.13
    /// assert_eq!(Money::new(1).scale_bp(12_500), Some(Money::new(1)));
    /// ```
    pub fn scale_bp(&self, rate_bp: i64) -> Option<Money> {
        let scaled = self.pence.checked_mul(rate_bp)?;
        // round-half-up(x / n) == floor((x + n/2) / n)
        let rounded = scaled.checked_add(BASIS_POINTS / 2)?.div_euclid(BASIS_POINTS);
        Some(Money::new(rounded))
    }

    /// Sum an iterator of Money values, returning `None` on overflow.
    pub fn checked_sum(iter: impl Iterator<Item = Money>) -> Option<Money> {
        let mut acc = Money::zero();
        for m in iter {
            acc = acc.checked_add(m)?;
        }
        Some(acc)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.pence + other.pence)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.pence - other.pence)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.pence < 0 { "-" } else { "" };
        let abs = self.pence.unsigned_abs();
        write!(f, "{}\u{00a3}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
