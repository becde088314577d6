//! Cart pricing calculations.
//!
//! Pure function layer: given priced line items and the business rules,
//! derive the totals breakdown. No entity is read or written here.

use crate::error::MarketError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Configurable pricing rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRules {
    /// Tax rate in basis points (2000 = 20%).
    #[serde(default = "default_tax_rate_bp")]
    pub tax_rate_bp: i64,
    /// Shipping is free when the subtotal strictly exceeds this value.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Money,
    /// Flat fee charged when the order does not qualify for free shipping.
    #[serde(default = "default_flat_shipping_fee")]
    pub flat_shipping_fee: Money,
}

fn default_tax_rate_bp() -> i64 {
    2000
}

fn default_free_shipping_threshold() -> Money {
    Money::from_pounds(50, 0)
}

fn default_flat_shipping_fee() -> Money {
    Money::from_pounds(5, 99)
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tax_rate_bp: default_tax_rate_bp(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_fee: default_flat_shipping_fee(),
        }
    }
}

/// Complete totals breakdown for a set of line items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    /// Sum of unit price times quantity across all lines.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Grand total (subtotal + tax + shipping).
    pub total: Money,
}

impl CartTotals {
    /// All-zero totals, the empty-cart display state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the order qualified for free shipping.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero() && !self.subtotal.is_zero()
    }
}

/// Price an ordered sequence of `(unit_price, quantity)` pairs.
///
/// An empty set of lines yields all-zero totals; that is the empty-cart
/// display state, not an error.
pub fn price_lines(
    lines: &[(Money, i64)],
    rules: &PricingRules,
) -> Result<CartTotals, MarketError> {
    if lines.is_empty() {
        return Ok(CartTotals::empty());
    }

    let mut subtotal = Money::zero();
    for (unit_price, quantity) in lines {
        let line_total = unit_price
            .checked_mul(*quantity)
            .ok_or(MarketError::Overflow)?;
        subtotal = subtotal.checked_add(line_total).ok_or(MarketError::Overflow)?;
    }

    let tax = subtotal
        .scale_bp(rules.tax_rate_bp)
        .ok_or(MarketError::Overflow)?;

    // Free shipping requires strictly exceeding the threshold.
    let shipping = if subtotal > rules.free_shipping_threshold {
        Money::zero()
    } else {
        rules.flat_shipping_fee
    };

    let total = subtotal
        .checked_add(tax)
        .and_then(|t| t.checked_add(shipping))
        .ok_or(MarketError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        tax,
        shipping,
        total,
    })
}
