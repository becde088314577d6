//! Cart display view.
//!
//! Line items joined with live product data plus computed totals. Built
//! by the cart engine; the entity itself stores only product ids and
//! quantities.

use crate::cart::CartTotals;
use crate::ids::{ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A priced, displayable cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product in the cart.
    pub product_id: ProductId,
    /// Current product name.
    pub name: String,
    /// Current product image, if any.
    pub image_url: Option<String>,
    /// Live unit price.
    pub unit_price: Money,
    /// Quantity in the cart.
    pub quantity: i64,
    /// Line subtotal (unit price times quantity).
    pub line_subtotal: Money,
}

/// A user's cart joined with current catalog data.
///
/// Lines whose product has been deleted since they were added appear in
/// `unavailable` instead of `lines` and do not contribute to totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    /// Owning user.
    pub user_id: UserId,
    /// Priced lines backed by a live product.
    pub lines: Vec<CartLine>,
    /// Products that are in the cart but no longer in the catalog.
    pub unavailable: Vec<ProductId>,
    /// Totals over the priced lines.
    pub totals: CartTotals,
}

impl CartView {
    /// An empty view for a user with no cart yet.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            lines: Vec::new(),
            unavailable: Vec::new(),
            totals: CartTotals::empty(),
        }
    }

    /// Check if the view has no priced lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count across priced lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
