//! Cart and cart item types.

use crate::error::MarketError;
use crate::ids::{CartId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A user's shopping cart.
///
/// Exactly one cart exists per user, created lazily on the first
/// add-to-cart action. Line items cache no price: views and checkout both
/// price against the live product record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a quantity of a product, merging with an existing line.
    ///
    /// At most one line exists per product: adding an already-present
    /// product increments its quantity. Returns the resulting line
    /// quantity. Quantity and stock validation happen in the cart engine
    /// before this is called.
    pub fn add(&mut self, product_id: ProductId, quantity: i64) -> Result<i64, MarketError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(MarketError::Overflow)?;
            let merged = existing.quantity;
            self.updated_at = current_timestamp();
            return Ok(merged);
        }

        self.items.push(CartItem {
            product_id,
            quantity,
        });
        self.updated_at = current_timestamp();
        Ok(quantity)
    }

    /// Set the quantity of an existing line.
    ///
    /// Fails with `ItemNotFound` if the product is not in the cart;
    /// removal is a separate operation.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<(), MarketError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| &i.product_id == product_id)
            .ok_or_else(|| MarketError::ItemNotFound(product_id.as_str().to_string()))?;
        item.quantity = quantity;
        self.updated_at = current_timestamp();
        Ok(())
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    ///
    /// Returns whether a line was actually removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Current quantity of a product in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.items
            .iter()
            .find(|i| &i.product_id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A line in the cart: one product and its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product in the cart.
    pub product_id: ProductId,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_quantities() {
        let mut cart = Cart::new(UserId::new("usr_1"));
        cart.add(ProductId::new("prod_1"), 2).unwrap();
        cart.add(ProductId::new("prod_1"), 3).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("prod_1")), 5);
    }

    #[test]
    fn test_set_quantity_requires_existing_line() {
        let mut cart = Cart::new(UserId::new("usr_1"));
        let result = cart.set_quantity(&ProductId::new("prod_1"), 4);
        assert!(matches!(result, Err(MarketError::ItemNotFound(_))));

        cart.add(ProductId::new("prod_1"), 1).unwrap();
        cart.set_quantity(&ProductId::new("prod_1"), 4).unwrap();
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new(UserId::new("usr_1"));
        cart.add(ProductId::new("prod_1"), 2).unwrap();

        assert!(cart.remove(&ProductId::new("prod_1")));
        assert!(!cart.remove(&ProductId::new("prod_1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new(UserId::new("usr_1"));
        cart.add(ProductId::new("prod_1"), 2).unwrap();
        cart.add(ProductId::new("prod_2"), 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
