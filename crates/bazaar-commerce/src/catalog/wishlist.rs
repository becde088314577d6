//! Wishlist types.

use crate::ids::{ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A saved-for-later marker for one (user, product) pair.
///
/// Wishlists are sets: adding the same product twice is a no-op, which the
/// wishlist store enforces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WishlistEntry {
    /// Owning user.
    pub user_id: UserId,
    /// Saved product.
    pub product_id: ProductId,
    /// Unix timestamp the product was saved.
    pub added_at: i64,
}

impl WishlistEntry {
    /// Create a new wishlist entry.
    pub fn new(user_id: UserId, product_id: ProductId) -> Self {
        Self {
            user_id,
            product_id,
            added_at: current_timestamp(),
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
