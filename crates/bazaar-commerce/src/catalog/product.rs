//! Product types.

use crate::error::MarketError;
use crate::ids::{CategoryId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Every product is owned by exactly one vendor and belongs to exactly one
/// category. The stock counter is mutated by order placement; everything
/// else is mutated by the owning vendor or an admin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Owning vendor.
    pub vendor_id: UserId,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Full description.
    pub description: Option<String>,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Selling price.
    pub price: Money,
    /// Original price for showing discounts. Only meaningful when strictly
    /// greater than `price`.
    pub compare_at_price: Option<Money>,
    /// Units in stock.
    pub stock: i64,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product.
    ///
    /// Rejects negative prices and stock; referential checks (vendor role,
    /// category existence, slug uniqueness) belong to the catalog engine
    /// and store.
    pub fn new(
        vendor_id: UserId,
        category_id: CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Result<Self, MarketError> {
        if price.is_negative() {
            return Err(MarketError::Validation("price must not be negative".into()));
        }
        if stock < 0 {
            return Err(MarketError::Validation("stock must not be negative".into()));
        }
        let now = current_timestamp();
        Ok(Self {
            id: ProductId::generate(),
            vendor_id,
            category_id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            image_url: None,
            price,
            compare_at_price: None,
            stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if this product is on sale.
    ///
    /// The compare-at price counts only when strictly greater than the
    /// selling price; otherwise no discount is shown.
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price.map(|cap| cap > self.price).unwrap_or(false)
    }

    /// The compare-at price, if it represents a real discount.
    pub fn displayed_compare_at(&self) -> Option<Money> {
        self.compare_at_price.filter(|cap| *cap > self.price)
    }

    /// Check if any stock remains.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if a specific quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Bump the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp();
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(price: Money, stock: i64) -> Product {
        Product::new(
            UserId::new("usr_vendor"),
            CategoryId::new("cat_books"),
            "Rust in Practice",
            "rust-in-practice",
            price,
            stock,
        )
        .unwrap()
    }

    #[test]
    fn test_product_creation() {
        let product = sample_product(Money::new(2999), 10);
        assert_eq!(product.slug, "rust-in-practice");
        assert!(product.is_in_stock());
        assert!(product.can_fulfill(10));
        assert!(!product.can_fulfill(11));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Product::new(
            UserId::new("usr_vendor"),
            CategoryId::new("cat_books"),
            "Broken",
            "broken",
            Money::new(-1),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_on_sale_requires_strictly_greater_compare_at() {
        let mut product = sample_product(Money::new(2000), 5);
        assert!(!product.is_on_sale());

        product.compare_at_price = Some(Money::new(2000));
        assert!(!product.is_on_sale());
        assert_eq!(product.displayed_compare_at(), None);

        product.compare_at_price = Some(Money::new(3000));
        assert!(product.is_on_sale());
        assert_eq!(product.displayed_compare_at(), Some(Money::new(3000)));
    }
}
