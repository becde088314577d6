//! Order types.
//!
//! Orders are immutable once created except for status transitions. Line
//! items carry price and subtotal snapshots taken at order time, decoupled
//! from any later product change.

use crate::catalog::Product;
use crate::cart::CartTotals;
use crate::checkout::ShippingAddress;
use crate::error::MarketError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check whether a transition to `next` is legal.
    ///
    /// Statuses only move forward through fulfilment, with cancellation
    /// allowed from the two earliest states.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Ordering user.
    pub user_id: UserId,
    /// Current status.
    pub status: OrderStatus,
    /// Snapshotted line items.
    pub items: Vec<OrderItem>,
    /// Shipping address copied from checkout input.
    pub shipping_address: ShippingAddress,
    /// Payment method label recorded verbatim.
    pub payment_method: String,
    /// Totals computed at placement; never recomputed afterwards.
    pub totals: CartTotals,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Order {
    /// Create a pending order from snapshotted items and computed totals.
    pub fn new(
        user_id: UserId,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        payment_method: impl Into<String>,
        totals: CartTotals,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: OrderId::generate(),
            user_id,
            status: OrderStatus::Pending,
            items,
            shipping_address,
            payment_method: payment_method.into(),
            totals,
            created_at: now,
            updated_at: now,
        }
    }

    /// The grand total charged for this order.
    pub fn total(&self) -> Money {
        self.totals.total
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Apply a status transition.
    ///
    /// Fails with `InvalidStatusTransition` for anything other than a
    /// forward step or an early cancellation.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), MarketError> {
        if !self.status.can_transition_to(next) {
            return Err(MarketError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        self.updated_at = current_timestamp();
        Ok(())
    }
}

/// A snapshotted order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique line identifier.
    pub id: OrderItemId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Unit price at order time.
    pub unit_price: Money,
    /// Quantity ordered.
    pub quantity: i64,
    /// Line subtotal at order time (unit price times quantity).
    pub subtotal: Money,
}

impl OrderItem {
    /// Snapshot a product at the quantity being ordered.
    pub fn snapshot(product: &Product, quantity: i64) -> Result<Self, MarketError> {
        let subtotal = product
            .price
            .checked_mul(quantity)
            .ok_or(MarketError::Overflow)?;
        Ok(Self {
            id: OrderItemId::generate(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            subtotal,
        })
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
    use crate::ids::CategoryId;

    fn sample_order() -> Order {
        Order::new(
            UserId::new("usr_1"),
            Vec::new(),
            ShippingAddress::new("Ada Lovelace", "12 Augusta St", "London", "N1 9GU", "UK"),
            "card",
            CartTotals::empty(),
        )
    }

    #[test]
    fn test_forward_transitions() {
        let mut order = sample_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_skipping_a_state_is_rejected() {
        let mut order = sample_order();
        let err = order.transition(OrderStatus::Shipped).unwrap_err();
        assert_eq!(
            err,
            MarketError::InvalidStatusTransition {
                from: "pending".to_string(),
                to: "shipped".to_string(),
            }
        );
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_cancellation_window() {
        let mut order = sample_order();
        order.transition(OrderStatus::Cancelled).unwrap();

        let mut order = sample_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Cancelled).unwrap();

        // Cancelled orders never move again.
        assert!(order.transition(OrderStatus::Processing).is_err());

        let mut order = sample_order();
        order.transition(OrderStatus::Processing).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        assert!(order.transition(OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn test_order_item_snapshot() {
        let product = Product::new(
            UserId::new("usr_vendor"),
            CategoryId::new("cat_books"),
            "Rust in Practice",
            "rust-in-practice",
            Money::from_pounds(10, 0),
            5,
        )
        .unwrap();

        let item = OrderItem::snapshot(&product, 3).unwrap();
        assert_eq!(item.unit_price, Money::from_pounds(10, 0));
        assert_eq!(item.subtotal, Money::from_pounds(30, 0));
        assert_eq!(item.name, "Rust in Practice");
    }
}
