//! Marketplace error types.

use thiserror::Error;

/// Errors that can occur in marketplace operations.
///
/// Every variant is recoverable at the request boundary: validation and
/// authorization failures report before any state change, and conflict
/// failures carry enough context for the caller to retry with adjusted
/// input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Acting user is not a known user.
    #[error("unknown user: {0}")]
    Unauthorized(String),

    /// Acting user lacks the role required for the operation.
    #[error("user {user} may not {action}")]
    Forbidden { user: String, action: String },

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Quantity must be a positive integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Shipping address is missing a required field.
    #[error("invalid address: missing {0}")]
    InvalidAddress(&'static str),

    /// Review rating outside the 1-5 range.
    #[error("invalid rating: {0} (must be 1-5)")]
    InvalidRating(i64),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Product not found.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// Product is not in the cart.
    #[error("item not in cart: {0}")]
    ItemNotFound(String),

    /// Cart has no items to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Requested quantity exceeds available stock.
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    /// Illegal order status transition.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// A unique-key constraint was violated.
    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Category nesting rule violated (one level, no cycles).
    #[error("invalid parent for category: {0}")]
    InvalidCategoryParent(String),

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,
}

impl MarketError {
    /// Conflict errors are safe to retry with adjusted input.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            MarketError::InsufficientStock { .. }
                | MarketError::InvalidStatusTransition { .. }
                | MarketError::AlreadyExists { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_context() {
        let err = MarketError::InsufficientStock {
            product: "prod_1".to_string(),
            requested: 5,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 5"));
        assert!(msg.contains("available 2"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_validation_is_not_conflict() {
        assert!(!MarketError::InvalidQuantity(0).is_conflict());
    }
}
