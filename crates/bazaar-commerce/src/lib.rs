//! Marketplace domain types and logic for BazaarCommerce.
//!
//! This crate provides the cart-to-order domain model for a multi-vendor
//! marketplace:
//!
//! - **Accounts**: Users with customer/vendor/admin roles
//! - **Catalog**: Products, categories, reviews, wishlists
//! - **Cart**: Per-user cart with merged line items and live pricing
//! - **Checkout**: Immutable orders with price snapshots and a status
//!   state machine
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_commerce::prelude::*;
//!
//! let mut cart = Cart::new(user_id);
//! cart.add(product.id.clone(), 2)?;
//!
//! let totals = price_lines(
//!     &[(product.price, 2)],
//!     &PricingRules::default(),
//! )?;
//! println!("Total: {}", totals.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::MarketError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Accounts
    pub use crate::account::{Role, User};

    // Catalog
    pub use crate::catalog::{Category, Product, Review, WishlistEntry};

    // Cart
    pub use crate::cart::{
        price_lines, Cart, CartItem, CartLine, CartTotals, CartView, PricingRules,
    };

    // Checkout
    pub use crate::checkout::{Order, OrderItem, OrderStatus, ShippingAddress};
}
