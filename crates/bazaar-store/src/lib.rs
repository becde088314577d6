//! Entity store interfaces and in-memory storage for BazaarCommerce.
//!
//! Each entity gets its own store trait so the engines can be tested
//! against a substitutable record store. The contract is that of a durable
//! record store: unique-key constraints are enforced at insert, referenced
//! records are looked up before a write is accepted, and stock decrements
//! are conditional and atomic per product.
//!
//! [`MemoryStore`] is the bundled implementation, suitable for tests and
//! single-process deployments.

mod memory;
mod stores;

pub use memory::MemoryStore;
pub use stores::{
    CartStore, CategoryStore, MarketStore, OrderStore, ProductStore, ReviewStore, UserStore,
    WishlistStore,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartStore, CategoryStore, MarketStore, MemoryStore, OrderStore, ProductStore, ReviewStore,
        UserStore, WishlistStore,
    };
}
