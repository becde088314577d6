//! Cart and order mutation engines for BazaarCommerce.
//!
//! The engines own the marketplace's mutation contracts:
//!
//! - [`CatalogEngine`]: registration, category/product management with
//!   vendor/admin authorization, reviews, wishlists
//! - [`CartEngine`]: per-user cart mutations with quantity and stock
//!   validation, serialized per cart
//! - [`OrderEngine`]: all-or-nothing conversion of a cart into an
//!   immutable order with inventory effects, plus status transitions
//!
//! Every engine is generic over the record store, so tests run against
//! [`bazaar_store::MemoryStore`] and production can substitute a durable
//! backend with the same contracts.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_engine::{EngineConfig, Engines};
//! use bazaar_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let engines = Engines::new(Arc::new(MemoryStore::new()), EngineConfig::default());
//! let view = engines.cart.add_item(&user_id, &product_id, 2)?;
//! let order = engines.orders.place_order(&user_id, address, "card")?;
//! ```

mod cart;
mod catalog;
mod config;
mod locks;
mod order;

pub use cart::CartEngine;
pub use catalog::CatalogEngine;
pub use config::{ConfigError, EngineConfig};
pub use locks::CartLocks;
pub use order::OrderEngine;

use bazaar_store::MarketStore;
use std::sync::Arc;

/// The full engine set wired over one shared store.
///
/// Cart and order engines share the per-cart lock registry, so a cart
/// mutation and an order placement for the same user never interleave.
pub struct Engines<S> {
    pub catalog: CatalogEngine<S>,
    pub cart: CartEngine<S>,
    pub orders: OrderEngine<S>,
}

impl<S: MarketStore> Engines<S> {
    /// Wire the engines over a store with the given configuration.
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        let locks = Arc::new(CartLocks::new());
        Self {
            catalog: CatalogEngine::new(Arc::clone(&store)),
            cart: CartEngine::new(
                Arc::clone(&store),
                config.pricing.clone(),
                Arc::clone(&locks),
            ),
            orders: OrderEngine::new(store, config.pricing, locks),
        }
    }
}
