//! Cart mutation engine.

use crate::locks::CartLocks;
use bazaar_commerce::cart::{price_lines, Cart, CartLine, CartView, PricingRules};
use bazaar_commerce::error::MarketError;
use bazaar_commerce::ids::{ProductId, UserId};
use bazaar_store::MarketStore;
use std::sync::{Arc, PoisonError};
use tracing::debug;

/// Validates and applies cart mutations for one store.
///
/// All mutations authorize the acting user first, validate input second,
/// and only then touch state. Mutations on one user's cart are serialized
/// through the shared [`CartLocks`] registry.
pub struct CartEngine<S> {
    store: Arc<S>,
    rules: PricingRules,
    locks: Arc<CartLocks>,
}

impl<S: MarketStore> CartEngine<S> {
    /// Create a cart engine over a store.
    pub fn new(store: Arc<S>, rules: PricingRules, locks: Arc<CartLocks>) -> Self {
        Self {
            store,
            rules,
            locks,
        }
    }

    /// Return the user's cart, creating an empty one if absent.
    pub fn get_or_create_cart(&self, user_id: &UserId) -> Result<Cart, MarketError> {
        self.authorize(user_id)?;
        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        match self.store.cart(user_id) {
            Some(cart) => Ok(cart),
            None => {
                let cart = Cart::new(user_id.clone());
                self.store.save_cart(cart.clone())?;
                debug!(user = %user_id, cart = %cart.id, "created cart");
                Ok(cart)
            }
        }
    }

    /// Add a quantity of a product to the user's cart.
    ///
    /// Re-adding a product already in the cart merges into its existing
    /// line; the stock check runs against the cumulative quantity.
    pub fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, MarketError> {
        self.authorize(user_id)?;
        if quantity < 1 {
            return Err(MarketError::InvalidQuantity(quantity));
        }

        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let product = self
            .store
            .product(product_id)
            .ok_or_else(|| MarketError::ProductNotFound(product_id.as_str().to_string()))?;

        let mut cart = match self.store.cart(user_id) {
            Some(cart) => cart,
            None => Cart::new(user_id.clone()),
        };

        let cumulative = cart
            .quantity_of(product_id)
            .checked_add(quantity)
            .ok_or(MarketError::Overflow)?;
        if !product.can_fulfill(cumulative) {
            return Err(MarketError::InsufficientStock {
                product: product_id.as_str().to_string(),
                requested: cumulative,
                available: product.stock,
            });
        }

        cart.add(product_id.clone(), quantity)?;
        self.store.save_cart(cart.clone())?;
        debug!(user = %user_id, product = %product_id, quantity, "added item to cart");
        self.view_of(cart)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Zero and negative quantities are rejected; removal is
    /// [`remove_item`](Self::remove_item).
    pub fn update_item_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, MarketError> {
        self.authorize(user_id)?;
        if quantity < 1 {
            return Err(MarketError::InvalidQuantity(quantity));
        }

        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let mut cart = self
            .store
            .cart(user_id)
            .ok_or_else(|| MarketError::ItemNotFound(product_id.as_str().to_string()))?;
        if cart.quantity_of(product_id) == 0 {
            return Err(MarketError::ItemNotFound(product_id.as_str().to_string()));
        }

        let product = self
            .store
            .product(product_id)
            .ok_or_else(|| MarketError::ProductNotFound(product_id.as_str().to_string()))?;
        if !product.can_fulfill(quantity) {
            return Err(MarketError::InsufficientStock {
                product: product_id.as_str().to_string(),
                requested: quantity,
                available: product.stock,
            });
        }

        cart.set_quantity(product_id, quantity)?;
        self.store.save_cart(cart.clone())?;
        debug!(user = %user_id, product = %product_id, quantity, "updated cart quantity");
        self.view_of(cart)
    }

    /// Remove a product from the cart.
    ///
    /// Idempotent: removing an absent product is a no-op that returns the
    /// unchanged cart.
    pub fn remove_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<CartView, MarketError> {
        self.authorize(user_id)?;

        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let mut cart = match self.store.cart(user_id) {
            Some(cart) => cart,
            None => return Ok(CartView::empty(user_id.clone())),
        };

        if cart.remove(product_id) {
            self.store.save_cart(cart.clone())?;
            debug!(user = %user_id, product = %product_id, "removed item from cart");
        }
        self.view_of(cart)
    }

    /// Remove every item from the user's cart.
    pub fn clear_cart(&self, user_id: &UserId) -> Result<(), MarketError> {
        self.authorize(user_id)?;

        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(mut cart) = self.store.cart(user_id) {
            cart.clear();
            self.store.save_cart(cart)?;
            debug!(user = %user_id, "cleared cart");
        }
        Ok(())
    }

    /// The user's cart joined with live product data and computed totals.
    ///
    /// A user with no cart yet sees an empty view. Lines whose product has
    /// been deleted are flagged as unavailable, not errors.
    pub fn cart_view(&self, user_id: &UserId) -> Result<CartView, MarketError> {
        self.authorize(user_id)?;
        match self.store.cart(user_id) {
            Some(cart) => self.view_of(cart),
            None => Ok(CartView::empty(user_id.clone())),
        }
    }

    /// Fail with `Unauthorized` unless the acting user is known.
    fn authorize(&self, user_id: &UserId) -> Result<(), MarketError> {
        match self.store.user(user_id) {
            Some(_) => Ok(()),
            None => Err(MarketError::Unauthorized(user_id.as_str().to_string())),
        }
    }

    /// Join a cart against current product records and price it.
    fn view_of(&self, cart: Cart) -> Result<CartView, MarketError> {
        let mut lines = Vec::with_capacity(cart.items.len());
        let mut unavailable = Vec::new();

        for item in &cart.items {
            match self.store.product(&item.product_id) {
                Some(product) => {
                    let line_subtotal = product
                        .price
                        .checked_mul(item.quantity)
                        .ok_or(MarketError::Overflow)?;
                    lines.push(CartLine {
                        product_id: product.id,
                        name: product.name,
                        image_url: product.image_url,
                        unit_price: product.price,
                        quantity: item.quantity,
                        line_subtotal,
                    });
                }
                None => unavailable.push(item.product_id.clone()),
            }
        }

        let priced: Vec<_> = lines.iter().map(|l| (l.unit_price, l.quantity)).collect();
        let totals = price_lines(&priced, &self.rules)?;

        Ok(CartView {
            user_id: cart.user_id,
            lines,
            unavailable,
            totals,
        })
    }
}
