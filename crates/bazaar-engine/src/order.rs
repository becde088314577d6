//! Order mutation engine.

use crate::locks::CartLocks;
use bazaar_commerce::catalog::Product;
use bazaar_commerce::cart::{price_lines, PricingRules};
use bazaar_commerce::checkout::{Order, OrderItem, OrderStatus, ShippingAddress};
use bazaar_commerce::error::MarketError;
use bazaar_commerce::ids::{OrderId, ProductId, UserId};
use bazaar_store::MarketStore;
use std::sync::{Arc, PoisonError};
use tracing::{info, warn};

/// Converts carts into immutable orders and drives status transitions.
pub struct OrderEngine<S> {
    store: Arc<S>,
    rules: PricingRules,
    locks: Arc<CartLocks>,
}

impl<S: MarketStore> OrderEngine<S> {
    /// Create an order engine over a store.
    pub fn new(store: Arc<S>, rules: PricingRules, locks: Arc<CartLocks>) -> Self {
        Self {
            store,
            rules,
            locks,
        }
    }

    /// Place an order from the user's current cart.
    ///
    /// The sequence is all-or-nothing: stock is deducted through
    /// conditional per-product decrements, and if any line cannot be
    /// fulfilled the decrements already applied are restocked before the
    /// error returns. Totals and line snapshots are taken from live
    /// product prices at this moment, never from stale cart state.
    pub fn place_order(
        &self,
        user_id: &UserId,
        shipping_address: ShippingAddress,
        payment_method: impl Into<String>,
    ) -> Result<Order, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        shipping_address.validate()?;

        let handle = self.locks.handle(user_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let mut cart = self.store.cart(user_id).ok_or(MarketError::EmptyCart)?;

        // Join cart lines against live products; lines whose product has
        // been deleted cannot be ordered and drop out here.
        let mut lines: Vec<(Product, i64)> = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            if let Some(product) = self.store.product(&item.product_id) {
                lines.push((product, item.quantity));
            }
        }
        if lines.is_empty() {
            return Err(MarketError::EmptyCart);
        }

        // The authoritative pricing moment.
        let priced: Vec<_> = lines.iter().map(|(p, q)| (p.price, *q)).collect();
        let totals = price_lines(&priced, &self.rules)?;
        let items = lines
            .iter()
            .map(|(product, quantity)| OrderItem::snapshot(product, *quantity))
            .collect::<Result<Vec<_>, _>>()?;

        // Conditional decrement per product; compensate on failure so a
        // rejected order leaves inventory untouched.
        let mut applied: Vec<(ProductId, i64)> = Vec::with_capacity(lines.len());
        for (product, quantity) in &lines {
            if let Err(err) = self.store.decrement_stock(&product.id, *quantity) {
                self.rollback(&applied);
                return Err(err);
            }
            applied.push((product.id.clone(), *quantity));
        }

        let order = Order::new(
            user_id.clone(),
            items,
            shipping_address,
            payment_method,
            totals,
        );
        if let Err(err) = self.store.insert_order(order.clone()) {
            self.rollback(&applied);
            return Err(err);
        }

        cart.clear();
        self.store.save_cart(cart)?;

        info!(
            user = %user_id,
            order = %order.id,
            total = %order.total(),
            items = order.items.len(),
            "order placed"
        );
        Ok(order)
    }

    /// Apply a status transition on behalf of a vendor or admin.
    pub fn update_status(
        &self,
        order_id: &OrderId,
        new_status: OrderStatus,
        actor: &UserId,
    ) -> Result<Order, MarketError> {
        let actor_user = self
            .store
            .user(actor)
            .ok_or_else(|| MarketError::Unauthorized(actor.as_str().to_string()))?;
        if !actor_user.role.can_manage_orders() {
            return Err(MarketError::Forbidden {
                user: actor.as_str().to_string(),
                action: "update order status".to_string(),
            });
        }

        let mut order = self
            .store
            .order(order_id)
            .ok_or_else(|| MarketError::OrderNotFound(order_id.as_str().to_string()))?;
        let from = order.status;
        order.transition(new_status)?;
        self.store.update_order(order.clone())?;

        info!(order = %order_id, from = %from, to = %new_status, actor = %actor, "order status updated");
        Ok(order)
    }

    /// Fetch one order; only its owner or an admin may see it.
    pub fn order(&self, actor: &UserId, order_id: &OrderId) -> Result<Order, MarketError> {
        let actor_user = self
            .store
            .user(actor)
            .ok_or_else(|| MarketError::Unauthorized(actor.as_str().to_string()))?;
        let order = self
            .store
            .order(order_id)
            .ok_or_else(|| MarketError::OrderNotFound(order_id.as_str().to_string()))?;
        if order.user_id != *actor && !actor_user.is_admin() {
            return Err(MarketError::Forbidden {
                user: actor.as_str().to_string(),
                action: "view this order".to_string(),
            });
        }
        Ok(order)
    }

    /// All orders the acting user has placed.
    pub fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        Ok(self.store.orders_for_user(user_id))
    }

    /// Undo already-applied decrements after a failed placement.
    fn rollback(&self, applied: &[(ProductId, i64)]) {
        for (product_id, quantity) in applied {
            if let Err(err) = self.store.restock(product_id, *quantity) {
                warn!(product = %product_id, quantity, %err, "failed to restock after aborted order");
            }
        }
    }
}
