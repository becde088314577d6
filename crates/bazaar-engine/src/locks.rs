//! Per-cart mutual exclusion.
//!
//! One user's cart mutations must be serialized; different users' carts
//! are independent and run in parallel. A registry of per-user mutexes
//! gives each cart its own exclusion scope without a global lock.

use bazaar_commerce::ids::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of per-user cart locks.
#[derive(Debug, Default)]
pub struct CartLocks {
    inner: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl CartLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock handle for a user's cart, creating it on first use.
    ///
    /// Callers lock the returned handle for the duration of one cart
    /// read-modify-write sequence:
    ///
    /// ```rust,ignore
    /// let handle = locks.handle(&user_id);
    /// let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
    /// // load cart, mutate, save
    /// ```
    pub fn handle(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(user_id.clone()).or_default())
    }
}
