//! Catalog management engine.
//!
//! Registration, category and product management, reviews, and wishlists.
//! Products are owned by vendors; only the owning vendor or an admin may
//! mutate them.

use bazaar_commerce::account::{Role, User};
use bazaar_commerce::catalog::{Category, Product, Review, WishlistEntry};
use bazaar_commerce::error::MarketError;
use bazaar_commerce::ids::{CategoryId, ProductId, UserId};
use bazaar_commerce::money::Money;
use bazaar_store::MarketStore;
use std::sync::Arc;
use tracing::debug;

/// Catalog mutation engine.
pub struct CatalogEngine<S> {
    store: Arc<S>,
}

impl<S: MarketStore> CatalogEngine<S> {
    /// Create a catalog engine over a store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new user. Usernames and emails are unique.
    pub fn register_user(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<User, MarketError> {
        let user = User::new(username, email, role)?;
        self.store.insert_user(user.clone())?;
        debug!(user = %user.id, role = role.as_str(), "registered user");
        Ok(user)
    }

    /// Create a category, optionally nested under a root category.
    pub fn create_category(
        &self,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent_id: Option<&CategoryId>,
    ) -> Result<Category, MarketError> {
        let category = match parent_id {
            Some(parent_id) => {
                let parent = self
                    .store
                    .category(parent_id)
                    .ok_or_else(|| MarketError::CategoryNotFound(parent_id.as_str().to_string()))?;
                Category::new_child(&parent, name, slug)?
            }
            None => Category::new_root(name, slug),
        };
        self.store.insert_category(category.clone())?;
        debug!(category = %category.id, slug = %category.slug, "created category");
        Ok(category)
    }

    /// Create a product owned by a vendor.
    pub fn create_product(
        &self,
        vendor_id: &UserId,
        category_id: &CategoryId,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Result<Product, MarketError> {
        let vendor = self
            .store
            .user(vendor_id)
            .ok_or_else(|| MarketError::UserNotFound(vendor_id.as_str().to_string()))?;
        if !vendor.is_vendor() {
            return Err(MarketError::Forbidden {
                user: vendor_id.as_str().to_string(),
                action: "own products".to_string(),
            });
        }

        let product = Product::new(
            vendor_id.clone(),
            category_id.clone(),
            name,
            slug,
            price,
            stock,
        )?;
        self.store.insert_product(product.clone())?;
        debug!(product = %product.id, vendor = %vendor_id, "created product");
        Ok(product)
    }

    /// Replace a product record on behalf of its vendor or an admin.
    pub fn update_product(
        &self,
        actor: &UserId,
        product: Product,
    ) -> Result<Product, MarketError> {
        let existing = self
            .store
            .product(&product.id)
            .ok_or_else(|| MarketError::ProductNotFound(product.id.as_str().to_string()))?;
        self.authorize_product_mutation(actor, &existing)?;

        if product.price.is_negative() {
            return Err(MarketError::Validation("price must not be negative".into()));
        }
        if product.stock < 0 {
            return Err(MarketError::Validation("stock must not be negative".into()));
        }

        let mut product = product;
        product.touch();
        self.store.update_product(product.clone())?;
        debug!(product = %product.id, actor = %actor, "updated product");
        Ok(product)
    }

    /// Delete a product on behalf of its vendor or an admin.
    pub fn delete_product(&self, actor: &UserId, product_id: &ProductId) -> Result<(), MarketError> {
        let existing = self
            .store
            .product(product_id)
            .ok_or_else(|| MarketError::ProductNotFound(product_id.as_str().to_string()))?;
        self.authorize_product_mutation(actor, &existing)?;

        self.store.delete_product(product_id);
        debug!(product = %product_id, actor = %actor, "deleted product");
        Ok(())
    }

    /// Add a review for a product. Repeat reviews are permitted.
    pub fn add_review(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<Review, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        let review = Review::new(user_id.clone(), product_id.clone(), rating, comment)?;
        self.store.insert_review(review.clone())?;
        Ok(review)
    }

    /// All reviews for a product.
    pub fn reviews_for_product(&self, product_id: &ProductId) -> Vec<Review> {
        self.store.reviews_for_product(product_id)
    }

    /// Save a product to the user's wishlist.
    ///
    /// Returns false if the product was already saved (set semantics).
    pub fn add_to_wishlist(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        if self.store.product(product_id).is_none() {
            return Err(MarketError::ProductNotFound(product_id.as_str().to_string()));
        }
        Ok(self
            .store
            .add_wishlist(WishlistEntry::new(user_id.clone(), product_id.clone())))
    }

    /// Remove a product from the user's wishlist.
    pub fn remove_from_wishlist(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        Ok(self.store.remove_wishlist(user_id, product_id))
    }

    /// The user's wishlist.
    pub fn wishlist(&self, user_id: &UserId) -> Result<Vec<WishlistEntry>, MarketError> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::Unauthorized(user_id.as_str().to_string()));
        }
        Ok(self.store.wishlist_for_user(user_id))
    }

    /// Owning vendor or admin; everyone else is forbidden.
    fn authorize_product_mutation(
        &self,
        actor: &UserId,
        product: &Product,
    ) -> Result<(), MarketError> {
        let actor_user = self
            .store
            .user(actor)
            .ok_or_else(|| MarketError::Unauthorized(actor.as_str().to_string()))?;
        if product.vendor_id != *actor && !actor_user.is_admin() {
            return Err(MarketError::Forbidden {
                user: actor.as_str().to_string(),
                action: "modify this product".to_string(),
            });
        }
        Ok(())
    }
}
