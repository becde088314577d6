//! In-memory record store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bazaar_commerce::account::User;
use bazaar_commerce::cart::Cart;
use bazaar_commerce::catalog::{Category, Product, Review, WishlistEntry};
use bazaar_commerce::checkout::Order;
use bazaar_commerce::error::MarketError;
use bazaar_commerce::ids::{CategoryId, OrderId, ProductId, UserId};

use crate::stores::{
    CartStore, CategoryStore, OrderStore, ProductStore, ReviewStore, UserStore, WishlistStore,
};

/// Thread-safe in-memory implementation of every store trait.
///
/// Each entity family lives behind its own `RwLock`, so operations on
/// unrelated entities proceed in parallel. Stock decrements take the
/// product-map write lock, which makes the check-and-decrement atomic
/// against every concurrent decrement.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    products: RwLock<HashMap<ProductId, Product>>,
    carts: RwLock<HashMap<UserId, Cart>>,
    orders: RwLock<Vec<Order>>,
    reviews: RwLock<Vec<Review>>,
    wishlists: RwLock<Vec<WishlistEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Acquire a read guard, recovering from a poisoned lock.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from a poisoned lock.
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl UserStore for MemoryStore {
    fn insert_user(&self, user: User) -> Result<(), MarketError> {
        let mut users = write(&self.users);
        if users.values().any(|u| u.username == user.username) {
            return Err(MarketError::AlreadyExists {
                entity: "user",
                field: "username",
                value: user.username,
            });
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(MarketError::AlreadyExists {
                entity: "user",
                field: "email",
                value: user.email,
            });
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn user(&self, id: &UserId) -> Option<User> {
        read(&self.users).get(id).cloned()
    }
}

impl CategoryStore for MemoryStore {
    fn insert_category(&self, category: Category) -> Result<(), MarketError> {
        let mut categories = write(&self.categories);
        if categories.values().any(|c| c.slug == category.slug) {
            return Err(MarketError::AlreadyExists {
                entity: "category",
                field: "slug",
                value: category.slug,
            });
        }
        if let Some(parent_id) = &category.parent_id {
            let parent = categories
                .get(parent_id)
                .ok_or_else(|| MarketError::CategoryNotFound(parent_id.as_str().to_string()))?;
            if parent.is_subcategory() || parent.id == category.id {
                return Err(MarketError::InvalidCategoryParent(
                    parent_id.as_str().to_string(),
                ));
            }
        }
        categories.insert(category.id.clone(), category);
        Ok(())
    }

    fn category(&self, id: &CategoryId) -> Option<Category> {
        read(&self.categories).get(id).cloned()
    }
}

impl ProductStore for MemoryStore {
    fn insert_product(&self, product: Product) -> Result<(), MarketError> {
        if self.user(&product.vendor_id).is_none() {
            return Err(MarketError::UserNotFound(
                product.vendor_id.as_str().to_string(),
            ));
        }
        if self.category(&product.category_id).is_none() {
            return Err(MarketError::CategoryNotFound(
                product.category_id.as_str().to_string(),
            ));
        }
        let mut products = write(&self.products);
        if products.values().any(|p| p.slug == product.slug) {
            return Err(MarketError::AlreadyExists {
                entity: "product",
                field: "slug",
                value: product.slug,
            });
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    fn product(&self, id: &ProductId) -> Option<Product> {
        read(&self.products).get(id).cloned()
    }

    fn update_product(&self, product: Product) -> Result<(), MarketError> {
        let mut products = write(&self.products);
        if !products.contains_key(&product.id) {
            return Err(MarketError::ProductNotFound(product.id.as_str().to_string()));
        }
        if products
            .values()
            .any(|p| p.slug == product.slug && p.id != product.id)
        {
            return Err(MarketError::AlreadyExists {
                entity: "product",
                field: "slug",
                value: product.slug,
            });
        }
        products.insert(product.id.clone(), product);
        Ok(())
    }

    fn delete_product(&self, id: &ProductId) -> bool {
        write(&self.products).remove(id).is_some()
    }

    fn stock(&self, id: &ProductId) -> Result<i64, MarketError> {
        read(&self.products)
            .get(id)
            .map(|p| p.stock)
            .ok_or_else(|| MarketError::ProductNotFound(id.as_str().to_string()))
    }

    fn decrement_stock(&self, id: &ProductId, quantity: i64) -> Result<(), MarketError> {
        let mut products = write(&self.products);
        let product = products
            .get_mut(id)
            .ok_or_else(|| MarketError::ProductNotFound(id.as_str().to_string()))?;
        if product.stock < quantity {
            return Err(MarketError::InsufficientStock {
                product: id.as_str().to_string(),
                requested: quantity,
                available: product.stock,
            });
        }
        product.stock -= quantity;
        product.touch();
        Ok(())
    }

    fn restock(&self, id: &ProductId, quantity: i64) -> Result<(), MarketError> {
        let mut products = write(&self.products);
        let product = products
            .get_mut(id)
            .ok_or_else(|| MarketError::ProductNotFound(id.as_str().to_string()))?;
        product.stock = product
            .stock
            .checked_add(quantity)
            .ok_or(MarketError::Overflow)?;
        product.touch();
        Ok(())
    }
}

impl CartStore for MemoryStore {
    fn cart(&self, user_id: &UserId) -> Option<Cart> {
        read(&self.carts).get(user_id).cloned()
    }

    fn save_cart(&self, cart: Cart) -> Result<(), MarketError> {
        write(&self.carts).insert(cart.user_id.clone(), cart);
        Ok(())
    }
}

impl OrderStore for MemoryStore {
    fn insert_order(&self, order: Order) -> Result<(), MarketError> {
        let mut orders = write(&self.orders);
        if orders.iter().any(|o| o.id == order.id) {
            return Err(MarketError::AlreadyExists {
                entity: "order",
                field: "id",
                value: order.id.as_str().to_string(),
            });
        }
        orders.push(order);
        Ok(())
    }

    fn order(&self, id: &OrderId) -> Option<Order> {
        read(&self.orders).iter().find(|o| &o.id == id).cloned()
    }

    fn update_order(&self, order: Order) -> Result<(), MarketError> {
        let mut orders = write(&self.orders);
        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| MarketError::OrderNotFound(order.id.as_str().to_string()))?;
        *slot = order;
        Ok(())
    }

    fn orders_for_user(&self, user_id: &UserId) -> Vec<Order> {
        read(&self.orders)
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl ReviewStore for MemoryStore {
    fn insert_review(&self, review: Review) -> Result<(), MarketError> {
        if self.user(&review.user_id).is_none() {
            return Err(MarketError::UserNotFound(
                review.user_id.as_str().to_string(),
            ));
        }
        if self.product(&review.product_id).is_none() {
            return Err(MarketError::ProductNotFound(
                review.product_id.as_str().to_string(),
            ));
        }
        write(&self.reviews).push(review);
        Ok(())
    }

    fn reviews_for_product(&self, product_id: &ProductId) -> Vec<Review> {
        read(&self.reviews)
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect()
    }
}

impl WishlistStore for MemoryStore {
    fn add_wishlist(&self, entry: WishlistEntry) -> bool {
        let mut wishlists = write(&self.wishlists);
        let present = wishlists
            .iter()
            .any(|w| w.user_id == entry.user_id && w.product_id == entry.product_id);
        if present {
            return false;
        }
        wishlists.push(entry);
        true
    }

    fn remove_wishlist(&self, user_id: &UserId, product_id: &ProductId) -> bool {
        let mut wishlists = write(&self.wishlists);
        let len_before = wishlists.len();
        wishlists.retain(|w| !(&w.user_id == user_id && &w.product_id == product_id));
        wishlists.len() < len_before
    }

    fn wishlist_for_user(&self, user_id: &UserId) -> Vec<WishlistEntry> {
        read(&self.wishlists)
            .iter()
            .filter(|w| &w.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_commerce::account::Role;
    use bazaar_commerce::money::Money;
    use std::sync::Arc;

    fn seeded_store() -> (MemoryStore, User, Category) {
        let store = MemoryStore::new();
        let vendor = User::new("acme", "acme@example.com", Role::Vendor).unwrap();
        store.insert_user(vendor.clone()).unwrap();
        let category = Category::new_root("Books", "books");
        store.insert_category(category.clone()).unwrap();
        (store, vendor, category)
    }

    fn seeded_product(store: &MemoryStore, vendor: &User, category: &Category, stock: i64) -> Product {
        let product = Product::new(
            vendor.id.clone(),
            category.id.clone(),
            "Rust in Practice",
            "rust-in-practice",
            Money::from_pounds(10, 0),
            stock,
        )
        .unwrap();
        store.insert_product(product.clone()).unwrap();
        product
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        store
            .insert_user(User::new("alice", "alice@example.com", Role::Customer).unwrap())
            .unwrap();
        let err = store
            .insert_user(User::new("alice", "other@example.com", Role::Customer).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::AlreadyExists {
                field: "username",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store
            .insert_user(User::new("alice", "alice@example.com", Role::Customer).unwrap())
            .unwrap();
        let err = store
            .insert_user(User::new("alicia", "alice@example.com", Role::Customer).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::AlreadyExists { field: "email", .. }
        ));
    }

    #[test]
    fn test_product_requires_existing_vendor_and_category() {
        let (store, vendor, category) = seeded_store();

        let orphan_vendor = Product::new(
            UserId::new("usr_ghost"),
            category.id.clone(),
            "X",
            "x",
            Money::new(100),
            1,
        )
        .unwrap();
        assert!(matches!(
            store.insert_product(orphan_vendor),
            Err(MarketError::UserNotFound(_))
        ));

        let orphan_category = Product::new(
            vendor.id.clone(),
            CategoryId::new("cat_ghost"),
            "X",
            "x",
            Money::new(100),
            1,
        )
        .unwrap();
        assert!(matches!(
            store.insert_product(orphan_category),
            Err(MarketError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_product_slug_rejected() {
        let (store, vendor, category) = seeded_store();
        seeded_product(&store, &vendor, &category, 5);

        let twin = Product::new(
            vendor.id.clone(),
            category.id.clone(),
            "Another",
            "rust-in-practice",
            Money::new(100),
            1,
        )
        .unwrap();
        assert!(matches!(
            store.insert_product(twin),
            Err(MarketError::AlreadyExists { field: "slug", .. })
        ));
    }

    #[test]
    fn test_subcategory_parent_rules() {
        let store = MemoryStore::new();
        let root = Category::new_root("Electronics", "electronics");
        store.insert_category(root.clone()).unwrap();
        let child = Category::new_child(&root, "Phones", "phones").unwrap();
        store.insert_category(child.clone()).unwrap();

        // Store-level check: a child constructed against a stale root that
        // has since become a subcategory is still rejected.
        let mut grandchild = Category::new_root("Android", "android");
        grandchild.parent_id = Some(child.id.clone());
        assert!(matches!(
            store.insert_category(grandchild),
            Err(MarketError::InvalidCategoryParent(_))
        ));

        let mut orphan = Category::new_root("Misc", "misc");
        orphan.parent_id = Some(CategoryId::new("cat_ghost"));
        assert!(matches!(
            store.insert_category(orphan),
            Err(MarketError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_decrement_stock_is_conditional() {
        let (store, vendor, category) = seeded_store();
        let product = seeded_product(&store, &vendor, &category, 5);

        store.decrement_stock(&product.id, 3).unwrap();
        let err = store.decrement_stock(&product.id, 3).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientStock {
                product: product.id.as_str().to_string(),
                requested: 3,
                available: 2,
            }
        );
        // The failed call deducted nothing.
        assert_eq!(store.stock(&product.id).unwrap(), 2);

        store.restock(&product.id, 1).unwrap();
        assert_eq!(store.stock(&product.id).unwrap(), 3);
    }

    #[test]
    fn test_concurrent_decrements_never_oversell() {
        let (store, vendor, category) = seeded_store();
        let product = seeded_product(&store, &vendor, &category, 10);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = product.id.clone();
                std::thread::spawn(move || store.decrement_stock(&id, 3).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|&ok| ok)
            .count();

        // 8 threads want 3 each from a stock of 10: exactly 3 can win.
        assert_eq!(successes, 3);
        assert_eq!(store.stock(&product.id).unwrap(), 1);
    }

    #[test]
    fn test_wishlist_set_semantics() {
        let (store, vendor, category) = seeded_store();
        let product = seeded_product(&store, &vendor, &category, 1);
        let user = UserId::new("usr_1");

        assert!(store.add_wishlist(WishlistEntry::new(user.clone(), product.id.clone())));
        assert!(!store.add_wishlist(WishlistEntry::new(user.clone(), product.id.clone())));
        assert_eq!(store.wishlist_for_user(&user).len(), 1);

        assert!(store.remove_wishlist(&user, &product.id));
        assert!(!store.remove_wishlist(&user, &product.id));
        assert!(store.wishlist_for_user(&user).is_empty());
    }

    #[test]
    fn test_repeat_reviews_are_appended() {
        let (store, vendor, category) = seeded_store();
        let product = seeded_product(&store, &vendor, &category, 1);
        let reviewer = User::new("bob", "bob@example.com", Role::Customer).unwrap();
        store.insert_user(reviewer.clone()).unwrap();

        for rating in [4, 5] {
            store
                .insert_review(
                    Review::new(reviewer.id.clone(), product.id.clone(), rating, None).unwrap(),
                )
                .unwrap();
        }
        assert_eq!(store.reviews_for_product(&product.id).len(), 2);
    }
}
