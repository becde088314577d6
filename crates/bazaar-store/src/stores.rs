//! Per-entity store traits.
//!
//! The engines are generic over these interfaces; anything that can hold
//! the records and honor the unique-key and atomicity contracts can back
//! the marketplace.

use bazaar_commerce::account::User;
use bazaar_commerce::cart::Cart;
use bazaar_commerce::catalog::{Category, Product, Review, WishlistEntry};
use bazaar_commerce::checkout::Order;
use bazaar_commerce::error::MarketError;
use bazaar_commerce::ids::{CategoryId, OrderId, ProductId, UserId};

/// User records. Usernames and emails are unique.
pub trait UserStore: Send + Sync {
    /// Insert a new user, rejecting duplicate usernames or emails.
    fn insert_user(&self, user: User) -> Result<(), MarketError>;

    /// Look up a user by id.
    fn user(&self, id: &UserId) -> Option<User>;
}

/// Category records. Slugs are unique; nesting is at most one level.
pub trait CategoryStore: Send + Sync {
    /// Insert a new category, rejecting duplicate slugs and parents that
    /// are missing or themselves subcategories.
    fn insert_category(&self, category: Category) -> Result<(), MarketError>;

    /// Look up a category by id.
    fn category(&self, id: &CategoryId) -> Option<Category>;
}

/// Product records and the stock counter.
pub trait ProductStore: Send + Sync {
    /// Insert a new product, rejecting duplicate slugs and writes that
    /// reference a nonexistent vendor or category.
    fn insert_product(&self, product: Product) -> Result<(), MarketError>;

    /// Look up a product by id.
    fn product(&self, id: &ProductId) -> Option<Product>;

    /// Replace an existing product record.
    fn update_product(&self, product: Product) -> Result<(), MarketError>;

    /// Delete a product. Returns whether a record was removed.
    fn delete_product(&self, id: &ProductId) -> bool;

    /// Current stock for a product.
    fn stock(&self, id: &ProductId) -> Result<i64, MarketError>;

    /// Decrement stock if sufficient, atomically per product.
    ///
    /// Concurrent decrements of the same product never interleave: either
    /// the full quantity is deducted or the call fails with
    /// `InsufficientStock` and the counter is untouched. Stock never goes
    /// negative.
    fn decrement_stock(&self, id: &ProductId, quantity: i64) -> Result<(), MarketError>;

    /// Add stock back (restocks and order-placement compensation).
    fn restock(&self, id: &ProductId, quantity: i64) -> Result<(), MarketError>;
}

/// Cart records, keyed by user: one cart per user.
pub trait CartStore: Send + Sync {
    /// Look up a user's cart.
    fn cart(&self, user_id: &UserId) -> Option<Cart>;

    /// Insert or replace a user's cart.
    fn save_cart(&self, cart: Cart) -> Result<(), MarketError>;
}

/// Order records.
pub trait OrderStore: Send + Sync {
    /// Insert a new order.
    fn insert_order(&self, order: Order) -> Result<(), MarketError>;

    /// Look up an order by id.
    fn order(&self, id: &OrderId) -> Option<Order>;

    /// Replace an existing order record (status transitions).
    fn update_order(&self, order: Order) -> Result<(), MarketError>;

    /// All orders placed by a user, oldest first.
    fn orders_for_user(&self, user_id: &UserId) -> Vec<Order>;
}

/// Review records. Repeat reviews per (user, product) are permitted.
pub trait ReviewStore: Send + Sync {
    /// Append a review.
    fn insert_review(&self, review: Review) -> Result<(), MarketError>;

    /// All reviews for a product, oldest first.
    fn reviews_for_product(&self, product_id: &ProductId) -> Vec<Review>;
}

/// Wishlist records with set semantics.
pub trait WishlistStore: Send + Sync {
    /// Add an entry. Returns false (and stores nothing) if the product is
    /// already on the user's wishlist.
    fn add_wishlist(&self, entry: WishlistEntry) -> bool;

    /// Remove an entry. Returns whether one was present.
    fn remove_wishlist(&self, user_id: &UserId, product_id: &ProductId) -> bool;

    /// A user's wishlist, oldest first.
    fn wishlist_for_user(&self, user_id: &UserId) -> Vec<WishlistEntry>;
}

/// The full record store the engines are built against.
pub trait MarketStore:
    UserStore
    + CategoryStore
    + ProductStore
    + CartStore
    + OrderStore
    + ReviewStore
    + WishlistStore
{
}

impl<T> MarketStore for T where
    T: UserStore
        + CategoryStore
        + ProductStore
        + CartStore
        + OrderStore
        + ReviewStore
        + WishlistStore
{
}
