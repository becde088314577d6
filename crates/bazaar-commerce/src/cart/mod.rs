//! Shopping cart module.
//!
//! Contains the cart entity, the pure pricing calculator, and the
//! display view joined against live product data.

mod cart;
mod pricing;
mod view;

pub use cart::{Cart, CartItem};
pub use pricing::{price_lines, CartTotals, PricingRules};
pub use view::{CartLine, CartView};
