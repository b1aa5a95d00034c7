//! Storefront client: catalog loading and the persisted shopping cart.
//!
//! Presentation is injected through the traits in [`surface`], persistence
//! through [`storage::KeyValueStore`], so every component runs without a
//! real page or database.

pub mod cart;
pub mod catalog;
pub mod feedback;
pub mod storefront;
pub mod surface;

pub use cart::{parse_count, CartAction, CartError, CartManager, CartRow, CartView};
pub use catalog::{CatalogClient, CatalogError, CatalogLoader};
pub use feedback::FeedbackTimer;
pub use storefront::{Storefront, StorefrontError};
pub use surface::{CartRenderer, CatalogSurface, OrderButtonState, ProductCard};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
