use std::sync::Arc;

use storage::KeyValueStore;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{CartAction, CartError, CartManager},
    catalog::CatalogLoader,
    feedback::FeedbackTimer,
    surface::CartRenderer,
};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("no catalog card at index {0}")]
    UnknownCard(usize),
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// One page session: the catalog, the cart, and the order-button feedback
/// that ties them together.
pub struct Storefront<S, R> {
    catalog: CatalogLoader,
    cart: CartManager<S, R>,
    feedback: FeedbackTimer,
}

impl<S: KeyValueStore, R: CartRenderer> Storefront<S, R> {
    pub fn new(catalog: CatalogLoader, cart: CartManager<S, R>) -> Self {
        Self::with_feedback(catalog, cart, FeedbackTimer::new())
    }

    pub fn with_feedback(
        catalog: CatalogLoader,
        cart: CartManager<S, R>,
        feedback: FeedbackTimer,
    ) -> Self {
        Self {
            catalog,
            cart,
            feedback,
        }
    }

    /// Loads the catalog. Failures are already logged and alerted by the
    /// loader, so this only reports whether cards are showing.
    pub async fn start(&mut self) -> bool {
        self.catalog.load_products().await.is_ok()
    }

    /// Order button on catalog card `card`. The button is disabled while it
    /// shows the confirmation, so clicks in that window do nothing.
    pub async fn order(&mut self, card: usize) -> Result<(), StorefrontError> {
        if self.feedback.is_confirming(card) {
            debug!(card, "order ignored: button still confirming");
            return Ok(());
        }

        let product = self
            .catalog
            .product(card)
            .cloned()
            .ok_or(StorefrontError::UnknownCard(card))?;

        let added = self.cart.add_to_cart(&product).await;
        self.feedback.confirm(card, Arc::clone(self.catalog.surface()));
        added.map_err(StorefrontError::from)
    }

    pub async fn dispatch(&mut self, action: CartAction) -> Result<(), StorefrontError> {
        self.cart.dispatch(action).await?;
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.feedback.cancel_all();
    }

    pub fn catalog(&self) -> &CatalogLoader {
        &self.catalog
    }

    pub fn cart(&self) -> &CartManager<S, R> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartManager<S, R> {
        &mut self.cart
    }

    pub fn feedback(&self) -> &FeedbackTimer {
        &self.feedback
    }
}

#[cfg(test)]
#[path = "tests/storefront_tests.rs"]
mod tests;
