//! Render targets the host provides: a catalog grid and a cart panel.

use shared::{domain::Product, format::format_amount};

pub const PRICE_PER_KG_UNIT: &str = "грн/кг";
pub const ORDER_LABEL: &str = "Замовити";
pub const ADDED_CONFIRMATION: &str = "✅ Успішно додано";
pub const CATALOG_LOAD_FAILED: &str = "Не вдалося завантажити товари 😢";

/// Catalog container. Methods take `&self` because pending button timers hold
/// a shared handle to the surface; implementations use interior mutability
/// the way a DOM node handle would.
pub trait CatalogSurface: Send + Sync {
    /// Replaces every card in the container.
    fn replace_cards(&self, cards: &[ProductCard]);
    fn set_order_button(&self, card: usize, state: OrderButtonState);
    fn alert(&self, message: &str);
}

/// Cart panel plus the order confirmation dialog.
pub trait CartRenderer: Send {
    /// Called after every mutation with the complete view; the previous
    /// rendering is discarded.
    fn render_cart(&mut self, view: &crate::cart::CartView);
    fn set_order_dialog(&mut self, open: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub price_label: String,
    pub image_url: String,
    pub order_label: &'static str,
}

impl ProductCard {
    pub fn from_product(product: &Product, api_base: &str) -> Self {
        Self {
            name: product.name.clone(),
            price_label: format!("{} {PRICE_PER_KG_UNIT}", format_amount(product.price_per_kg)),
            image_url: product.image_url(api_base),
            order_label: ORDER_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderButtonState {
    Ready,
    Confirmed,
}

impl OrderButtonState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => ORDER_LABEL,
            Self::Confirmed => ADDED_CONFIRMATION,
        }
    }

    pub fn is_disabled(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
