use shared::{
    domain::{CartLine, Product},
    format::format_amount,
};
use storage::{load_json, save_json, KeyValueStore};
use thiserror::Error;
use tracing::{debug, warn};

use crate::surface::{CartRenderer, PRICE_PER_KG_UNIT};

pub const CART_STORAGE_KEY: &str = "cart";
pub const EMPTY_CART_MESSAGE: &str = "Ваша корзина порожня 😐";
pub const ORDER_ACTION_LABEL: &str = "Оформити замовлення";
const CURRENCY: &str = "грн";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart index {index} is out of range for {len} line(s)")]
    StaleIndex { index: usize, len: usize },
    #[error("failed to persist cart: {source:#}")]
    Storage { source: anyhow::Error },
}

/// User interaction on the cart panel, addressed by row index as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Increase(usize),
    Decrease(usize),
    SetCount(usize, String),
    Remove(usize),
    OpenOrderDialog,
    CloseOrderDialog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub index: usize,
    pub name: String,
    pub unit_price_label: String,
    pub count: u32,
    pub decrease_enabled: bool,
}

/// Everything the cart panel shows. Row indices are only valid for the view
/// they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CartView {
    Empty {
        message: &'static str,
    },
    Filled {
        rows: Vec<CartRow>,
        total: f64,
        total_label: String,
    },
}

impl CartView {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        if lines.is_empty() {
            return Self::Empty {
                message: EMPTY_CART_MESSAGE,
            };
        }

        let rows = lines
            .iter()
            .enumerate()
            .map(|(index, line)| CartRow {
                index,
                name: line.name.clone(),
                unit_price_label: format!("{} {PRICE_PER_KG_UNIT}", format_amount(line.price)),
                count: line.count,
                decrease_enabled: line.count > 1,
            })
            .collect();
        let total = cart_total(lines);
        Self::Filled {
            rows,
            total,
            total_label: format!("Разом: {} {CURRENCY}", format_amount(total)),
        }
    }

    pub fn rows(&self) -> &[CartRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Filled { rows, .. } => rows,
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            Self::Empty { .. } => 0.0,
            Self::Filled { total, .. } => *total,
        }
    }

    pub fn order_enabled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }

    pub fn order_label(&self) -> &'static str {
        ORDER_ACTION_LABEL
    }
}

pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Reads a manually typed count. Leading whitespace and sign are accepted and
/// trailing junk after the digits is ignored; anything that does not yield a
/// positive integer becomes 1.
pub fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return 1;
    }

    match digits.parse::<u32>() {
        Ok(0) => 1,
        Ok(count) => count,
        // Only digits remain, so the sole failure is overflow.
        Err(_) => u32::MAX,
    }
}

/// Owns the cart for one session. Every mutation persists the whole cart and
/// re-renders it.
pub struct CartManager<S, R> {
    lines: Vec<CartLine>,
    store: S,
    renderer: R,
    order_dialog_open: bool,
}

impl<S: KeyValueStore, R: CartRenderer> CartManager<S, R> {
    /// Restores the cart from `store` and renders it. Missing, unreadable or
    /// malformed stored data yields an empty cart.
    pub async fn load(store: S, renderer: R) -> Self {
        let lines = match load_json::<Vec<CartLine>, _>(&store, CART_STORAGE_KEY).await {
            Ok(Some(lines)) => normalize_lines(lines),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("stored cart discarded, starting empty: {err:#}");
                Vec::new()
            }
        };

        let mut manager = Self {
            lines,
            store,
            renderer,
            order_dialog_open: false,
        };
        manager.render();
        manager
    }

    pub async fn add_to_cart(&mut self, product: &Product) -> Result<(), CartError> {
        match self
            .lines
            .iter_mut()
            .find(|line| line.name == product.name)
        {
            Some(line) => line.count = line.count.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
        debug!(product = %product.name, "added to cart");
        self.commit().await
    }

    pub async fn increase(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.line_mut(index)?;
        line.count = line.count.saturating_add(1);
        self.commit().await
    }

    /// Floors at 1; removing a line is a separate action.
    pub async fn decrease(&mut self, index: usize) -> Result<(), CartError> {
        let line = self.line_mut(index)?;
        if line.count <= 1 {
            return Ok(());
        }
        line.count -= 1;
        self.commit().await
    }

    pub async fn set_count(&mut self, index: usize, raw: &str) -> Result<(), CartError> {
        let count = parse_count(raw);
        self.line_mut(index)?.count = count;
        self.commit().await
    }

    pub async fn remove(&mut self, index: usize) -> Result<(), CartError> {
        self.line_mut(index)?;
        let removed = self.lines.remove(index);
        debug!(product = %removed.name, "removed from cart");
        if self.lines.is_empty() && self.order_dialog_open {
            self.close_order_dialog();
        }
        self.commit().await
    }

    pub async fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        match action {
            CartAction::Increase(index) => self.increase(index).await,
            CartAction::Decrease(index) => self.decrease(index).await,
            CartAction::SetCount(index, raw) => self.set_count(index, &raw).await,
            CartAction::Remove(index) => self.remove(index).await,
            CartAction::OpenOrderDialog => {
                self.open_order_dialog();
                Ok(())
            }
            CartAction::CloseOrderDialog => {
                self.close_order_dialog();
                Ok(())
            }
        }
    }

    /// Opens the confirmation dialog. The order action is disabled for an
    /// empty cart, so this returns `false` and does nothing then.
    pub fn open_order_dialog(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.order_dialog_open = true;
        self.renderer.set_order_dialog(true);
        true
    }

    pub fn close_order_dialog(&mut self) {
        self.order_dialog_open = false;
        self.renderer.set_order_dialog(false);
    }

    pub fn render(&mut self) {
        let view = self.view();
        self.renderer.render_cart(&view);
    }

    pub fn view(&self) -> CartView {
        CartView::from_lines(&self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        cart_total(&self.lines)
    }

    pub fn is_order_dialog_open(&self) -> bool {
        self.order_dialog_open
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine, CartError> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CartError::StaleIndex { index, len })
    }

    async fn commit(&mut self) -> Result<(), CartError> {
        let persisted = save_json(&self.store, CART_STORAGE_KEY, &self.lines).await;
        self.render();
        persisted.map_err(|source| {
            warn!("cart kept in memory only: {source:#}");
            CartError::Storage { source }
        })
    }
}

/// Restores the line invariants on data written by an older or foreign
/// client: counts of at least 1 and one line per name.
fn normalize_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut normalized: Vec<CartLine> = Vec::with_capacity(lines.len());
    for mut line in lines {
        line.count = line.count.max(1);
        match normalized.iter_mut().find(|kept| kept.name == line.name) {
            Some(kept) => kept.count = kept.count.saturating_add(line.count),
            None => normalized.push(line),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
