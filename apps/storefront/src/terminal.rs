//! Stdout rendering of the catalog grid and the cart panel.

use client_core::{CartRenderer, CartView, CatalogSurface, OrderButtonState, ProductCard};

pub const ORDER_DIALOG_TEXT: &str = "Дякуємо! Ваше замовлення прийнято, ми зв'яжемося з вами.";

pub struct TerminalCatalog;

impl CatalogSurface for TerminalCatalog {
    fn replace_cards(&self, cards: &[ProductCard]) {
        for (position, card) in cards.iter().enumerate() {
            println!(
                "{:>3}. {}  {}  <{}>  [{}]",
                position + 1,
                card.name,
                card.price_label,
                card.image_url,
                card.order_label
            );
        }
    }

    fn set_order_button(&self, card: usize, state: OrderButtonState) {
        if state == OrderButtonState::Confirmed {
            println!("{:>3}. {}", card + 1, state.label());
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

/// Keeps only the latest view so a command prints the cart once, after it ran.
#[derive(Default)]
pub struct TerminalCart {
    last: Option<CartView>,
}

impl TerminalCart {
    pub fn print(&self) {
        let Some(view) = &self.last else {
            return;
        };
        match view {
            CartView::Empty { message } => {
                println!("{message}");
                println!("[{}] (disabled)", view.order_label());
            }
            CartView::Filled {
                rows, total_label, ..
            } => {
                for row in rows {
                    let decrease = if row.decrease_enabled { "-" } else { " " };
                    println!(
                        "{:>3}. {}  {}  [{decrease}] {} кг [+]  [x]",
                        row.index + 1,
                        row.name,
                        row.unit_price_label,
                        row.count
                    );
                }
                println!("{total_label}");
                println!("[{}]", view.order_label());
            }
        }
    }
}

impl CartRenderer for TerminalCart {
    fn render_cart(&mut self, view: &CartView) {
        self.last = Some(view.clone());
    }

    fn set_order_dialog(&mut self, open: bool) {
        if open {
            println!("*** {ORDER_DIALOG_TEXT} ***");
        }
    }
}
