use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use storage::KeyValueStore;
use tokio::net::TcpListener;

use crate::{
    cart::CartView,
    surface::{CartRenderer, CatalogSurface, OrderButtonState, ProductCard},
};

#[derive(Default)]
pub(crate) struct RecordingSurface {
    cards: Mutex<Vec<ProductCard>>,
    replacements: Mutex<usize>,
    buttons: Mutex<HashMap<usize, Vec<OrderButtonState>>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub(crate) fn with_cards(cards: Vec<ProductCard>) -> Self {
        let surface = Self::default();
        *surface.cards.lock().expect("cards") = cards;
        surface
    }

    pub(crate) fn cards(&self) -> Vec<ProductCard> {
        self.cards.lock().expect("cards").clone()
    }

    pub(crate) fn replacements(&self) -> usize {
        *self.replacements.lock().expect("replacements")
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.alerts.lock().expect("alerts").clone()
    }

    pub(crate) fn button_history(&self, card: usize) -> Vec<OrderButtonState> {
        self.buttons
            .lock()
            .expect("buttons")
            .get(&card)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn button(&self, card: usize) -> Option<OrderButtonState> {
        self.button_history(card).last().copied()
    }
}

impl CatalogSurface for RecordingSurface {
    fn replace_cards(&self, cards: &[ProductCard]) {
        *self.cards.lock().expect("cards") = cards.to_vec();
        *self.replacements.lock().expect("replacements") += 1;
    }

    fn set_order_button(&self, card: usize, state: OrderButtonState) {
        self.buttons
            .lock()
            .expect("buttons")
            .entry(card)
            .or_default()
            .push(state);
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().expect("alerts").push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) renders: Vec<CartView>,
    pub(crate) dialog_open: bool,
    pub(crate) dialog_changes: usize,
}

impl RecordingRenderer {
    pub(crate) fn last(&self) -> &CartView {
        self.renders.last().expect("at least one render")
    }
}

impl CartRenderer for RecordingRenderer {
    fn render_cart(&mut self, view: &CartView) {
        self.renders.push(view.clone());
    }

    fn set_order_dialog(&mut self, open: bool) {
        self.dialog_open = open;
        self.dialog_changes += 1;
    }
}

/// Reads succeed with whatever it was seeded with; writes always fail.
pub(crate) struct ReadOnlyStore {
    seeded: Option<String>,
}

impl ReadOnlyStore {
    pub(crate) fn new(seeded: Option<&str>) -> Self {
        Self {
            seeded: seeded.map(str::to_string),
        }
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(self.seeded.clone())
    }

    async fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("storage quota exceeded while writing '{key}'"))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn sample_products() -> serde_json::Value {
    json!([
        {"id": "1", "name": "Сіль", "price_per_kg": 20.0, "image_path": "/product_images/1.png"},
        {"id": "2", "name": "Цукор", "price_per_kg": 31.5, "image_path": "/product_images/2.jpg"},
        {"name": "Гречка", "price_per_kg": 48.0, "image_path": "/product_images/3.jpg"}
    ])
}

pub(crate) async fn spawn_server(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

pub(crate) async fn spawn_catalog_server() -> Result<String> {
    let app = Router::new()
        .route("/products", get(|| async { Json(sample_products()) }))
        .route(
            "/status",
            get(|| async {
                Json(json!({"status_code": 200, "status": "OK", "products_count": 3}))
            }),
        );
    spawn_server(app).await
}

pub(crate) async fn spawn_failing_catalog_server() -> Result<String> {
    let app = Router::new().route(
        "/products",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    spawn_server(app).await
}

pub(crate) fn shared_surface(surface: &Arc<RecordingSurface>) -> Arc<dyn CatalogSurface> {
    Arc::clone(surface) as Arc<dyn CatalogSurface>
}
