use serde::{Deserialize, Serialize};

/// A catalog entry as served by `GET /products`. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price_per_kg: f64,
    pub image_path: String,
}

impl Product {
    pub fn new(name: impl Into<String>, price_per_kg: f64, image_path: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            price_per_kg,
            image_path: image_path.into(),
        }
    }

    /// The backend hands out paths relative to its own root, so the image URL
    /// is the API base with the path appended verbatim.
    pub fn image_url(&self, api_base: &str) -> String {
        format!("{api_base}{}", self.image_path)
    }
}

/// One distinct product in the cart, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub price: f64,
    pub count: u32,
}

impl CartLine {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price_per_kg,
            count: 1,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.count)
    }
}
