use std::sync::Arc;

use reqwest::Client;
use shared::{
    domain::Product,
    error::{ApiError, ApiException},
    protocol::StatusResponse,
};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::surface::{CatalogSurface, ProductCard, CATALOG_LOAD_FAILED};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog API base '{base}': {source}")]
    InvalidBaseUrl {
        base: String,
        source: url::ParseError,
    },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog request rejected: {0}")]
    Rejected(#[from] ApiException),
    #[error("catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP access to the catalog backend.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    api_base: String,
}

impl CatalogClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_http(Client::new(), api_base)
    }

    pub fn with_http(http: Client, api_base: impl Into<String>) -> Result<Self, CatalogError> {
        let raw = api_base.into();
        let trimmed = raw.trim();
        Url::parse(trimmed).map_err(|source| CatalogError::InvalidBaseUrl {
            base: raw.clone(),
            source,
        })?;
        let api_base = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();
        Ok(Self { http, api_base })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("products").await
    }

    pub async fn fetch_status(&self) -> Result<StatusResponse, CatalogError> {
        self.get_json("status").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(format!("{}/{path}", self.api_base))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiException::from(ApiError::from_status(status.as_u16())).into());
        }
        // Decode from bytes so a bad body surfaces as `Decode`, not `Transport`.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Fetches the catalog once and renders one card per product.
pub struct CatalogLoader {
    client: CatalogClient,
    surface: Arc<dyn CatalogSurface>,
    products: Vec<Product>,
}

impl CatalogLoader {
    pub fn new(client: CatalogClient, surface: Arc<dyn CatalogSurface>) -> Self {
        Self {
            client,
            surface,
            products: Vec::new(),
        }
    }

    /// On failure the surface keeps whatever it showed before, gets exactly one
    /// alert, and the error is handed back for the caller to inspect.
    pub async fn load_products(&mut self) -> Result<usize, CatalogError> {
        let products = match self.client.fetch_products().await {
            Ok(products) => products,
            Err(err) => {
                error!(api_base = %self.client.api_base(), "catalog load failed: {err}");
                self.surface.alert(CATALOG_LOAD_FAILED);
                return Err(err);
            }
        };

        let cards: Vec<ProductCard> = products
            .iter()
            .map(|product| ProductCard::from_product(product, self.client.api_base()))
            .collect();
        self.surface.replace_cards(&cards);
        info!(count = products.len(), "catalog loaded");

        self.products = products;
        Ok(self.products.len())
    }

    pub fn product(&self, card: usize) -> Option<&Product> {
        self.products.get(card)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn surface(&self) -> &Arc<dyn CatalogSurface> {
        &self.surface
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
