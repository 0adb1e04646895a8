// Product API HTTP client.
// Fetches the catalog from the remote endpoint and maps non-2xx responses
// to transport errors.

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{CatalogError, Result};
use crate::fetch::ProductSource;

use super::types::Product;

const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";

/// HTTP client for the remote product catalog.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client against the default catalog endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a client against a specific base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("stockpile"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CatalogError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Make a GET request to the catalog API.
    async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        // Non-2xx is a transport failure for this layer.
        response
            .error_for_status()
            .map_err(CatalogError::Transport)
    }

    /// Fetch the whole product catalog. No pagination: the catalog is
    /// assumed to fit in one response.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        let response = self.get("/products").await?;
        let products: Vec<Product> = response.json().await?;
        Ok(products)
    }
}

#[async_trait]
impl ProductSource for CatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_products().await
    }
}
