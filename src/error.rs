// Error types for the catalog data layer.
// Covers transport failures, cache misses, and the offline dead end.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("product API error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No cached products available")]
    NoCachedData,

    #[error("No internet connection and no cached data available")]
    NoConnectivityAndNoCache,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
