// Product API response types.
// Defines structs for deserializing the remote catalog endpoint.

use serde::{Deserialize, Serialize};

/// A single product record from the catalog.
///
/// Products are immutable once fetched; the data layer only changes which
/// products are visible and in what order, never the records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    /// Image URI for the presentation layer.
    pub image: String,
    pub category: String,
    pub rating: Rating,
}

/// Aggregate rating attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}
