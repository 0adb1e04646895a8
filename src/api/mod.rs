// Remote product API module.
// Treated as an opaque HTTP endpoint returning the catalog as a JSON array.

pub mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{Product, Rating};
