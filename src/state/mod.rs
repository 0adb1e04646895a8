// Catalog state module.
// Pure view-state transitions plus the async coordinator that drives them.

pub mod catalog;
pub mod coordinator;

pub use catalog::{Action, CatalogState, SortOrder, derive_visible};
pub use coordinator::CatalogCoordinator;
