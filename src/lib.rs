// Offline-resilient product catalog data layer.
// Fetches the catalog from a remote API, falls back to a timestamped cache
// when connectivity is gone, persists favorites, and exposes a reducer-style
// view state with category/search/sort filtering.

pub mod api;
pub mod cache;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod network;
pub mod persisted;
pub mod state;
pub mod store;

pub use api::{CatalogClient, Product, Rating};
pub use cache::{CachedProducts, ProductCache};
pub use error::{CatalogError, Result};
pub use favorites::FavoritesStore;
pub use fetch::{FetchStrategy, LoadOutcome, ProductSource};
pub use network::{ConnectivityProbe, NetworkMonitor, NetworkState, Reachability};
pub use persisted::PersistedState;
pub use state::{Action, CatalogCoordinator, CatalogState, SortOrder};
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
