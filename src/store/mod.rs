// Durable key-value store abstraction.
// The catalog layer persists through this trait; concrete backends live in
// submodules (in-memory for tests and ephemeral sessions, file-backed for
// durable sessions).

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which the cached product envelope is stored.
pub const PRODUCTS_CACHE_KEY: &str = "cached_products";

/// Reserved key for a future explicit-expiry scheme. Declared but unused;
/// expiry is currently derived from the envelope timestamp.
pub const PRODUCTS_CACHE_EXPIRY_KEY: &str = "products_cache_expiry";

/// Key under which the favorites id list is stored.
pub const FAVORITES_KEY: &str = "favorites";

/// Failure in the persistence substrate.
///
/// These never cross the cache or favorites boundary: reads that fail are
/// treated as "no data" and writes that fail are logged and swallowed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Asynchronous durable string store.
///
/// Implementations must make each single-key operation atomic; no cross-key
/// transaction is offered or assumed.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
