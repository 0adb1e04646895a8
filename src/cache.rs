// Product cache over the durable store.
// Wraps the product list in a timestamped envelope and applies lazy expiry:
// an envelope past its TTL is treated as absent and removed on read.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Product;
use crate::error::{CatalogError, Result};
use crate::store::{KvStore, PRODUCTS_CACHE_KEY};

/// How long a cached product list stays servable: 24 hours.
pub fn cache_ttl() -> Duration {
    Duration::hours(24)
}

/// Stored product list with the instant it was written.
///
/// The timestamp is the time of the most recent successful write; an
/// envelope cannot exist without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedProducts {
    pub data: Vec<Product>,
    pub timestamp: DateTime<Utc>,
}

impl CachedProducts {
    fn new(data: Vec<Product>) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }

    /// Whether this envelope is older than the TTL. Strict: one millisecond
    /// past the threshold counts as expired.
    fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.timestamp) > ttl
    }
}

/// Cache for the remote product list.
///
/// Best-effort, not authoritative: every persistence failure is logged and
/// absorbed here, so callers only ever observe "data" or "no data".
pub struct ProductCache<S: KvStore> {
    store: Arc<S>,
}

// Manual impl so S itself does not need Clone.
impl<S: KvStore> Clone for ProductCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KvStore> ProductCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a fresh product list, stamped with the current time.
    ///
    /// Never fails the caller: a store or serialization failure is logged
    /// and swallowed.
    pub async fn write(&self, products: &[Product]) {
        let envelope = CachedProducts::new(products.to_vec());
        let json = match serde_json::to_string(&envelope) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize product cache envelope");
                return;
            }
        };

        match self.store.set(PRODUCTS_CACHE_KEY, &json).await {
            Ok(()) => {
                tracing::debug!(count = products.len(), "cached product list");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to write product cache");
            }
        }
    }

    /// Read the cached product list, if present and fresh.
    ///
    /// Returns `None` when the envelope is absent, unreadable, unparsable,
    /// or expired. An expired envelope is deleted as a side effect, so the
    /// next read sees a clean miss.
    pub async fn read(&self) -> Option<Vec<Product>> {
        let raw = match self.store.get(PRODUCTS_CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read product cache");
                return None;
            }
        };

        let envelope: CachedProducts = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparsable product cache envelope");
                return None;
            }
        };

        if envelope.is_expired(cache_ttl()) {
            tracing::debug!(written_at = %envelope.timestamp, "product cache expired, removing");
            self.clear().await;
            return None;
        }

        Some(envelope.data)
    }

    /// Read the cached product list, failing with `NoCachedData` on a miss.
    ///
    /// Used by the offline path, where an empty result is not acceptable.
    pub async fn read_or_fail(&self) -> Result<Vec<Product>> {
        self.read().await.ok_or(CatalogError::NoCachedData)
    }

    /// Remove the cached envelope. Non-fatal on underlying failure.
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(PRODUCTS_CACHE_KEY).await {
            tracing::warn!(error = %e, "failed to clear product cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Rating;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price,
            description: "desc".to_string(),
            image: format!("https://example.com/{}.jpg", id),
            category: "misc".to_string(),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    /// Store whose writes and removals always fail.
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KvStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), StoreError> {
            Err(StoreError::Write("store is read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> std::result::Result<(), StoreError> {
            Err(StoreError::Write("store is read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let cache = ProductCache::new(Arc::new(MemoryStore::new()));
        let products = vec![product(1, 10.0), product(2, 5.0)];

        cache.write(&products).await;
        assert_eq!(cache.read().await, Some(products));
    }

    #[tokio::test]
    async fn test_read_empty_cache() {
        let cache = ProductCache::new(Arc::new(MemoryStore::new()));
        assert_eq!(cache.read().await, None);
    }

    #[tokio::test]
    async fn test_expired_envelope_is_absent_and_deleted() {
        let store = Arc::new(MemoryStore::new());
        let cache = ProductCache::new(Arc::clone(&store));

        // Plant an envelope 1ms past the 24h threshold.
        let envelope = CachedProducts {
            data: vec![product(1, 10.0)],
            timestamp: Utc::now() - cache_ttl() - Duration::milliseconds(1),
        };
        store
            .set(PRODUCTS_CACHE_KEY, &serde_json::to_string(&envelope).unwrap())
            .await
            .unwrap();

        assert_eq!(cache.read().await, None);

        // No resurrection: the stale envelope was physically removed.
        assert_eq!(store.get(PRODUCTS_CACHE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_envelope_just_inside_ttl_is_served() {
        let store = Arc::new(MemoryStore::new());
        let cache = ProductCache::new(Arc::clone(&store));

        let products = vec![product(3, 7.0)];
        let envelope = CachedProducts {
            data: products.clone(),
            timestamp: Utc::now() - cache_ttl() + Duration::seconds(5),
        };
        store
            .set(PRODUCTS_CACHE_KEY, &serde_json::to_string(&envelope).unwrap())
            .await
            .unwrap();

        assert_eq!(cache.read().await, Some(products));
    }

    #[tokio::test]
    async fn test_unparsable_envelope_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        let cache = ProductCache::new(Arc::clone(&store));

        store
            .set(PRODUCTS_CACHE_KEY, "not json at all")
            .await
            .unwrap();

        assert_eq!(cache.read().await, None);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let cache = ProductCache::new(Arc::new(ReadOnlyStore {
            inner: MemoryStore::new(),
        }));

        // Must not panic or surface an error.
        cache.write(&[product(1, 10.0)]).await;
        cache.clear().await;
    }

    #[tokio::test]
    async fn test_read_or_fail_on_miss() {
        let cache = ProductCache::new(Arc::new(MemoryStore::new()));
        let err = cache.read_or_fail().await.unwrap_err();
        assert!(matches!(err, CatalogError::NoCachedData));
    }

    #[tokio::test]
    async fn test_read_or_fail_on_hit() {
        let cache = ProductCache::new(Arc::new(MemoryStore::new()));
        let products = vec![product(9, 1.25)];
        cache.write(&products).await;
        assert_eq!(cache.read_or_fail().await.unwrap(), products);
    }

    #[tokio::test]
    async fn test_clear_removes_envelope() {
        let store = Arc::new(MemoryStore::new());
        let cache = ProductCache::new(Arc::clone(&store));

        cache.write(&[product(1, 10.0)]).await;
        cache.clear().await;
        assert_eq!(cache.read().await, None);
    }
}
