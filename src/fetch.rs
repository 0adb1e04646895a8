// Product fetch strategy.
// Picks a data source from the network signal: offline sessions read the
// cache only, online-or-unknown sessions try the live API and fall back to
// the cache on failure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::Product;
use crate::cache::ProductCache;
use crate::error::{CatalogError, Result};
use crate::network::NetworkState;
use crate::store::KvStore;

/// Source of live product data. The HTTP client implements this; tests
/// substitute stubs so the fallback chain runs without a network.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// Result of a load attempt: the product list plus whether it was served
/// from cache rather than a live fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub products: Vec<Product>,
    /// True when the data came from cache, regardless of what the network
    /// monitor currently reports.
    pub offline_mode: bool,
}

/// Orchestrates the live-then-cache fallback chain.
pub struct FetchStrategy<A, S>
where
    A: ProductSource,
    S: KvStore + 'static,
{
    source: Arc<A>,
    cache: ProductCache<S>,
}

impl<A, S> FetchStrategy<A, S>
where
    A: ProductSource,
    S: KvStore + 'static,
{
    pub fn new(source: Arc<A>, cache: ProductCache<S>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ProductCache<S> {
        &self.cache
    }

    /// Load the product list for the given network state.
    ///
    /// Offline: cache only; a miss is fatal for this attempt. Online or
    /// unknown: live fetch first; on success the result is cached without
    /// blocking the return, on failure the cache is consulted and a hit is
    /// served in offline mode. Only when both the API and the cache come up
    /// empty does the original transport error surface.
    pub async fn load(&self, network: NetworkState) -> Result<LoadOutcome> {
        if network.is_offline() {
            let products = self
                .cache
                .read_or_fail()
                .await
                .map_err(|_| CatalogError::NoConnectivityAndNoCache)?;
            return Ok(LoadOutcome {
                products,
                offline_mode: true,
            });
        }

        match self.source.fetch_products().await {
            Ok(products) => {
                // Fire-and-forget cache refresh.
                let cache = self.cache.clone();
                let snapshot = products.clone();
                tokio::spawn(async move {
                    cache.write(&snapshot).await;
                });

                Ok(LoadOutcome {
                    products,
                    offline_mode: false,
                })
            }
            Err(err) => {
                tracing::debug!(error = %err, "live fetch failed, trying cache");
                match self.cache.read().await {
                    Some(products) => Ok(LoadOutcome {
                        products,
                        offline_mode: true,
                    }),
                    None => Err(err),
                }
            }
        }
    }
}
