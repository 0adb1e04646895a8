// Catalog load coordination.
// Drives the fetch strategy off network-status changes and dispatches
// actions against the view state. Every load attempt carries a sequence
// number; a completion that is no longer the latest attempt is discarded,
// so a slow stale load cannot overwrite a newer result.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::CatalogError;
use crate::fetch::{FetchStrategy, LoadOutcome, ProductSource};
use crate::network::NetworkState;
use crate::store::KvStore;

use super::catalog::{Action, CatalogState, SortOrder};

/// Owns the catalog view state and sequences loads against it.
pub struct CatalogCoordinator<A, S>
where
    A: ProductSource,
    S: KvStore + 'static,
{
    strategy: Arc<FetchStrategy<A, S>>,
    state: CatalogState,
    /// Sequence number of the most recently started load.
    load_seq: u64,
}

impl<A, S> CatalogCoordinator<A, S>
where
    A: ProductSource,
    S: KvStore + 'static,
{
    pub fn new(strategy: Arc<FetchStrategy<A, S>>) -> Self {
        Self {
            strategy,
            state: CatalogState::new(),
            load_seq: 0,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Begin a load attempt: set loading, clear error state, and hand back
    /// the attempt's sequence number.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.state.apply(Action::SetLoading(true));
        self.state.apply(Action::SetErrorFlag(false));
        self.state.apply(Action::SetError(None));
        self.load_seq
    }

    /// Complete a load attempt. A result whose sequence number is not the
    /// latest at completion time is dropped. Clearing the loading flag is
    /// the terminal step on both paths.
    pub fn complete_load(
        &mut self,
        seq: u64,
        outcome: Result<LoadOutcome, CatalogError>,
        network: NetworkState,
    ) {
        if seq != self.load_seq {
            tracing::debug!(seq, latest = self.load_seq, "discarding stale load result");
            return;
        }

        match outcome {
            Ok(LoadOutcome {
                products,
                offline_mode,
            }) => {
                self.state.apply(Action::InitialLoad(products));
                self.state.apply(Action::SetOfflineMode(offline_mode));
            }
            Err(err) => {
                self.state.apply(Action::SetError(Some(err.to_string())));
                self.state.apply(Action::SetErrorFlag(true));
                // Offline flag mirrors the network state at failure time.
                self.state
                    .apply(Action::SetOfflineMode(network.is_offline()));
            }
        }

        self.state.apply(Action::SetLoading(false));
    }

    /// Run one full load attempt for the given network state.
    pub async fn load(&mut self, network: NetworkState) {
        let seq = self.begin_load();
        let outcome = self.strategy.load(network).await;
        self.complete_load(seq, outcome, network);
    }

    /// Load once, then re-load on every network-status change until the
    /// monitor goes away.
    pub async fn run(&mut self, mut network_rx: watch::Receiver<NetworkState>) {
        loop {
            let network = *network_rx.borrow_and_update();
            self.load(network).await;

            if network_rx.changed().await.is_err() {
                break;
            }
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.state.apply(Action::SetCategory(category.into()));
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.apply(Action::SetSearch(search.into()));
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        self.state.apply(Action::SetSort(sort));
    }
}
