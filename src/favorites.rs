// Favorites store.
// A persisted set of favorited product ids, independent of the product
// cache lifecycle. Favorites never expire.

use std::sync::Arc;

use crate::persisted::PersistedState;
use crate::store::{FAVORITES_KEY, KvStore};

/// Persisted, ordered set of favorited product ids.
///
/// Order is insertion order; uniqueness is enforced on toggle. Each toggle
/// is one hydrate → mutate → persist cycle, so observers see one consistent
/// set before and after.
pub struct FavoritesStore<S: KvStore> {
    state: PersistedState<Vec<u64>, S>,
}

impl<S: KvStore> FavoritesStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            state: PersistedState::new(store, FAVORITES_KEY, Vec::new()),
        }
    }

    /// Flip membership for `product_id` and persist the new set. Returns
    /// true when the product is favorited after the toggle.
    pub async fn toggle(&mut self, product_id: u64) -> bool {
        let mut now_favorited = false;
        self.state
            .update(|ids| {
                if let Some(pos) = ids.iter().position(|&id| id == product_id) {
                    ids.remove(pos);
                } else {
                    ids.push(product_id);
                    now_favorited = true;
                }
            })
            .await;
        now_favorited
    }

    /// Whether `product_id` is currently favorited.
    pub async fn contains(&mut self, product_id: u64) -> bool {
        self.state.hydrate().await.contains(&product_id)
    }

    /// The current favorites, in insertion order.
    pub async fn ids(&mut self) -> &[u64] {
        self.state.hydrate().await
    }
}
