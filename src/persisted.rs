// Typed persisted state over the durable store.
// Lazily hydrates from storage and guards against clobbering persisted data
// with the in-memory default before the first read resolves.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::KvStore;

/// A value of type `T` mirrored to the durable store under a fixed key.
///
/// The value starts as the provided initial and is replaced by the stored
/// value on first access (lazy hydration). Mutations hydrate first, so a
/// default never overwrites data already on disk. Persistence failures are
/// logged and swallowed; the in-memory value stays authoritative for the
/// session.
pub struct PersistedState<T, S: KvStore> {
    key: String,
    store: Arc<S>,
    value: T,
    hydrated: bool,
}

impl<T, S> PersistedState<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KvStore,
{
    pub fn new(store: Arc<S>, key: impl Into<String>, initial: T) -> Self {
        Self {
            key: key.into(),
            store,
            value: initial,
            hydrated: false,
        }
    }

    /// Load the stored value if this is the first access. Read failures and
    /// unparsable data leave the initial value in place.
    pub async fn hydrate(&mut self) -> &T {
        if !self.hydrated {
            match self.store.get(&self.key).await {
                Ok(Some(raw)) => match serde_json::from_str(&raw) {
                    Ok(value) => self.value = value,
                    Err(e) => {
                        tracing::warn!(key = %self.key, error = %e, "ignoring unparsable persisted state");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "failed to load persisted state");
                }
            }
            self.hydrated = true;
        }
        &self.value
    }

    /// The current in-memory value. May still be the initial value if no
    /// access has hydrated yet.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Hydrate, apply `f` to the value, then persist the result. The whole
    /// cycle is one logical unit: callers never observe a half-applied
    /// mutation.
    pub async fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> &T {
        self.hydrate().await;
        f(&mut self.value);
        self.persist().await;
        &self.value
    }

    /// Hydrate, then replace the value and persist it.
    pub async fn set(&mut self, value: T) {
        self.hydrate().await;
        self.value = value;
        self.persist().await;
    }

    async fn persist(&self) {
        let json = match serde_json::to_string(&self.value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to serialize persisted state");
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &json).await {
            tracing::warn!(key = %self.key, error = %e, "failed to persist state");
        }
    }
}
