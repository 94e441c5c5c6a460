//! Write-through state wrapper.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{Cache, StorageKey};

/// Owns a store's state and mirrors it into the cache after every update.
///
/// The in-memory value is authoritative for the session. Persistence is
/// best effort: a failed write is logged and otherwise ignored, and a
/// missing or unreadable document on load falls back to `S::default()`.
///
/// ```rust
/// use brick_cache::{Cache, MemoryStore, Persisted, StorageKey};
///
/// let cache = Cache::new(MemoryStore::new());
/// let mut names: Persisted<Vec<String>> = Persisted::load(cache, StorageKey::Wishlist);
/// names.update(|n| n.push("Hogwarts Castle".to_string()));
/// assert_eq!(names.state().len(), 1);
/// ```
#[derive(Debug)]
pub struct Persisted<S> {
    state: S,
    cache: Cache,
    key: StorageKey,
}

impl<S> Persisted<S>
where
    S: Serialize + DeserializeOwned + Default,
{
    /// Hydrate the state stored under `key`.
    pub fn load(cache: Cache, key: StorageKey) -> Self {
        let state = match cache.get::<S>(key.as_str()) {
            Ok(Some(state)) => {
                debug!(key = %key, "hydrated persisted state");
                state
            }
            Ok(None) => S::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding unreadable persisted state");
                S::default()
            }
        };
        Self { state, cache, key }
    }

    /// Wrap an explicit initial state without reading the cache.
    ///
    /// Nothing is written until the first update.
    pub fn with_state(cache: Cache, key: StorageKey, state: S) -> Self {
        Self { state, cache, key }
    }

    /// Current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The key this state is mirrored under.
    pub fn key(&self) -> StorageKey {
        self.key
    }

    /// Apply a mutation and write the result through.
    ///
    /// Returns whatever the closure returns.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let result = f(&mut self.state);
        self.flush();
        result
    }

    /// Write the current state to the cache.
    ///
    /// Returns `false` if the write failed.
    pub fn flush(&self) -> bool {
        match self.cache.set(self.key.as_str(), &self.state) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to persist state; keeping in-memory copy");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyValueStore, MemoryStore};
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Names {
        names: Vec<String>,
    }

    #[test]
    fn test_load_defaults_when_missing() {
        let cache = Cache::new(MemoryStore::new());
        let p: Persisted<Names> = Persisted::load(cache, StorageKey::Wishlist);
        assert_eq!(p.state(), &Names::default());
    }

    #[test]
    fn test_update_writes_through() {
        let cache = Cache::new(MemoryStore::new());
        let mut p: Persisted<Names> = Persisted::load(cache.clone(), StorageKey::Wishlist);

        let len = p.update(|s| {
            s.names.push("a".into());
            s.names.len()
        });
        assert_eq!(len, 1);

        let stored: Names = cache
            .get(StorageKey::Wishlist.as_str())
            .unwrap()
            .unwrap();
        assert_eq!(stored.names, vec!["a"]);

        let reloaded: Persisted<Names> = Persisted::load(cache, StorageKey::Wishlist);
        assert_eq!(reloaded.state().names, vec!["a"]);
    }

    #[test]
    fn test_corrupt_document_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(StorageKey::Wishlist.as_str(), "{\"names\": 42}")
            .unwrap();

        let p: Persisted<Names> =
            Persisted::load(Cache::from_shared(store), StorageKey::Wishlist);
        assert!(p.state().names.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let cache = Cache::new(MemoryStore::with_quota(4));
        let mut p: Persisted<Names> = Persisted::load(cache.clone(), StorageKey::Wishlist);

        p.update(|s| s.names.push("too long to fit".into()));

        assert_eq!(p.state().names, vec!["too long to fit"]);
        assert!(!p.flush());
        assert_eq!(cache.get_raw(StorageKey::Wishlist.as_str()).unwrap(), None);
    }

    #[test]
    fn test_with_state_does_not_write() {
        let cache = Cache::new(MemoryStore::new());
        let p = Persisted::with_state(
            cache.clone(),
            StorageKey::Reviews,
            Names {
                names: vec!["seed".into()],
            },
        );
        assert_eq!(p.key(), StorageKey::Reviews);
        assert!(!cache.exists(StorageKey::Reviews.as_str()).unwrap());
    }
}
