//! Key-value persistence adapter for Brickshop stores.
//!
//! Every store mirrors its state into a synchronous string key-value store
//! (browser `localStorage` in a web build, a directory of JSON files in the
//! CLI, a `HashMap` in tests). This crate provides:
//!
//! - [`KeyValueStore`] - the injectable backend trait, with [`MemoryStore`]
//!   and [`FileStore`] implementations
//! - [`Cache`] - typed JSON access on top of a backend
//! - [`Persisted`] - write-through wrapper that owns a store's state
//! - [`StorageKey`] - the key namespace shared by all stores
//!
//! # Example
//!
//! ```rust
//! use brick_cache::{Cache, MemoryStore, Persisted, StorageKey};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Counter {
//!     hits: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let mut counter: Persisted<Counter> = Persisted::load(cache.clone(), StorageKey::Cart);
//! counter.update(|c| c.hits += 1);
//!
//! let stored: Option<Counter> = cache.get(StorageKey::Cart.as_str()).unwrap();
//! assert_eq!(stored.unwrap().hits, 1);
//! ```

mod backend;
mod error;
mod key;
mod kv;
mod persisted;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::CacheError;
pub use key::StorageKey;
pub use kv::Cache;
pub use persisted::Persisted;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore, Persisted, StorageKey};
}
