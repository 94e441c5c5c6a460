//! Commerce error types.
//!
//! Stores never fail for domain-rule violations: they clamp or refuse
//! through their return values. These errors cover the few fallible edges
//! left, loading a catalog and talking to storage directly. Checkout has
//! its own error type in [`crate::checkout`].

use thiserror::Error;

/// Errors that can occur outside the store operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog document could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] brick_cache::CacheError),
}
