//! Error types for the library API.

use thiserror::Error;

/// Failures reported by a [`RecordStore`](crate::core::storage::RecordStore) backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// An underlying file I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored collection could not be serialized or deserialized.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the collection would exceed the store's byte quota.
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    /// The backend is not usable right now.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the prompt repository.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An error occurred during store initialization.
    #[error("Failed to initialize store: {0}")]
    Init(String),

    /// No prompt with this ID exists in the record set.
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    /// The caller supplied data the repository refuses to store.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The configuration file could not be read or understood.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The record store failed to read or persist the collection.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StoreError {
    /// True when the failure came from the backing store rather than the caller's input.
    pub fn is_backend(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}
