//! Error types for the vault.

use thiserror::Error;

/// Unified error type for vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The storage collaborator failed to read or write the snapshot blob.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// The persisted snapshot blob could not be decoded.
    #[error("corrupt vault snapshot: {0}")]
    CorruptSnapshot(#[from] serde_json::Error),
}

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Error raised by a [`VaultStorage`](crate::storage::VaultStorage)
/// implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store failed.
    #[error("{0}")]
    Backend(String),
}
