//! Error types for the quickbill-core library.

use thiserror::Error;

/// Main error type for the quickbill library.
#[derive(Error, Debug)]
pub enum QuickBillError {
    /// Item ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Batch import error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Document storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by index-based ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested position does not exist.
    #[error("item index {index} is out of range (ledger has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The item field name was not recognised.
    #[error("unknown item field: {0} (expected \"description\", \"quantity\" or \"price\")")]
    UnknownField(String),
}

/// Errors related to batch import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The input produced no valid drafts.
    #[error("no valid items found ({errors} line error(s)), please check your format")]
    EmptyBatch { errors: usize },

    /// The merge mode name was not recognised.
    #[error("unknown import mode: {0} (expected \"append\" or \"replace\")")]
    UnknownMode(String),
}

/// Errors related to persisting documents.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage backend failed to read or write.
    #[error("storage backend failed: {0}")]
    Backend(String),

    /// The stored value could not be decoded.
    #[error("stored document under {key:?} is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Result type for the quickbill library.
pub type Result<T> = std::result::Result<T, QuickBillError>;
