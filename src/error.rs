//! Error types for Kili
//!
//! Centralized error handling using thiserror.
//!
//! A duplicate insert is deliberately not an error: `EntryStore::add` reports
//! it as `Ok(false)` so callers can treat "already known" as a normal outcome.

use thiserror::Error;

/// All error types that can occur in Kili
#[derive(Debug, Error)]
pub enum KiliError {
    /// Category name not present in the registry
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Non-positive sample limit, rejected before touching storage
    #[error("Invalid quota: {0}")]
    InvalidQuota(usize),

    /// Underlying SQLite storage error
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Kili operations
pub type Result<T> = std::result::Result<T, KiliError>;
