//! # Store Error Types
//!
//! Error types for key-value store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key involved                      │
//! │       │                                                                 │
//! │       ├──► load_*: logged, defaults substituted (never surfaced)       │
//! │       └──► save_*: logged by the session (fire-and-forget)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Key-value store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters outside `[A-Za-z0-9_-]` or is empty.
    #[error("Invalid store key: '{0}'")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Blob could not be encoded or decoded.
    #[error("Malformed blob '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Wraps an I/O error with the key it happened on.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    /// Wraps a serde error with the key it happened on.
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialization {
            key: key.into(),
            source,
        }
    }
}

/// Convenience type alias for store Results.
pub type StoreResult<T> = Result<T, StoreError>;
