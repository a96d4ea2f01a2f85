//! # POS Error Type
//!
//! Unified error type for the session layer and the `cash-report` binary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comanda POS                            │
//! │                                                                         │
//! │  ValidationError ──► CoreError ──┐                                     │
//! │                                  │                                      │
//! │  io / serde_json ──► StoreError ─┼──► PosError ──► caller / binary     │
//! │                                  │                                      │
//! │  toml / bad values ──────────────┘   (Config)                          │
//! │                                                                         │
//! │  Storage failures during a session never reach this type: saves are    │
//! │  fire-and-forget and loads fall back to defaults.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use comanda_core::CoreError;
use comanda_store::StoreError;

/// Errors surfaced by the POS layer.
#[derive(Debug, Error)]
pub enum PosError {
    /// Business rule violation from comanda-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A report could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No platform directory could be determined for app data.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

/// Result type alias for POS operations.
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: PosError = CoreError::TableNotFound("t-9".to_string()).into();
        assert_eq!(err.to_string(), "Table not found: t-9");
    }

    #[test]
    fn test_config_error_message() {
        let err = PosError::InvalidConfig("paper_width must be 32 or 48".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: paper_width must be 32 or 48"
        );
    }
}
