use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures ledger, storage, and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Stored ledger is unreadable: {0}")]
    StoreRead(String),
    #[error("Failed to persist ledger: {0}")]
    StoreWrite(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl LedgerError {
    /// True for failures the caller can fix by correcting its input.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
