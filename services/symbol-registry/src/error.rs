//! Error types for the symbol registry

use thiserror::Error;

/// Symbol registry error types
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The backing store failed or could not be reached
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A symbol with this ticker is already registered
    #[error("Symbol already exists: {ticker}")]
    DuplicateTicker {
        /// The ticker that collided
        ticker: String,
    },

    /// The ticker cannot be stored
    #[error("Invalid ticker {ticker:?}: {reason}")]
    InvalidTicker {
        /// The rejected ticker
        ticker: String,
        /// Why it was rejected
        reason: String,
    },

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    Migration(String),
}

impl RegistryError {
    /// Whether this error means the store itself is unavailable
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Migration(_))
    }
}

/// Type alias for symbol registry results
pub type RegistryResult<T> = Result<T, RegistryError>;
