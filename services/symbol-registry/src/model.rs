//! Symbol record

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tradable symbol identified by its ticker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// Unique ticker, matched exactly
    pub ticker: String,
}

impl Symbol {
    /// Create a symbol record
    pub fn new(id: i64, ticker: impl Into<String>) -> Self {
        Self {
            id,
            ticker: ticker.into(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.ticker, self.id)
    }
}

/// Reject tickers the store would not accept
pub fn validate_ticker(ticker: &str) -> crate::RegistryResult<()> {
    let reason = if ticker.is_empty() {
        "ticker is empty"
    } else if ticker.trim() != ticker {
        "ticker has surrounding whitespace"
    } else {
        return Ok(());
    };

    Err(crate::RegistryError::InvalidTicker {
        ticker: ticker.to_string(),
        reason: reason.to_string(),
    })
}
