//! Error types for price simulation

use thiserror::Error;

/// Analytics error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Starting price must be positive and finite
    #[error("Invalid initial price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Volatility must be finite and non-negative
    #[error("Invalid volatility: {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Symbol is already being simulated
    #[error("Symbol already simulated: {ticker}")]
    DuplicateSymbol {
        /// The ticker
        ticker: String,
    },
}

/// Type alias for analytics results
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
