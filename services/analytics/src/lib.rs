//! Simulated market data
//!
//! Random-walk price generation with mean reversion and occasional jumps,
//! used to drive demo feeds for registered symbols.

pub mod error;
pub mod price_generator;
pub mod simulator;

pub use error::{AnalyticsError, AnalyticsResult};
pub use price_generator::PriceGenerator;
pub use simulator::{PriceSimulator, PriceTick};
