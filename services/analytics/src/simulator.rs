//! Multi-symbol price feed

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::price_generator::PriceGenerator;

/// One simulated observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub ticker: String,
    pub price: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

/// Price generators keyed by ticker
#[derive(Debug, Default)]
pub struct PriceSimulator {
    generators: BTreeMap<String, PriceGenerator>,
}

impl PriceSimulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start simulating `ticker`
    pub fn add_symbol(
        &mut self,
        ticker: impl Into<String>,
        initial_price: f64,
        volatility: f64,
    ) -> AnalyticsResult<()> {
        let ticker = ticker.into();
        if self.generators.contains_key(&ticker) {
            return Err(AnalyticsError::DuplicateSymbol { ticker });
        }

        let generator = PriceGenerator::new(initial_price, volatility)?;
        debug!(%ticker, initial_price, volatility, "Simulating symbol");
        self.generators.insert(ticker, generator);
        Ok(())
    }

    /// Stop simulating `ticker`; returns whether it was present
    pub fn remove_symbol(&mut self, ticker: &str) -> bool {
        self.generators.remove(ticker).is_some()
    }

    pub fn generator(&self, ticker: &str) -> Option<&PriceGenerator> {
        self.generators.get(ticker)
    }

    pub fn generator_mut(&mut self, ticker: &str) -> Option<&mut PriceGenerator> {
        self.generators.get_mut(ticker)
    }

    /// Simulated tickers in order
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Advance every symbol once using the thread-local RNG
    pub fn tick(&mut self) -> Vec<PriceTick> {
        self.tick_with(&mut rand::thread_rng())
    }

    /// Advance every symbol once, ordered by ticker
    pub fn tick_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<PriceTick> {
        let timestamp = Utc::now();
        self.generators
            .iter_mut()
            .map(|(ticker, generator)| {
                let (price, volume) = generator.next_price_with(rng);
                PriceTick {
                    ticker: ticker.clone(),
                    price,
                    volume,
                    timestamp,
                }
            })
            .collect()
    }
}
