//! Random walk with mean reversion

use rand::Rng;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Lowest price the generator will ever report
pub const PRICE_FLOOR: f64 = 0.01;

const MEAN_REVERSION_SPEED: f64 = 0.01;
/// One tick in this many carries a news-sized jump
const NEWS_EVENT_ODDS: u32 = 100;
const NEWS_EVENT_MAX_MOVE: f64 = 0.05;
const MIN_BASE_VOLUME: f64 = 100_000.0;
const MAX_BASE_VOLUME: f64 = 1_000_000.0;

/// Generates price movements for one symbol
#[derive(Debug, Clone)]
pub struct PriceGenerator {
    current_price: f64,
    base_price: f64,
    volatility: f64,
    mean_reversion_speed: f64,
}

impl PriceGenerator {
    /// Start at `initial_price`, which also becomes the reversion target
    pub fn new(initial_price: f64, volatility: f64) -> AnalyticsResult<Self> {
        if !initial_price.is_finite() || initial_price <= 0.0 {
            return Err(AnalyticsError::InvalidPrice {
                price: initial_price,
            });
        }
        check_volatility(volatility)?;

        Ok(Self {
            current_price: initial_price,
            base_price: initial_price,
            volatility,
            mean_reversion_speed: MEAN_REVERSION_SPEED,
        })
    }

    /// Next `(price, volume)` using the thread-local RNG
    pub fn next_price(&mut self) -> (f64, f64) {
        self.next_price_with(&mut rand::thread_rng())
    }

    /// Next `(price, volume)` drawing from `rng`
    pub fn next_price_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (f64, f64) {
        let random_change = rng.gen_range(-1.0..1.0) * self.volatility;

        // Pulls the price back toward where it started
        let mean_reversion = (self.base_price - self.current_price) * self.mean_reversion_speed;

        let news_event = if rng.gen_ratio(1, NEWS_EVENT_ODDS) {
            rng.gen_range(-NEWS_EVENT_MAX_MOVE..NEWS_EVENT_MAX_MOVE)
        } else {
            0.0
        };

        let total_change = random_change + mean_reversion + news_event;
        self.current_price = (self.current_price * (1.0 + total_change)).max(PRICE_FLOOR);

        // Bigger moves trade more
        let base_volume = rng.gen_range(MIN_BASE_VOLUME..MAX_BASE_VOLUME);
        let volume = base_volume * (1.0 + total_change.abs() * 10.0);

        (self.current_price, volume)
    }

    /// Change volatility for subsequent ticks
    pub fn set_volatility(&mut self, volatility: f64) -> AnalyticsResult<()> {
        check_volatility(volatility)?;
        self.volatility = volatility;
        Ok(())
    }

    #[must_use]
    pub const fn current_price(&self) -> f64 {
        self.current_price
    }

    #[must_use]
    pub const fn base_price(&self) -> f64 {
        self.base_price
    }

    #[must_use]
    pub const fn volatility(&self) -> f64 {
        self.volatility
    }
}

fn check_volatility(volatility: f64) -> AnalyticsResult<()> {
    if volatility.is_finite() && volatility >= 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidVolatility { volatility })
    }
}
