//! Factory patterns for generating test data

/// Factory for creating unique test tickers
#[derive(Debug, Clone)]
pub struct TickerFactory {
    prefix: String,
    next: usize,
}

impl TickerFactory {
    pub fn new() -> Self {
        Self {
            prefix: "SYM".to_string(),
            next: 1,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Next ticker, e.g. `SYM001`
    pub fn build(&mut self) -> String {
        let ticker = format!("{}{:03}", self.prefix, self.next);
        self.next += 1;
        ticker
    }

    pub fn build_many(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.build()).collect()
    }
}

impl Default for TickerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ticker_factory_sequence() {
        let mut factory = TickerFactory::new().with_prefix("TST");
        assert_eq!(factory.build(), "TST001");
        assert_eq!(factory.build_many(2), vec!["TST002".to_string(), "TST003".to_string()]);
    }
}
