//! Symbol lookup interface
//!
//! Every operation is a read-only, stateless query that either answers or
//! propagates the storage failure to the caller. A missing ticker is an
//! answer (`None` / `false`), never an error.

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::model::{Symbol, validate_ticker};

/// Read access to the registered symbols
#[async_trait]
pub trait SymbolRepository: Send + Sync {
    /// The symbol whose ticker matches exactly, if any
    async fn find_by_ticker(&self, ticker: &str) -> RegistryResult<Option<Symbol>>;

    /// Whether a symbol with exactly this ticker exists
    async fn exists_by_ticker(&self, ticker: &str) -> RegistryResult<bool>;

    /// The symbol with this id, if any
    async fn find_by_id(&self, id: i64) -> RegistryResult<Option<Symbol>>;

    /// All symbols ordered by ticker
    async fn find_all(&self) -> RegistryResult<Vec<Symbol>>;

    /// Number of registered symbols
    async fn count(&self) -> RegistryResult<i64>;

    /// Check the backing store is reachable
    async fn ping(&self) -> RegistryResult<()>;
}

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    by_ticker: FxHashMap<String, Symbol>,
}

/// Symbol store held in memory
///
/// Tickers compare byte for byte, matching the default PostgreSQL collation
/// for equality.
#[derive(Debug, Default)]
pub struct InMemorySymbolRepository {
    table: RwLock<Table>,
}

impl InMemorySymbolRepository {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given tickers, ids assigned in order
    pub fn with_tickers<I, S>(tickers: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = Self::new();
        for ticker in tickers {
            repo.insert(ticker)?;
        }
        Ok(repo)
    }

    /// Register a ticker and return the stored record
    pub fn insert(&self, ticker: impl Into<String>) -> RegistryResult<Symbol> {
        let ticker = ticker.into();
        validate_ticker(&ticker)?;

        let mut table = self.table.write();
        if table.by_ticker.contains_key(&ticker) {
            return Err(RegistryError::DuplicateTicker { ticker });
        }

        table.next_id += 1;
        let symbol = Symbol::new(table.next_id, ticker.clone());
        table.by_ticker.insert(ticker, symbol.clone());
        debug!(symbol = %symbol, "Symbol registered in memory");
        Ok(symbol)
    }
}

#[async_trait]
impl SymbolRepository for InMemorySymbolRepository {
    async fn find_by_ticker(&self, ticker: &str) -> RegistryResult<Option<Symbol>> {
        Ok(self.table.read().by_ticker.get(ticker).cloned())
    }

    async fn exists_by_ticker(&self, ticker: &str) -> RegistryResult<bool> {
        Ok(self.table.read().by_ticker.contains_key(ticker))
    }

    async fn find_by_id(&self, id: i64) -> RegistryResult<Option<Symbol>> {
        Ok(self
            .table
            .read()
            .by_ticker
            .values()
            .find(|symbol| symbol.id == id)
            .cloned())
    }

    async fn find_all(&self) -> RegistryResult<Vec<Symbol>> {
        let mut symbols: Vec<Symbol> = self.table.read().by_ticker.values().cloned().collect();
        symbols.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        Ok(symbols)
    }

    async fn count(&self) -> RegistryResult<i64> {
        let len = self.table.read().by_ticker.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }

    async fn ping(&self) -> RegistryResult<()> {
        Ok(())
    }
}
