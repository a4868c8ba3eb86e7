//! Symbol lookup behavior against the in-memory store

use pretty_assertions::assert_eq;
use rstest::*;
use symbol_registry::{InMemorySymbolRepository, RegistryError, Symbol, SymbolRepository};
use std::time::Duration;
use test_utils::{TickerFactory, seed_tickers, with_timeout};

#[fixture]
fn repository(seed_tickers: Vec<&'static str>) -> InMemorySymbolRepository {
    InMemorySymbolRepository::with_tickers(seed_tickers).unwrap()
}

#[rstest]
#[tokio::test]
async fn test_exists_by_exact_ticker(repository: InMemorySymbolRepository) {
    assert!(repository.exists_by_ticker("AAPL").await.unwrap());
    assert!(!repository.exists_by_ticker("NFLX").await.unwrap());
}

#[rstest]
#[case::lowercase("aapl")]
#[case::mixed("Aapl")]
#[case::padded(" AAPL")]
#[case::prefix("AAP")]
#[tokio::test]
async fn test_ticker_match_is_exact(repository: InMemorySymbolRepository, #[case] ticker: &str) {
    assert!(!repository.exists_by_ticker(ticker).await.unwrap());
    assert_eq!(repository.find_by_ticker(ticker).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn test_find_on_empty_store_is_absent_not_error() {
    let repository = InMemorySymbolRepository::new();

    assert_eq!(repository.find_by_ticker("MSFT").await.unwrap(), None);
    assert!(!repository.exists_by_ticker("MSFT").await.unwrap());
    assert_eq!(repository.count().await.unwrap(), 0);
    assert!(repository.find_all().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_find_by_ticker_returns_record(repository: InMemorySymbolRepository) {
    let symbol = repository.find_by_ticker("MSFT").await.unwrap().unwrap();

    assert_eq!(symbol.ticker, "MSFT");
    assert_eq!(repository.find_by_id(symbol.id).await.unwrap(), Some(symbol));
    assert_eq!(repository.find_by_id(999).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn test_find_all_ordered_by_ticker() {
    let repository = InMemorySymbolRepository::with_tickers(["TSLA", "AAPL", "MSFT"]).unwrap();

    let all = repository.find_all().await.unwrap();

    assert_eq!(
        all,
        vec![
            Symbol::new(2, "AAPL"),
            Symbol::new(3, "MSFT"),
            Symbol::new(1, "TSLA"),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn test_count_tracks_inserts() {
    let repository = InMemorySymbolRepository::new();
    let tickers = TickerFactory::new().build_many(5);
    for ticker in &tickers {
        repository.insert(ticker.clone()).unwrap();
    }

    assert_eq!(repository.count().await.unwrap(), 5);
    assert!(repository.exists_by_ticker("SYM003").await.unwrap());
}

#[rstest]
#[case::empty("")]
#[case::whitespace("AAPL\n")]
fn test_invalid_tickers_rejected(#[case] ticker: &str) {
    let repository = InMemorySymbolRepository::new();

    let err = repository.insert(ticker).unwrap_err();

    assert!(matches!(err, RegistryError::InvalidTicker { .. }));
}

#[rstest]
#[tokio::test]
async fn test_concurrent_lookups(repository: InMemorySymbolRepository) {
    let repository = std::sync::Arc::new(repository);
    let handles: Vec<_> = ["AAPL", "GOOGL", "MSFT", "TSLA"]
        .into_iter()
        .map(|ticker| {
            let repository = std::sync::Arc::clone(&repository);
            tokio::spawn(async move { repository.exists_by_ticker(ticker).await })
        })
        .collect();

    for handle in handles {
        let exists = with_timeout(Duration::from_secs(5), handle).await.unwrap();
        assert!(exists.unwrap().unwrap());
    }
}
