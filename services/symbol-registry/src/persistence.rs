//! PostgreSQL persistence for symbols

use async_trait::async_trait;
use services_common::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, error, info};

use crate::error::{RegistryError, RegistryResult};
use crate::model::{Symbol, validate_ticker};
use crate::repository::SymbolRepository;

/// Symbol repository backed by a `PostgreSQL` pool
#[derive(Debug, Clone)]
pub struct PgSymbolRepository {
    pool: PgPool,
}

impl PgSymbolRepository {
    /// Create a repository over an existing pool
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Register a ticker and return the stored record
    pub async fn save(&self, ticker: &str) -> RegistryResult<Symbol> {
        validate_ticker(ticker)?;

        let row = sqlx::query("INSERT INTO symbols (ticker) VALUES ($1) RETURNING id, ticker")
            .bind(ticker)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    RegistryError::DuplicateTicker {
                        ticker: ticker.to_string(),
                    }
                }
                other => {
                    error!("Failed to save symbol {}: {}", ticker, other);
                    RegistryError::Storage(other)
                }
            })?;

        let symbol = row_to_symbol(&row);
        debug!("Symbol {} persisted", symbol);
        Ok(symbol)
    }
}

fn row_to_symbol(row: &PgRow) -> Symbol {
    Symbol {
        id: row.get("id"),
        ticker: row.get("ticker"),
    }
}

#[async_trait]
impl SymbolRepository for PgSymbolRepository {
    async fn find_by_ticker(&self, ticker: &str) -> RegistryResult<Option<Symbol>> {
        let row = sqlx::query("SELECT id, ticker FROM symbols WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch symbol {}: {}", ticker, e);
                RegistryError::Storage(e)
            })?;

        Ok(row.as_ref().map(row_to_symbol))
    }

    async fn exists_by_ticker(&self, ticker: &str) -> RegistryResult<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM symbols WHERE ticker = $1)")
            .bind(ticker)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to check symbol {}: {}", ticker, e);
                RegistryError::Storage(e)
            })?;

        Ok(row.get::<bool, _>(0))
    }

    async fn find_by_id(&self, id: i64) -> RegistryResult<Option<Symbol>> {
        let row = sqlx::query("SELECT id, ticker FROM symbols WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch symbol #{}: {}", id, e);
                RegistryError::Storage(e)
            })?;

        Ok(row.as_ref().map(row_to_symbol))
    }

    async fn find_all(&self) -> RegistryResult<Vec<Symbol>> {
        let rows = sqlx::query("SELECT id, ticker FROM symbols ORDER BY ticker")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list symbols: {}", e);
                RegistryError::Storage(e)
            })?;

        Ok(rows.iter().map(row_to_symbol).collect())
    }

    async fn count(&self) -> RegistryResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM symbols")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count symbols: {}", e);
                RegistryError::Storage(e)
            })?;

        Ok(row.get::<i64, _>(0))
    }

    async fn ping(&self) -> RegistryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open a connection pool using resolved credentials
pub async fn connect(config: &DatabaseConfig) -> RegistryResult<PgPool> {
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user);
    if let Some(password) = config.password.as_deref() {
        options = options.password(password);
    }

    info!(
        target_db = %config.display_target(),
        max_connections = config.max_connections,
        "Connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to {}: {}", config.display_target(), e);
            RegistryError::Storage(e)
        })?;

    Ok(pool)
}

/// Create the schema if it does not exist
pub async fn run_migrations(pool: &PgPool) -> RegistryResult<()> {
    info!("Running database migrations");

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS symbols (
            id BIGSERIAL PRIMARY KEY,
            ticker TEXT NOT NULL UNIQUE
        )
        ",
    )
    .execute(pool)
    .await
    .map_err(|e| RegistryError::Migration(e.to_string()))?;

    info!("Database migrations completed");
    Ok(())
}
