//! Ordered service startup
//!
//! Secrets are published before configuration is read, and configuration is
//! fully resolved before the first database connection is attempted.

use anyhow::{Context, Result};
use secrets_manager::{SecretLoadReport, load_secrets};
use services_common::{
    ConfigResult, DatabaseConfig, EnvSource, ProcessEnv, PropertyStore, ServiceConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{RegistryError, RegistryResult};
use crate::persistence::{PgSymbolRepository, connect, run_migrations};
use crate::repository::{InMemorySymbolRepository, SymbolRepository};
use crate::server;

/// Command-line overrides for `serve`
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub in_memory: bool,
    pub skip_migrations: bool,
}

impl ServeOptions {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.skip_migrations {
            config.database.run_migrations = false;
        }
    }
}

/// Result of the synchronous startup phase
#[derive(Debug)]
pub struct Startup {
    pub secrets: SecretLoadReport,
    pub config: ServiceConfig,
}

/// Load layered configuration, then fill credentials from published secrets.
///
/// `env` supplies both the `SYMBOLS_*` overrides and the credential fallback.
pub fn load_config(
    path: Option<&Path>,
    props: &PropertyStore,
    env: &dyn EnvSource,
) -> ConfigResult<ServiceConfig> {
    let mut config = ServiceConfig::load_from_env(path, env)?;
    config.resolve_credentials(props, env);
    Ok(config)
}

/// Publish secrets, then resolve configuration against them
pub fn prepare(config_path: Option<&Path>) -> Result<Startup> {
    let secrets = load_secrets();
    if !secrets.is_clean() {
        warn!(
            failed = secrets.failed().count(),
            "Continuing startup without some secrets"
        );
    }

    let config = load_config(config_path, PropertyStore::global(), &ProcessEnv)
        .context("Failed to load configuration")?;

    if config.database.password.is_none() {
        warn!("No database password resolved; connecting without one");
    }
    info!(database = %config.database.display_target(), "Configuration loaded");

    Ok(Startup { secrets, config })
}

/// Connect to PostgreSQL and bring the schema up to date when enabled
pub async fn open_repository(config: &DatabaseConfig) -> RegistryResult<PgSymbolRepository> {
    let pool = connect(config).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    } else {
        info!("Skipping database migrations");
    }
    Ok(PgSymbolRepository::new(pool))
}

/// Run the HTTP service until shutdown
pub async fn run_server(options: ServeOptions) -> Result<()> {
    let Startup { mut config, .. } = prepare(options.config.as_deref())?;
    options.apply(&mut config);

    let repository: Arc<dyn SymbolRepository> = if options.in_memory {
        info!("Serving from an in-memory symbol store");
        Arc::new(InMemorySymbolRepository::new())
    } else {
        Arc::new(
            open_repository(&config.database)
                .await
                .context("Failed to open symbol store")?,
        )
    };

    server::serve(&config, repository).await
}

/// Tally of a seeding run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: Vec<String>,
    pub duplicates: Vec<String>,
}

/// Insert tickers, reporting duplicates instead of failing on them
pub async fn seed(
    repository: &PgSymbolRepository,
    tickers: &[String],
) -> RegistryResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    for ticker in tickers {
        match repository.save(ticker).await {
            Ok(symbol) => {
                info!(symbol = %symbol, "Seeded symbol");
                summary.inserted.push(symbol.ticker);
            }
            Err(RegistryError::DuplicateTicker { ticker }) => {
                warn!("Symbol {} already registered", ticker);
                summary.duplicates.push(ticker);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}
