//! Service configuration
//!
//! Configuration is layered: built-in defaults, then an optional file, then
//! `SYMBOLS_`-prefixed environment variables (`__` separates nested keys,
//! e.g. `SYMBOLS_DATABASE__HOST`). Credentials are resolved afterwards from
//! the property registry so that secrets loaded from files take effect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::constants::{CONFIG_ENV_PREFIX, REDACTED, database, network, secrets};
use crate::errors::{ConfigError, ConfigResult};
use crate::properties::{EnvSource, ProcessEnv, PropertyStore, resolve};

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Database connection configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_BIND_HOST.to_string(),
            port: network::DEFAULT_HTTP_PORT,
            request_timeout_secs: network::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Database connection configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database name
    pub name: String,
    /// Login user
    pub user: String,
    /// Login password, normally resolved from `DB_PASSWORD`
    pub password: Option<String>,
    /// Pool size upper bound
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Create the schema on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: database::DEFAULT_DB_HOST.to_string(),
            port: database::DEFAULT_DB_PORT,
            name: database::DEFAULT_DB_NAME.to_string(),
            user: database::DEFAULT_DB_USER.to_string(),
            password: None,
            max_connections: database::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: database::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Pool acquire timeout
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection target without credentials, safe to log
    #[must_use]
    pub fn display_target(&self) -> String {
        format!("postgres://{}@{}:{}/{}", self.user, self.host, self.port, self.name)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT signing secret, normally resolved from `JWT_SECRET`
    pub jwt_secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl ServiceConfig {
    /// Load layered configuration: defaults, optional file, environment.
    ///
    /// Credentials are not resolved here; call
    /// [`ServiceConfig::resolve_credentials`] once secrets are loaded.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_from_env(path, &ProcessEnv)
    }

    /// Like [`ServiceConfig::load`], with `SYMBOLS_*` overrides taken from `env`
    pub fn load_from_env(path: Option<&Path>, env: &dyn EnvSource) -> ConfigResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env.vars().map(|vars| vars.into_iter().collect())),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Fill credentials from `DB_PASSWORD` and `JWT_SECRET`.
    ///
    /// The property registry wins over the environment; values already
    /// present from a configuration file are kept when neither is set.
    pub fn resolve_credentials(&mut self, props: &PropertyStore, env: &dyn EnvSource) {
        if let Some(password) = resolve(secrets::DB_PASSWORD, props, env) {
            self.database.password = Some(password);
        }
        if let Some(secret) = resolve(secrets::JWT_SECRET, props, env) {
            self.auth.jwt_secret = Some(secret);
        }
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::invalid("database.host", "must not be empty"));
        }
        if self.database.port == 0 {
            return Err(ConfigError::invalid("database.port", "must not be zero"));
        }
        if self.database.name.trim().is_empty() {
            return Err(ConfigError::invalid("database.name", "must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Server bind address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
