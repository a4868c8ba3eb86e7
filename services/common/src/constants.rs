//! Common constants used across all services
//!
//! Single source of truth for environment variable and property names.

/// Secret file variables and the properties they populate
pub mod secrets {
    /// Path to the file holding the database password
    pub const DB_PASSWORD_FILE: &str = "DB_PASSWORD_FILE";
    /// Database password property
    pub const DB_PASSWORD: &str = "DB_PASSWORD";
    /// Path to the file holding the JWT signing secret
    pub const JWT_SECRET_FILE: &str = "JWT_SECRET_FILE";
    /// JWT signing secret property
    pub const JWT_SECRET: &str = "JWT_SECRET";
}

/// Network defaults
pub mod network {
    /// Default HTTP bind host
    pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default request timeout
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Database defaults
pub mod database {
    pub const DEFAULT_DB_HOST: &str = "localhost";
    pub const DEFAULT_DB_PORT: u16 = 5432;
    pub const DEFAULT_DB_NAME: &str = "symbols";
    pub const DEFAULT_DB_USER: &str = "postgres";
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
}

/// Prefix for configuration overrides taken from the environment,
/// e.g. `SYMBOLS_DATABASE__HOST`
pub const CONFIG_ENV_PREFIX: &str = "SYMBOLS";

/// Placeholder printed in place of secret values
pub const REDACTED: &str = "<redacted>";
