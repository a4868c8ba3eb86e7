//! File-mounted secret loading
//!
//! Container orchestrators mount secrets as files and hand their paths to
//! the process through `*_FILE` environment variables. At startup,
//! [`SecretLoader`] reads each configured file, trims surrounding
//! whitespace, and publishes the value into the process-wide
//! [`PropertyStore`] so configuration resolution can pick it up.
//!
//! Failures never abort startup: an unreadable file is logged with the
//! secret's name and the underlying cause, and the property stays unset.
//! Secret values are never logged.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use services_common::constants::{REDACTED, secrets};
use services_common::{EnvSource, ProcessEnv, PropertyStore};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Secret loading errors
#[derive(Debug, Error)]
pub enum SecretError {
    /// The secret file could not be read as text
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for secret loading results
pub type SecretResult<T> = Result<T, SecretError>;

/// A secret value whose formatting never reveals the contents
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    /// Wrap a value
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the plain value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Take the plain value
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the value is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue({REDACTED})")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Read a secret file as text and trim surrounding whitespace
pub fn read_secret_file(path: &Path) -> SecretResult<SecretValue> {
    let raw = std::fs::read_to_string(path).map_err(|source| SecretError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SecretValue::new(raw.trim().to_string()))
}

/// One secret to resolve: which variable names the file, which property receives it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSpec {
    /// Human-readable name used in diagnostics
    pub name: String,
    /// Environment variable holding the file path
    pub path_var: String,
    /// Property that receives the trimmed file contents
    pub property: String,
}

impl SecretSpec {
    /// Describe a secret
    pub fn new(
        name: impl Into<String>,
        path_var: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path_var: path_var.into(),
            property: property.into(),
        }
    }

    /// The secrets the service reads at startup: database password, then JWT secret
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("DB password", secrets::DB_PASSWORD_FILE, secrets::DB_PASSWORD),
            Self::new("JWT", secrets::JWT_SECRET_FILE, secrets::JWT_SECRET),
        ]
    }
}

/// What happened to one secret
#[derive(Debug)]
pub enum SecretOutcome {
    /// The path variable was not set at all
    Skipped,
    /// The file was read and the property published
    Loaded {
        /// File the value came from
        path: PathBuf,
    },
    /// The file could not be read; the property was left untouched
    Failed {
        /// File that could not be read
        path: PathBuf,
        /// Why
        error: SecretError,
    },
}

impl fmt::Display for SecretOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("skipped"),
            Self::Loaded { path } => write!(f, "loaded from {}", path.display()),
            Self::Failed { error, .. } => write!(f, "failed: {error}"),
        }
    }
}

/// A secret together with its outcome
#[derive(Debug)]
pub struct SecretStatus {
    /// The secret
    pub spec: SecretSpec,
    /// What happened to it
    pub outcome: SecretOutcome,
}

/// Outcome of a loader run, in configured order
#[derive(Debug, Default)]
pub struct SecretLoadReport {
    statuses: Vec<SecretStatus>,
}

impl SecretLoadReport {
    /// All statuses, in configured order
    pub fn iter(&self) -> impl Iterator<Item = &SecretStatus> {
        self.statuses.iter()
    }

    /// Secrets that were published
    pub fn loaded(&self) -> impl Iterator<Item = &SecretStatus> {
        self.iter()
            .filter(|status| matches!(status.outcome, SecretOutcome::Loaded { .. }))
    }

    /// Secrets whose file could not be read
    pub fn failed(&self) -> impl Iterator<Item = &SecretStatus> {
        self.iter()
            .filter(|status| matches!(status.outcome, SecretOutcome::Failed { .. }))
    }

    /// Outcome for the secret publishing `property`
    #[must_use]
    pub fn outcome(&self, property: &str) -> Option<&SecretOutcome> {
        self.iter()
            .find(|status| status.spec.property == property)
            .map(|status| &status.outcome)
    }

    /// No secret failed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Number of secrets considered
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether no secret was considered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Resolves secret files into properties
#[derive(Debug, Clone)]
pub struct SecretLoader {
    specs: Vec<SecretSpec>,
}

impl Default for SecretLoader {
    fn default() -> Self {
        Self::new(SecretSpec::defaults())
    }
}

impl SecretLoader {
    /// Create a loader for the given secrets
    #[must_use]
    pub const fn new(specs: Vec<SecretSpec>) -> Self {
        Self { specs }
    }

    /// Secrets this loader resolves
    #[must_use]
    pub fn specs(&self) -> &[SecretSpec] {
        &self.specs
    }

    /// Resolve every secret, publishing successes into `props`
    pub fn load(&self, env: &dyn EnvSource, props: &PropertyStore) -> SecretLoadReport {
        let statuses = self
            .specs
            .iter()
            .map(|spec| SecretStatus {
                spec: spec.clone(),
                outcome: load_one(spec, env, props),
            })
            .collect();

        let report = SecretLoadReport { statuses };
        debug!(
            considered = report.len(),
            loaded = report.loaded().count(),
            failed = report.failed().count(),
            "Secret loading finished"
        );
        report
    }
}

fn load_one(spec: &SecretSpec, env: &dyn EnvSource, props: &PropertyStore) -> SecretOutcome {
    // Only an unset variable is skipped; an empty or non-unicode path is
    // still read and fails loudly if it cannot be
    let Some(path) = env.var_os(&spec.path_var).map(PathBuf::from) else {
        debug!(secret = %spec.name, var = %spec.path_var, "Secret file variable not set");
        return SecretOutcome::Skipped;
    };

    match read_secret_file(&path) {
        Ok(value) => {
            if value.is_empty() {
                warn!(secret = %spec.name, path = %path.display(), "Secret file is empty");
            }
            props.set(spec.property.clone(), value.into_inner());
            info!(secret = %spec.name, property = %spec.property, "Secret loaded from file");
            SecretOutcome::Loaded { path }
        }
        Err(error) => {
            error!(
                secret = %spec.name,
                property = %spec.property,
                "Failed to read {} secret: {}",
                spec.name,
                error
            );
            SecretOutcome::Failed { path, error }
        }
    }
}

/// Load the default secrets from the process environment into the global
/// property registry. Must run before any subsystem reads its configuration.
pub fn load_secrets() -> SecretLoadReport {
    SecretLoader::default().load(&ProcessEnv, PropertyStore::global())
}
