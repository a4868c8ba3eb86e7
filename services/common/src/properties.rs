//! Process-wide configuration properties
//!
//! Values resolved during startup (most notably secrets read from mounted
//! files) are published here before any subsystem reads its configuration.
//! Lookups through [`resolve`] consult the registry first and fall back to
//! the process environment.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::LazyLock;

static GLOBAL_PROPERTIES: LazyLock<PropertyStore> = LazyLock::new(PropertyStore::new);

/// Thread-safe key/value property registry
#[derive(Default)]
pub struct PropertyStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl PropertyStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_PROPERTIES
    }

    /// Set a property, returning the previous value if there was one
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.write().insert(key.into(), value.into())
    }

    /// Get a copy of a property value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Remove a property, returning its value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }

    /// Whether a property is set (even to an empty value)
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Property names, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of properties set
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no property is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// Values are secrets more often than not, so only names are printed.
impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Source of environment variables
pub trait EnvSource: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;

    /// Raw value of `key`, or `None` only when unset
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.var(key).map(OsString::from)
    }

    /// Every unicode variable, or `None` when configuration layering should
    /// read the process environment itself
    fn vars(&self) -> Option<HashMap<String, String>> {
        None
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl<S: BuildHasher + Send + Sync> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn vars(&self) -> Option<HashMap<String, String>> {
        Some(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

impl<S: BuildHasher + Send + Sync> EnvSource for HashMap<String, OsString, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|value| value.to_str())
            .map(str::to_string)
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).cloned()
    }

    fn vars(&self) -> Option<HashMap<String, String>> {
        Some(
            self.iter()
                .filter_map(|(key, value)| Some((key.clone(), value.to_str()?.to_string())))
                .collect(),
        )
    }
}

/// Resolve a named value: registry first, then environment.
///
/// Empty values are treated as absent at both layers.
pub fn resolve(key: &str, props: &PropertyStore, env: &dyn EnvSource) -> Option<String> {
    props
        .get(key)
        .filter(|value| !value.is_empty())
        .or_else(|| env.var(key).filter(|value| !value.is_empty()))
}
