//! Test fixtures for common test data

use rstest::*;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Temporary directory of secret files plus a fake environment pointing at them.
///
/// The process environment is never touched; pass [`SecretFiles::env`] to
/// anything that accepts an `EnvSource`.
#[derive(Debug)]
pub struct SecretFiles {
    dir: tempfile::TempDir,
    env: HashMap<String, OsString>,
}

impl SecretFiles {
    /// Create an empty fixture
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create secrets temp dir"),
            env: HashMap::new(),
        }
    }

    /// Write `contents` to `file_name` and point `path_var` at it
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(
        &mut self,
        path_var: &str,
        file_name: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> PathBuf {
        let path = self.dir.path().join(file_name);
        std::fs::write(&path, contents).expect("failed to write secret file");
        self.point(path_var, &path);
        path
    }

    /// Point `path_var` at a file that does not exist
    pub fn missing(&mut self, path_var: &str, file_name: impl AsRef<Path>) -> PathBuf {
        let path = self.dir.path().join("absent").join(file_name);
        self.point(path_var, &path);
        path
    }

    /// Set an arbitrary variable in the fake environment
    pub fn set_var(&mut self, key: &str, value: impl AsRef<OsStr>) {
        self.env.insert(key.to_string(), value.as_ref().to_os_string());
    }

    /// The fake environment
    #[must_use]
    pub const fn env(&self) -> &HashMap<String, OsString> {
        &self.env
    }

    /// Directory holding the secret files
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    fn point(&mut self, path_var: &str, path: &Path) {
        self.env
            .insert(path_var.to_string(), path.as_os_str().to_os_string());
    }
}

impl Default for SecretFiles {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh secret file fixture
#[fixture]
pub fn secret_files() -> SecretFiles {
    SecretFiles::new()
}

/// Standard tickers seeded into test stores
#[fixture]
pub fn seed_tickers() -> Vec<&'static str> {
    vec!["AAPL", "GOOGL", "MSFT", "TSLA"]
}
