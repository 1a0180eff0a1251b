//! Shared code of `shaderbatch` crates for testing.

#![expect(clippy::panic, reason = "test helpers signal misuse by panicking")]

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tempfile::TempDir;

/// A minimal vertex shader, the content does not matter as nothing is ever compiled.
const SHADER_SOURCE: &str = "#version 450\nvoid main() {}\n";

/// `TestEnv` sets up a temp dir that holds a destination folder and any shader sources a test needs.
/// Every test gets its own directory, so tests never race on shared paths.
/// Dropping `TestEnv` will clean up the dir, except when panic unwinding, so you can debug failures.
#[must_use]
pub struct TestEnv(TempDir);

impl TestEnv {
    /// Create a new [`TestEnv`].
    ///
    /// # Panics
    /// If the temp dir cannot be created.
    #[inline]
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("shaderbatch-test")
            .tempdir()
            .unwrap_or_else(|error| panic!("could not create test dir: {error}"));
        Self(dir)
    }

    /// Root of the temp dir.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        self.0.path()
    }

    /// Creates (if missing) and returns the `out` directory used as the destination folder.
    ///
    /// # Errors
    /// If the directory cannot be created.
    #[inline]
    pub fn dest_folder(&self) -> anyhow::Result<PathBuf> {
        let dest = self.root().join("out");
        fs::create_dir_all(&dest)
            .with_context(|| format!("could not create dest folder '{}'", dest.display()))?;
        Ok(dest)
    }

    /// Writes a stub shader source at `relative` (inside the temp dir) and returns its full path.
    /// Parent directories are created as needed.
    ///
    /// # Errors
    /// If the file or its parent directories cannot be written.
    #[inline]
    pub fn shader_file(&self, relative: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&path)
            .with_context(|| format!("could not create shader file '{}'", path.display()))?;
        file.write_all(SHADER_SOURCE.as_bytes())?;
        Ok(path)
    }

    /// A path inside the temp dir that is guaranteed not to exist.
    #[inline]
    #[must_use]
    pub fn missing(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.root().join(relative);
        assert!(!path.exists(), "'{}' unexpectedly exists", path.display());
        path
    }
}

impl Default for TestEnv {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestEnv {
    #[inline]
    fn drop(&mut self) {
        // when a test fails, keep directory
        if std::thread::panicking() {
            self.0.disable_cleanup(true);
        }
    }
}
