//! File system storage rooted at a base directory.

use crate::error::{Result, TavernError};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and writes files below a base directory that must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    base_directory: PathBuf,
}

impl Storage {
    /// Open `base_directory`.
    ///
    /// Fails with [`TavernError::DirectoryNotFound`] when it is missing and
    /// `create_missing` is false; otherwise the directory is created.
    pub fn new(base_directory: impl Into<PathBuf>, create_missing: bool) -> Result<Self> {
        let base_directory = base_directory.into();

        if !base_directory.is_dir() {
            if !create_missing || base_directory.exists() {
                return Err(TavernError::directory_not_found(base_directory));
            }
            fs::create_dir_all(&base_directory)?;
            tracing::debug!("Created storage directory {}", base_directory.display());
        }

        Ok(Storage { base_directory })
    }

    /// The base directory
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Absolute location of `path` below the base directory
    pub fn path_for(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_directory.join(path)
    }

    /// Whether a file exists at `path`
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.path_for(path).is_file()
    }

    /// Read the file at `path`
    pub fn get(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        Ok(fs::read(self.path_for(path))?)
    }

    /// Write `contents` to `path`, creating intermediate directories
    pub fn put(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let target = self.path_for(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, contents)?;
        Ok(())
    }
}
