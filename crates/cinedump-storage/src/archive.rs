//! Named archives in one directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cinedump_core::config::StorageConfig;
use cinedump_core::constants::ARCHIVE_EXTENSION;
use cinedump_core::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec;

/// Saves and loads collections as `<dir>/<name>.json.zst`.
///
/// Every operation checks the directory first; the store does not create
/// it. Saving over an existing archive needs `overwrite` in the config.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    dir: PathBuf,
    level: i32,
    overwrite: bool,
}

impl ArchiveStore {
    pub fn new(dir: impl Into<PathBuf>, config: &StorageConfig) -> Self {
        Self {
            dir: dir.into(),
            level: config.effective_compression_level(),
            overwrite: config.effective_overwrite(),
        }
    }

    /// Store rooted at the configured directory.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.effective_dir(), config)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an archive called `name` lives at.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{ARCHIVE_EXTENSION}")))
    }

    fn check_dir(&self) -> Result<(), StorageError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(StorageError::DirectoryMissing {
                path: self.dir.clone(),
            })
        }
    }

    /// Serialize `collection` under `name`. Returns the archive path.
    pub fn save<T>(&self, name: &str, collection: &T) -> Result<PathBuf, StorageError>
    where
        T: Serialize + ?Sized,
    {
        self.check_dir()?;
        let path = self.path_of(name)?;
        if !self.overwrite && path.exists() {
            return Err(StorageError::FileAlreadyExists { path });
        }

        let staging = self.dir.join(format!("{name}.{ARCHIVE_EXTENSION}.partial"));
        let staged = codec::write_compressed(&staging, collection, self.level).and_then(|bytes| {
            fs::rename(&staging, &path)
                .map(|()| bytes)
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })
        });
        let bytes = match staged {
            Ok(bytes) => bytes,
            Err(e) => {
                discard_staging(&staging);
                return Err(e);
            }
        };

        info!(archive = name, bytes, level = self.level, "saved collection");
        Ok(path)
    }

    /// Deserialize the archive called `name`.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, StorageError> {
        self.check_dir()?;
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Err(StorageError::FileMissing { path });
        }
        let value = codec::read_compressed(&path)?;
        debug!(archive = name, "loaded collection");
        Ok(value)
    }

    pub fn exists(&self, name: &str) -> Result<bool, StorageError> {
        self.check_dir()?;
        Ok(self.path_of(name)?.is_file())
    }

    pub fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.check_dir()?;
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Err(StorageError::FileMissing { path });
        }
        fs::remove_file(&path).map_err(|source| StorageError::Io { path, source })
    }

    /// Names of all archives in the directory, sorted.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        self.check_dir()?;
        let io = |source| StorageError::Io {
            path: self.dir.clone(),
            source,
        };
        let suffix = format!(".{ARCHIVE_EXTENSION}");

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io)? {
            let entry = entry.map_err(io)?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(&suffix) {
                if validate_name(name).is_ok() && entry.path().is_file() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// A failed save leaves no staging file behind.
fn discard_staging(staging: &Path) {
    match fs::remove_file(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %staging.display(), error = %e, "could not remove staging file"),
    }
}

/// Archive names are single path components of `[A-Za-z0-9_.-]`, not
/// starting with a dot.
fn validate_name(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName {
            name: name.to_string(),
        })
    }
}
