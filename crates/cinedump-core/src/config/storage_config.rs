//! Storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, DEFAULT_STORAGE_DIR};

/// Configuration for saved collections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for archives. Default: `store`.
    pub dir: Option<PathBuf>,
    /// zstd level, 1..=22. Default: 3.
    pub compression_level: Option<i32>,
    /// Replace an existing archive on save. Default: false.
    pub overwrite: Option<bool>,
}

impl StorageConfig {
    /// Returns the effective archive directory, defaulting to `store`.
    pub fn effective_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
    }

    /// Returns the effective compression level, defaulting to 3.
    pub fn effective_compression_level(&self) -> i32 {
        self.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL)
    }

    /// Returns whether saves may replace existing archives, defaulting to false.
    pub fn effective_overwrite(&self) -> bool {
        self.overwrite.unwrap_or(false)
    }
}
