//! Source data configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DATA_DIR;

/// Where the `.list` dumps live.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the dumps. Default: `data`.
    pub dir: Option<PathBuf>,
}

impl DataConfig {
    /// Returns the effective data directory, defaulting to `data`.
    pub fn effective_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}
