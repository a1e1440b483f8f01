//! Top-level cinedump configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DataConfig, ParseConfig, StorageConfig};
use crate::constants::{MAX_COMPRESSION_LEVEL, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CINEDUMP_*`)
/// 3. Project config (`cinedump.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CinedumpConfig {
    pub data: DataConfig,
    pub storage: StorageConfig,
    pub parse: ParseConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub overwrite: Option<bool>,
    pub min_votes: Option<u32>,
}

impl CinedumpConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let project_file = project_config_path.exists();
        if project_file {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        debug!(
            root = %root.display(),
            project_file,
            cli_overrides = cli_overrides.is_some(),
            compression_level = config.storage.effective_compression_level(),
            "resolved configuration"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CinedumpConfig) -> Result<(), ConfigError> {
        if let Some(level) = config.storage.compression_level {
            if !(1..=MAX_COMPRESSION_LEVEL).contains(&level) {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.compression_level".to_string(),
                    message: format!("must be between 1 and {MAX_COMPRESSION_LEVEL}"),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut CinedumpConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CinedumpConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut CinedumpConfig, other: &CinedumpConfig) {
        if other.data.dir.is_some() {
            base.data.dir = other.data.dir.clone();
        }

        if other.storage.dir.is_some() {
            base.storage.dir = other.storage.dir.clone();
        }
        if other.storage.compression_level.is_some() {
            base.storage.compression_level = other.storage.compression_level;
        }
        if other.storage.overwrite.is_some() {
            base.storage.overwrite = other.storage.overwrite;
        }

        if other.parse.min_votes.is_some() {
            base.parse.min_votes = other.parse.min_votes;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CINEDUMP_DATA_DIR`, `CINEDUMP_COMPRESSION_LEVEL`, etc.
    fn apply_env_overrides(config: &mut CinedumpConfig) {
        if let Ok(val) = std::env::var("CINEDUMP_DATA_DIR") {
            config.data.dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("CINEDUMP_STORAGE_DIR") {
            config.storage.dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("CINEDUMP_COMPRESSION_LEVEL") {
            if let Ok(v) = val.parse::<i32>() {
                config.storage.compression_level = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CINEDUMP_OVERWRITE") {
            if let Ok(v) = val.parse::<bool>() {
                config.storage.overwrite = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CINEDUMP_MIN_VOTES") {
            if let Ok(v) = val.parse::<u32>() {
                config.parse.min_votes = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut CinedumpConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.data_dir {
            config.data.dir = Some(v.clone());
        }
        if let Some(ref v) = cli.storage_dir {
            config.storage.dir = Some(v.clone());
        }
        if let Some(v) = cli.overwrite {
            config.storage.overwrite = Some(v);
        }
        if let Some(v) = cli.min_votes {
            config.parse.min_votes = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
