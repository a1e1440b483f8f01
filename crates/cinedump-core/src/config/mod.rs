//! Configuration system for cinedump.
//! TOML-based, 3-layer resolution: CLI > env > project > defaults.

pub mod cinedump_config;
pub mod data_config;
pub mod parse_config;
pub mod storage_config;

pub use cinedump_config::{CinedumpConfig, CliOverrides};
pub use data_config::DataConfig;
pub use parse_config::ParseConfig;
pub use storage_config::StorageConfig;
