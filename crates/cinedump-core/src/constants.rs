//! Shared constants for the cinedump workspace.

/// cinedump version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "cinedump.toml";

/// Default directory holding the downloaded `.list` dumps.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory for saved collections.
pub const DEFAULT_STORAGE_DIR: &str = "store";

/// Default zstd compression level for saved collections.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Highest zstd compression level accepted by the config.
pub const MAX_COMPRESSION_LEVEL: i32 = 22;

/// File extension of saved collections.
pub const ARCHIVE_EXTENSION: &str = "json.zst";

/// Default tracing filter when `CINEDUMP_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cinedump=info";
