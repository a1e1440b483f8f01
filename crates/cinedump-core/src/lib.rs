//! cinedump-core: shared foundations for the cinedump workspace.
//!
//! - Errors: one `thiserror` enum per subsystem plus error codes
//! - Config: TOML-based layered configuration
//! - Tracing: `tracing-subscriber` setup driven by `CINEDUMP_LOG`
//! - Types: collection aliases used across crates

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CinedumpConfig;
pub use errors::{ConfigError, ParseError, PipelineError, StorageError};
