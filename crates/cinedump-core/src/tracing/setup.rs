//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;

static INIT: Once = Once::new();

/// Initialize the cinedump tracing/logging system.
///
/// Reads `CINEDUMP_LOG` for per-module log levels, e.g.
/// `CINEDUMP_LOG=cinedump_parse=debug,cinedump_storage=warn`.
///
/// Falls back to `cinedump=info` if `CINEDUMP_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CINEDUMP_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}
