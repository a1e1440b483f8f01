//! Parse configuration.

use serde::{Deserialize, Serialize};

/// Configuration for list parsing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParseConfig {
    /// Minimum vote count a ratings record needs to be kept. Default: 0.
    pub min_votes: Option<u32>,
}

impl ParseConfig {
    /// Returns the effective minimum vote count, defaulting to 0.
    pub fn effective_min_votes(&self) -> u32 {
        self.min_votes.unwrap_or(0)
    }
}
