// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SmaCloseSettings {
    /// The trailing window length the feed computes the moving average over.
    #[serde(default = "default_average_window")]
    pub average_window: u32,

    /// When false, per-bar logging is suppressed; the end-of-run summary is
    /// always emitted regardless.
    #[serde(default = "default_verbose_logging")]
    pub verbose_logging: bool,
}

fn default_average_window() -> u32 {
    21
}

fn default_verbose_logging() -> bool {
    true
}

impl Default for SmaCloseSettings {
    fn default() -> Self {
        Self {
            average_window: default_average_window(),
            verbose_logging: default_verbose_logging(),
        }
    }
}
