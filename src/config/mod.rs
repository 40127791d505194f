pub mod loader;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::GRAVITY_INTERVAL_MS;

/// User-tunable settings, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds between gravity ticks.
    pub gravity_interval_ms: u64,
    /// Paint the landing preview under the falling piece.
    pub show_ghost: bool,
    /// Fixed piece sequence; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            show_ghost: true,
            seed: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms.max(1))
    }
}
