use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Configuration for the tracker loop and its user-facing surfaces
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackerConfig {
    /// Minimum interval between accepted menu opens per player (milliseconds)
    #[serde(default = "default_menu_cooldown_ms")]
    pub menu_cooldown_ms: u64,

    /// Chat token that opens the stats menu. Matched case-insensitively
    /// against the trimmed message.
    #[serde(default = "default_menu_trigger")]
    pub menu_trigger: String,

    /// Capacity of the engine event queue feeding the tracker loop
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            menu_cooldown_ms: default_menu_cooldown_ms(),
            menu_trigger: default_menu_trigger(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.menu_trigger.trim().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "tracker.menu_trigger must not be empty".into(),
            )));
        }

        if self.event_queue_capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "tracker.event_queue_capacity must be greater than 0".into(),
            )));
        }

        Ok(())
    }
}

// in ms
fn default_menu_cooldown_ms() -> u64 {
    500
}

fn default_menu_trigger() -> String {
    "!menu".to_string()
}

fn default_event_queue_capacity() -> usize {
    256
}
