//! Configuration management for the kill-counter subsystem.
//!
//! Loading priority:
//! 1. Default values (hardcoded)
//! 2. Optional config file
//! 3. Environment variables (highest priority)
//!
//! Every field has a default, so an empty source set still yields a
//! runnable configuration.

mod storage;
mod tracker;
pub use storage::*;
pub use tracker::*;


use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Embedded counter database settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tracker loop and user-facing surface settings
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl Settings {
    /// Load configuration, merging an optional file and `KILLBOARD`-prefixed
    /// environment variables over the defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("KILLBOARD")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates all subsystem configurations
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}
