use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Configuration for the embedded counter database
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the SQLite database file. Created on first use; one file per
    /// running deployment.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How long a connection waits on a locked database before failing the
    /// operation (milliseconds)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "storage.db_path must not be empty".into(),
            )));
        }

        if self.busy_timeout_ms == 0 {
            return Err(Error::Config(ConfigError::Message(
                "storage.busy_timeout_ms must be at least 1ms".into(),
            )));
        }

        Ok(())
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("killboard.db")
}

// in ms
fn default_busy_timeout_ms() -> u64 {
    5_000
}
