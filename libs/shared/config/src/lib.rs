use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Snapshot artifact written next to the process when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "careconnect_system.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_file = env::var("CARECONNECT_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                warn!("CARECONNECT_DATA_FILE not set, using default");
                PathBuf::from(DEFAULT_DATA_FILE)
            });

        Self { data_file }
    }
}
