// crates/mutual-cli/src/config.rs
//
// Runtime configuration for the Mutual CLI.
// Loaded from a TOML file or populated with sensible defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use mutual_core::params::PoolParams;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutualConfig {
    /// Directory for local data storage (RocksDB).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pool parameters. The first run against a data directory records them
    /// in the database; later runs with different values are refused.
    #[serde(default)]
    pub pool: PoolParams,
}

fn default_data_dir() -> String {
    "~/.mutual/data".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for MutualConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            pool: PoolParams::default(),
        }
    }
}

impl MutualConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: MutualConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let path = expand_tilde(path);
        if let Some(parent) = Path::new(&path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Path of the RocksDB database inside the data directory.
    pub fn db_path(&self) -> String {
        format!("{}/pool_rocksdb", expand_tilde(&self.data_dir))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
