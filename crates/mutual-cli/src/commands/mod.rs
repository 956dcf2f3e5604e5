// crates/mutual-cli/src/commands/mod.rs
//
// Command module declarations for the Mutual CLI, plus the context every
// command runs with.

pub mod claim;
pub mod init;
pub mod member;
pub mod pool;

use std::fs;

use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_governance::ClaimEngine;
use mutual_store::RocksStore;

use crate::config::{expand_tilde, MutualConfig};
use crate::output::OutputFormat;

/// Settings resolved from global flags and the config file.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: MutualConfig,
    pub config_path: String,
    pub format: OutputFormat,
}

impl Context {
    /// Open the engine over the RocksDB database in the data directory.
    pub fn open_engine(&self) -> Result<ClaimEngine<RocksStore>, Box<dyn std::error::Error>> {
        fs::create_dir_all(expand_tilde(&self.config.data_dir))?;
        let db_path = self.config.db_path();
        let store = RocksStore::open(&db_path)?;
        tracing::debug!("Opened pool database at {}", db_path);
        Ok(ClaimEngine::new(store, self.config.pool.clone())?)
    }
}

/// Resolve an account argument: 64 hex characters are taken as a raw
/// account id, anything else is hashed as a label.
pub fn resolve_account(arg: &str) -> Result<AccountId, MutualError> {
    if arg.len() == 64 && arg.chars().all(|c| c.is_ascii_hexdigit()) {
        arg.parse()
    } else if arg.trim().is_empty() {
        Err(MutualError::InvalidAccount("account must not be empty".to_string()))
    } else {
        Ok(AccountId::from_label(arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_label_and_hex_agree() {
        let by_label = resolve_account("alice").unwrap();
        let by_hex = resolve_account(&by_label.to_hex()).unwrap();
        assert_eq!(by_label, by_hex);
    }

    #[test]
    fn test_resolve_empty_rejected() {
        assert_eq!(resolve_account("  ").unwrap_err().code(), "INVALID_ACCOUNT");
    }
}
