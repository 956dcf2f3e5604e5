// crates/mutual-core/src/identity.rs

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::MutualError;

/// A 32-byte account identifier.
///
/// The all-zero id is reserved for the pool itself: transfers into and out of
/// the pool address it as `AccountId::POOL`, and its balance is the pool
/// balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The pool's own account.
    pub const POOL: AccountId = AccountId([0u8; 32]);

    /// Derive an account id from a human-readable label (SHA-256 of the label).
    ///
    /// Used by the CLI and tests so members can be named `alice`, `bob`, ...
    pub fn from_label(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"mutual:account:");
        hasher.update(label.as_bytes());
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        AccountId(out)
    }

    pub fn is_pool(&self) -> bool {
        *self == Self::POOL
    }

    /// Lowercase hex encoding (64 chars).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Abbreviated hex for log lines and tables.
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        format!("{}..{}", &hex[..6], &hex[58..])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pool() {
            write!(f, "pool")
        } else {
            write!(f, "{}", self.short())
        }
    }
}

impl FromStr for AccountId {
    type Err = MutualError;

    /// Parse a 64-character hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 || !s.is_ascii() {
            return Err(MutualError::InvalidAccount(format!(
                "account id must be 64 hex characters, got {:?}",
                s
            )));
        }
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|e| {
                MutualError::InvalidAccount(format!("invalid hex in account id: {}", e))
            })?;
        }
        Ok(AccountId(out))
    }
}
