// crates/mutual-core/src/params.rs
//
// Pool-wide parameters fixed at deployment.
//
// Defaults:
//   - max_claim_amount:       5,000,000 units
//   - claim_fee:                 50,000 units (anti-spam, paid into the pool)
//   - voting_period:              1,440 blocks
//   - approval_threshold_pct:        70 (percent of cast weight)

use serde::{Deserialize, Serialize};

use crate::error::MutualError;

pub const DEFAULT_MAX_CLAIM_AMOUNT: u64 = 5_000_000;
pub const DEFAULT_CLAIM_FEE: u64 = 50_000;
pub const DEFAULT_VOTING_PERIOD: u64 = 1_440;
pub const DEFAULT_APPROVAL_THRESHOLD_PCT: u8 = 70;

/// Parameters governing claim filing, voting, and finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    /// Largest payout a single claim may request.
    #[serde(default = "default_max_claim_amount")]
    pub max_claim_amount: u64,

    /// Fee moved from the claimant to the pool when a claim is filed.
    #[serde(default = "default_claim_fee")]
    pub claim_fee: u64,

    /// Length of the voting window in blocks.
    #[serde(default = "default_voting_period")]
    pub voting_period: u64,

    /// Percentage of cast weight that must approve, 1..=100.
    #[serde(default = "default_approval_threshold_pct")]
    pub approval_threshold_pct: u8,
}

fn default_max_claim_amount() -> u64 {
    DEFAULT_MAX_CLAIM_AMOUNT
}

fn default_claim_fee() -> u64 {
    DEFAULT_CLAIM_FEE
}

fn default_voting_period() -> u64 {
    DEFAULT_VOTING_PERIOD
}

fn default_approval_threshold_pct() -> u8 {
    DEFAULT_APPROVAL_THRESHOLD_PCT
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            max_claim_amount: default_max_claim_amount(),
            claim_fee: default_claim_fee(),
            voting_period: default_voting_period(),
            approval_threshold_pct: default_approval_threshold_pct(),
        }
    }
}

impl PoolParams {
    /// Reject parameter sets the engine cannot operate under.
    pub fn validate(&self) -> Result<(), MutualError> {
        if self.approval_threshold_pct == 0 || self.approval_threshold_pct > 100 {
            return Err(MutualError::InvalidParams(format!(
                "approval_threshold_pct must be in 1..=100, got {}",
                self.approval_threshold_pct
            )));
        }
        if self.voting_period == 0 {
            return Err(MutualError::InvalidParams(
                "voting_period must be at least one block".to_string(),
            ));
        }
        Ok(())
    }
}
