// crates/mutual-core/src/vote.rs

use serde::{Deserialize, Serialize};

use crate::claim::ClaimId;
use crate::error::MutualError;
use crate::identity::AccountId;

/// A single cast vote. Written once per (claim, voter) and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub claim_id: ClaimId,
    pub voter: AccountId,
    /// `true` to approve, `false` to reject.
    pub approve: bool,
    /// Voter's deposit at the moment the vote was cast.
    pub weight: u64,
    /// Block height the vote was cast at.
    pub cast_at: u64,
}

/// Deposit-weighted vote totals for one claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub approve_weight: u64,
    pub reject_weight: u64,
}

impl Tally {
    /// Add `power` to exactly one side.
    pub fn record(&mut self, approve: bool, power: u64) -> Result<(), MutualError> {
        let side = if approve {
            &mut self.approve_weight
        } else {
            &mut self.reject_weight
        };
        *side = side
            .checked_add(power)
            .ok_or_else(|| MutualError::ArithmeticOverflow("vote tally".to_string()))?;
        Ok(())
    }

    /// Total cast weight. Widened so the sum of two u64 sides cannot overflow.
    pub fn total(&self) -> u128 {
        self.approve_weight as u128 + self.reject_weight as u128
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
