// crates/mutual-core/src/pool.rs
//
// Running totals of every flow into and out of the pool.
//
// Invariant: pool_balance == total_deposits + fees_collected - total_paid_out

use serde::{Deserialize, Serialize};

use crate::error::MutualError;

/// Cumulative pool accounting, updated by every money-moving operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Sum of current member deposits (deposits minus withdrawals).
    pub total_deposits: u64,
    /// Claim fees collected to date.
    pub fees_collected: u64,
    /// Approved payouts made to date.
    pub total_paid_out: u64,
}

impl PoolStats {
    /// The pool balance implied by the recorded flows.
    ///
    /// Returns `None` if payouts exceed inflows, which can only happen if the
    /// ledger was mutated outside the tracked operations.
    pub fn expected_pool_balance(&self) -> Option<u64> {
        self.total_deposits
            .checked_add(self.fees_collected)?
            .checked_sub(self.total_paid_out)
    }

    pub fn add_deposit(&mut self, amount: u64) -> Result<(), MutualError> {
        self.total_deposits = checked(self.total_deposits.checked_add(amount), "total deposits")?;
        Ok(())
    }

    pub fn remove_deposit(&mut self, amount: u64) -> Result<(), MutualError> {
        self.total_deposits = checked(self.total_deposits.checked_sub(amount), "total deposits")?;
        Ok(())
    }

    pub fn add_fee(&mut self, amount: u64) -> Result<(), MutualError> {
        self.fees_collected = checked(self.fees_collected.checked_add(amount), "fees collected")?;
        Ok(())
    }

    pub fn add_payout(&mut self, amount: u64) -> Result<(), MutualError> {
        self.total_paid_out = checked(self.total_paid_out.checked_add(amount), "total paid out")?;
        Ok(())
    }
}

fn checked(value: Option<u64>, what: &str) -> Result<u64, MutualError> {
    value.ok_or_else(|| MutualError::ArithmeticOverflow(what.to_string()))
}
