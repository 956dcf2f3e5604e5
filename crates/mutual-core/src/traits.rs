// crates/mutual-core/src/traits.rs

use crate::batch::WriteSet;
use crate::claim::{Claim, ClaimId};
use crate::error::MutualError;
use crate::identity::AccountId;
use crate::params::PoolParams;
use crate::pool::PoolStats;
use crate::vote::{Tally, VoteRecord};

/// Persistent pool state: claims, votes, tallies, balances, deposits,
/// and counters.
///
/// Implemented by mutual-store (in-memory and RocksDB backends). Reads are
/// point lookups; all writes go through `commit`, which must apply the whole
/// `WriteSet` or none of it.
pub trait PoolStore: Send + Sync {
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, MutualError>;

    /// All claims in ascending id order.
    fn list_claims(&self) -> Result<Vec<Claim>, MutualError>;

    fn get_vote(&self, claim_id: ClaimId, voter: &AccountId) -> Result<Option<VoteRecord>, MutualError>;

    /// All votes on a claim. Audit only; tallies are never rebuilt from this.
    fn list_votes(&self, claim_id: ClaimId) -> Result<Vec<VoteRecord>, MutualError>;

    fn get_tally(&self, claim_id: ClaimId) -> Result<Option<Tally>, MutualError>;

    /// The id the next filed claim will receive (1 on an empty store).
    fn next_claim_id(&self) -> Result<ClaimId, MutualError>;

    /// External balance of an account. Zero for unknown accounts.
    fn balance(&self, account: &AccountId) -> Result<u64, MutualError>;

    /// Current pool balance.
    fn pool_balance(&self) -> Result<u64, MutualError>;

    /// Member deposit. Zero for non-members.
    fn deposit(&self, account: &AccountId) -> Result<u64, MutualError>;

    fn stats(&self) -> Result<PoolStats, MutualError>;

    /// Highest block height an operation has run at (0 on an empty store).
    fn last_height(&self) -> Result<u64, MutualError>;

    /// Parameters the store was first opened with, if any.
    fn params(&self) -> Result<Option<PoolParams>, MutualError>;

    /// Atomically apply a set of staged writes.
    fn commit(&mut self, writes: WriteSet) -> Result<(), MutualError>;
}

/// Value-transfer primitive over account balances and the pool.
///
/// `AccountId::POOL` addresses the pool itself.
pub trait Ledger {
    fn balance_of(&self, account: &AccountId) -> Result<u64, MutualError>;

    /// Move `amount` from `from` to `to`.
    ///
    /// Fails with `InsufficientPoolFunds` when the pool is the source and
    /// cannot cover the amount, or `InsufficientBalance` for any other source.
    /// On failure no balance changes.
    fn transfer(&mut self, amount: u64, from: &AccountId, to: &AccountId) -> Result<(), MutualError>;
}

/// Read-only membership view. Deposit size is voting power.
pub trait MembershipRegistry {
    fn voting_power(&self, account: &AccountId) -> Result<u64, MutualError>;

    fn is_member(&self, account: &AccountId) -> Result<bool, MutualError> {
        Ok(self.voting_power(account)? > 0)
    }
}
