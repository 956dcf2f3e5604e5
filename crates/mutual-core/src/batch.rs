// crates/mutual-core/src/batch.rs
//
// WriteSet: the staged effects of one operation.
//
// An operation reads through a transactional overlay, stages every write
// here, and hands the whole set to `PoolStore::commit` at the end. If the
// operation fails before commit, the set is dropped and nothing is written.

use std::collections::BTreeMap;

use crate::claim::{Claim, ClaimId};
use crate::identity::AccountId;
use crate::params::PoolParams;
use crate::pool::PoolStats;
use crate::vote::{Tally, VoteRecord};

/// Pending writes for a single atomic commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    pub claims: BTreeMap<ClaimId, Claim>,
    pub votes: BTreeMap<(ClaimId, AccountId), VoteRecord>,
    pub tallies: BTreeMap<ClaimId, Tally>,
    /// External account balances. Never contains `AccountId::POOL`.
    pub balances: BTreeMap<AccountId, u64>,
    /// Member deposits. A zero entry means the account left the pool.
    pub deposits: BTreeMap<AccountId, u64>,
    pub pool_balance: Option<u64>,
    pub next_claim_id: Option<ClaimId>,
    pub stats: Option<PoolStats>,
    /// Highest block height any operation has run at.
    pub last_height: Option<u64>,
    /// Pool parameters, written once when a store is first bound to an engine.
    pub params: Option<PoolParams>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
            && self.votes.is_empty()
            && self.tallies.is_empty()
            && self.balances.is_empty()
            && self.deposits.is_empty()
            && self.pool_balance.is_none()
            && self.next_claim_id.is_none()
            && self.stats.is_none()
            && self.last_height.is_none()
            && self.params.is_none()
    }

    /// Number of individual records this set will write.
    pub fn len(&self) -> usize {
        self.claims.len()
            + self.votes.len()
            + self.tallies.len()
            + self.balances.len()
            + self.deposits.len()
            + self.pool_balance.is_some() as usize
            + self.next_claim_id.is_some() as usize
            + self.stats.is_some() as usize
            + self.last_height.is_some() as usize
            + self.params.is_some() as usize
    }
}
