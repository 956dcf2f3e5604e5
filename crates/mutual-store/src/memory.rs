// crates/mutual-store/src/memory.rs
//
// In-memory PoolStore backed by ordered maps.
//
// Used by unit and integration tests and by anything that embeds the engine
// without a data directory. Commit applies every entry of the WriteSet
// under `&mut self`, so it is atomic with respect to readers.

use std::collections::BTreeMap;

use mutual_core::batch::WriteSet;
use mutual_core::claim::{Claim, ClaimId};
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::params::PoolParams;
use mutual_core::pool::PoolStats;
use mutual_core::traits::PoolStore;
use mutual_core::vote::{Tally, VoteRecord};

/// Map-backed pool store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    claims: BTreeMap<ClaimId, Claim>,
    votes: BTreeMap<(ClaimId, AccountId), VoteRecord>,
    tallies: BTreeMap<ClaimId, Tally>,
    balances: BTreeMap<AccountId, u64>,
    deposits: BTreeMap<AccountId, u64>,
    pool_balance: u64,
    next_claim_id: Option<ClaimId>,
    stats: PoolStats,
    last_height: u64,
    params: Option<PoolParams>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PoolStore for MemoryStore {
    fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, MutualError> {
        Ok(self.claims.get(&id).cloned())
    }

    fn list_claims(&self) -> Result<Vec<Claim>, MutualError> {
        Ok(self.claims.values().cloned().collect())
    }

    fn get_vote(&self, claim_id: ClaimId, voter: &AccountId) -> Result<Option<VoteRecord>, MutualError> {
        Ok(self.votes.get(&(claim_id, *voter)).cloned())
    }

    fn list_votes(&self, claim_id: ClaimId) -> Result<Vec<VoteRecord>, MutualError> {
        Ok(self
            .votes
            .range((claim_id, AccountId([0u8; 32]))..=(claim_id, AccountId([0xffu8; 32])))
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn get_tally(&self, claim_id: ClaimId) -> Result<Option<Tally>, MutualError> {
        Ok(self.tallies.get(&claim_id).copied())
    }

    fn next_claim_id(&self) -> Result<ClaimId, MutualError> {
        Ok(self.next_claim_id.unwrap_or(1))
    }

    fn balance(&self, account: &AccountId) -> Result<u64, MutualError> {
        if account.is_pool() {
            return Ok(self.pool_balance);
        }
        Ok(self.balances.get(account).copied().unwrap_or(0))
    }

    fn pool_balance(&self) -> Result<u64, MutualError> {
        Ok(self.pool_balance)
    }

    fn deposit(&self, account: &AccountId) -> Result<u64, MutualError> {
        Ok(self.deposits.get(account).copied().unwrap_or(0))
    }

    fn stats(&self) -> Result<PoolStats, MutualError> {
        Ok(self.stats)
    }

    fn last_height(&self) -> Result<u64, MutualError> {
        Ok(self.last_height)
    }

    fn params(&self) -> Result<Option<PoolParams>, MutualError> {
        Ok(self.params.clone())
    }

    fn commit(&mut self, writes: WriteSet) -> Result<(), MutualError> {
        self.claims.extend(writes.claims);
        self.votes.extend(writes.votes);
        self.tallies.extend(writes.tallies);
        self.balances.extend(writes.balances);
        for (account, amount) in writes.deposits {
            if amount == 0 {
                self.deposits.remove(&account);
            } else {
                self.deposits.insert(account, amount);
            }
        }
        if let Some(balance) = writes.pool_balance {
            self.pool_balance = balance;
        }
        if let Some(next) = writes.next_claim_id {
            self.next_claim_id = Some(next);
        }
        if let Some(stats) = writes.stats {
            self.stats = stats;
        }
        if let Some(height) = writes.last_height {
            self.last_height = height;
        }
        if let Some(params) = writes.params {
            self.params = Some(params);
        }
        Ok(())
    }
}
