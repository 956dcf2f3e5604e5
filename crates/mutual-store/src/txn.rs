// crates/mutual-store/src/txn.rs
//
// PoolTxn: read-through overlay over a PoolStore.
//
// Reads consult the staged WriteSet first and fall back to the store.
// Writes only touch the WriteSet. `into_writes` hands the staged set back
// for a single `PoolStore::commit`; dropping the transaction discards it.
//
// PoolTxn is also the Ledger and MembershipRegistry the engine sees: the
// pool's balance is addressed as `AccountId::POOL`, and voting power is the
// staged-or-stored deposit.

use mutual_core::batch::WriteSet;
use mutual_core::claim::{Claim, ClaimId};
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::pool::PoolStats;
use mutual_core::traits::{Ledger, MembershipRegistry, PoolStore};
use mutual_core::vote::{Tally, VoteRecord};

/// A staged, uncommitted set of changes against a store.
pub struct PoolTxn<'a, S: PoolStore + ?Sized> {
    store: &'a S,
    writes: WriteSet,
}

impl<'a, S: PoolStore + ?Sized> PoolTxn<'a, S> {
    /// Begin a transaction against `store`.
    pub fn begin(store: &'a S) -> Self {
        Self {
            store,
            writes: WriteSet::new(),
        }
    }

    /// Finish the transaction, returning the staged writes for commit.
    pub fn into_writes(self) -> WriteSet {
        self.writes
    }

    pub fn claim(&self, id: ClaimId) -> Result<Option<Claim>, MutualError> {
        match self.writes.claims.get(&id) {
            Some(claim) => Ok(Some(claim.clone())),
            None => self.store.get_claim(id),
        }
    }

    pub fn put_claim(&mut self, claim: Claim) {
        self.writes.claims.insert(claim.id, claim);
    }

    pub fn tally(&self, claim_id: ClaimId) -> Result<Option<Tally>, MutualError> {
        match self.writes.tallies.get(&claim_id) {
            Some(tally) => Ok(Some(*tally)),
            None => self.store.get_tally(claim_id),
        }
    }

    pub fn put_tally(&mut self, claim_id: ClaimId, tally: Tally) {
        self.writes.tallies.insert(claim_id, tally);
    }

    pub fn vote(&self, claim_id: ClaimId, voter: &AccountId) -> Result<Option<VoteRecord>, MutualError> {
        match self.writes.votes.get(&(claim_id, *voter)) {
            Some(vote) => Ok(Some(vote.clone())),
            None => self.store.get_vote(claim_id, voter),
        }
    }

    /// Stage a vote record. Vote records are write-once: if one already
    /// exists (staged or stored) for the same key this fails with
    /// `AlreadyVoted` and stages nothing.
    pub fn insert_vote(&mut self, vote: VoteRecord) -> Result<(), MutualError> {
        if self.vote(vote.claim_id, &vote.voter)?.is_some() {
            return Err(MutualError::AlreadyVoted {
                claim_id: vote.claim_id,
                voter: vote.voter,
            });
        }
        self.writes.votes.insert((vote.claim_id, vote.voter), vote);
        Ok(())
    }

    pub fn next_claim_id(&self) -> Result<ClaimId, MutualError> {
        match self.writes.next_claim_id {
            Some(next) => Ok(next),
            None => self.store.next_claim_id(),
        }
    }

    /// Reserve the next claim id and advance the counter.
    pub fn allocate_claim_id(&mut self) -> Result<ClaimId, MutualError> {
        let id = self.next_claim_id()?;
        let next = id
            .checked_add(1)
            .ok_or_else(|| MutualError::ArithmeticOverflow("claim id counter".to_string()))?;
        self.writes.next_claim_id = Some(next);
        Ok(id)
    }

    pub fn deposit(&self, account: &AccountId) -> Result<u64, MutualError> {
        match self.writes.deposits.get(account) {
            Some(amount) => Ok(*amount),
            None => self.store.deposit(account),
        }
    }

    pub fn set_deposit(&mut self, account: AccountId, amount: u64) {
        self.writes.deposits.insert(account, amount);
    }

    pub fn stats(&self) -> Result<PoolStats, MutualError> {
        match self.writes.stats {
            Some(stats) => Ok(stats),
            None => self.store.stats(),
        }
    }

    /// Apply `f` to the current stats and stage the result.
    pub fn update_stats<F>(&mut self, f: F) -> Result<(), MutualError>
    where
        F: FnOnce(&mut PoolStats) -> Result<(), MutualError>,
    {
        let mut stats = self.stats()?;
        f(&mut stats)?;
        self.writes.stats = Some(stats);
        Ok(())
    }

    /// Set an account's external balance directly. Used by the faucet path.
    pub fn set_balance(&mut self, account: AccountId, amount: u64) {
        if account.is_pool() {
            self.writes.pool_balance = Some(amount);
        } else {
            self.writes.balances.insert(account, amount);
        }
    }
}

impl<'a, S: PoolStore + ?Sized> Ledger for PoolTxn<'a, S> {
    fn balance_of(&self, account: &AccountId) -> Result<u64, MutualError> {
        if account.is_pool() {
            return match self.writes.pool_balance {
                Some(balance) => Ok(balance),
                None => self.store.pool_balance(),
            };
        }
        match self.writes.balances.get(account) {
            Some(balance) => Ok(*balance),
            None => self.store.balance(account),
        }
    }

    fn transfer(&mut self, amount: u64, from: &AccountId, to: &AccountId) -> Result<(), MutualError> {
        let available = self.balance_of(from)?;
        if available < amount {
            return Err(if from.is_pool() {
                MutualError::InsufficientPoolFunds {
                    requested: amount,
                    available,
                }
            } else {
                MutualError::InsufficientBalance {
                    account: *from,
                    requested: amount,
                    available,
                }
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)?
            .checked_add(amount)
            .ok_or_else(|| MutualError::ArithmeticOverflow(format!("balance of {}", to)))?;

        self.set_balance(*from, available - amount);
        self.set_balance(*to, credited);
        Ok(())
    }
}

impl<'a, S: PoolStore + ?Sized> MembershipRegistry for PoolTxn<'a, S> {
    fn voting_power(&self, account: &AccountId) -> Result<u64, MutualError> {
        self.deposit(account)
    }
}
