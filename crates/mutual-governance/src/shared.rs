// crates/mutual-governance/src/shared.rs
//
// SharedEngine: a ClaimEngine behind Arc<RwLock<>> for concurrent callers.
//
// Mutating operations take the write lock for their whole duration, so
// operations are serialized and each one observes the committed effects of
// the previous. Queries share the read lock.

use std::sync::Arc;

use tokio::sync::RwLock;

use mutual_core::claim::{Claim, ClaimId};
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::traits::PoolStore;
use mutual_core::vote::{Tally, VoteRecord};

use crate::engine::{ClaimEngine, Finalization};

/// Cloneable handle to a shared engine.
pub struct SharedEngine<S: PoolStore> {
    inner: Arc<RwLock<ClaimEngine<S>>>,
}

impl<S: PoolStore> Clone for SharedEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: PoolStore> SharedEngine<S> {
    pub fn new(engine: ClaimEngine<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub async fn file_claim(
        &self,
        caller: AccountId,
        amount: u64,
        description: String,
        now: u64,
    ) -> Result<ClaimId, MutualError> {
        self.inner
            .write()
            .await
            .file_claim(&caller, amount, &description, now)
    }

    pub async fn vote_on_claim(
        &self,
        caller: AccountId,
        claim_id: ClaimId,
        approve: bool,
        now: u64,
    ) -> Result<VoteRecord, MutualError> {
        self.inner
            .write()
            .await
            .vote_on_claim(&caller, claim_id, approve, now)
    }

    pub async fn finalize_claim(
        &self,
        caller: AccountId,
        claim_id: ClaimId,
        now: u64,
    ) -> Result<Finalization, MutualError> {
        self.inner
            .write()
            .await
            .finalize_claim(&caller, claim_id, now)
    }

    pub async fn claim(&self, claim_id: ClaimId) -> Result<Claim, MutualError> {
        self.inner.read().await.claim(claim_id)
    }

    pub async fn tally(&self, claim_id: ClaimId) -> Result<Tally, MutualError> {
        self.inner.read().await.tally(claim_id)
    }

    pub async fn votes(&self, claim_id: ClaimId) -> Result<Vec<VoteRecord>, MutualError> {
        self.inner.read().await.votes(claim_id)
    }

    pub async fn voting_power(&self, account: AccountId) -> Result<u64, MutualError> {
        self.inner.read().await.voting_power(&account)
    }

    pub async fn pool_balance(&self) -> Result<u64, MutualError> {
        self.inner.read().await.pool_balance()
    }

    pub async fn balance_of(&self, account: AccountId) -> Result<u64, MutualError> {
        self.inner.read().await.balance_of(&account)
    }
}
