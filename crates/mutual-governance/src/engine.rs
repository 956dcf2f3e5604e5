// crates/mutual-governance/src/engine.rs
//
// ClaimEngine: the claim lifecycle over an injected PoolStore.
//
// Every mutating operation runs inside `execute`: it begins a PoolTxn,
// validates all preconditions, stages its writes (including ledger
// transfers), and commits the WriteSet in one step. Any error before the
// commit drops the transaction, so an operation either applies all of its
// effects or none of them.
//
// The caller identity and the block height are explicit arguments. Window
// expiry is evaluated against that height when an operation runs; nothing
// happens in the background. The store keeps the highest height any
// operation has run at, including ones that failed, and heights below it
// are refused, so a window observed closed stays closed.
//
// Pool parameters are bound to the store on first use. Reopening a store
// with different parameters fails.

use serde::{Deserialize, Serialize};

use mutual_core::batch::WriteSet;
use mutual_core::claim::{validate_description, Claim, ClaimId, ClaimStatus};
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::params::PoolParams;
use mutual_core::pool::PoolStats;
use mutual_core::traits::{Ledger, MembershipRegistry, PoolStore};
use mutual_core::vote::{Tally, VoteRecord};
use mutual_store::PoolTxn;

use crate::decision::{decide, Decision, RejectReason};
use crate::{tally, votes};

/// Result of a successful `finalize_claim`.
///
/// A claim finalized as Rejected is a success; only a failed finalize call
/// returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finalization {
    pub claim_id: ClaimId,
    /// Terminal status: `Approved` or `Rejected`.
    pub status: ClaimStatus,
    /// Amount transferred to the claimant (zero when rejected).
    pub payout: u64,
    /// Final tally the decision was made on.
    pub tally: Tally,
    /// Set when the claim was rejected.
    pub reject_reason: Option<RejectReason>,
}

/// Claim lifecycle engine.
pub struct ClaimEngine<S: PoolStore> {
    store: S,
    params: PoolParams,
}

impl<S: PoolStore> ClaimEngine<S> {
    /// Create an engine over `store`.
    ///
    /// A store that has never been bound records `params`; a bound store
    /// must be opened with the same parameters it recorded.
    ///
    /// # Errors
    /// Returns `MutualError::InvalidParams` if `params` fail validation or
    /// differ from the parameters stored with the pool.
    pub fn new(mut store: S, params: PoolParams) -> Result<Self, MutualError> {
        params.validate()?;
        match store.params()? {
            Some(stored) if stored != params => {
                return Err(MutualError::InvalidParams(format!(
                    "pool was created with {:?}, refusing to open with {:?}",
                    stored, params
                )));
            }
            Some(_) => {}
            None => {
                store.commit(WriteSet {
                    params: Some(params.clone()),
                    ..WriteSet::new()
                })?;
                tracing::info!("Bound pool parameters to store: {:?}", params);
            }
        }
        Ok(Self { store, params })
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run `op` in a transaction and commit its writes if it succeeds.
    fn execute<T, F>(&mut self, op: F) -> Result<T, MutualError>
    where
        F: FnOnce(&mut PoolTxn<'_, S>, &PoolParams) -> Result<T, MutualError>,
    {
        let mut txn = PoolTxn::begin(&self.store);
        let out = op(&mut txn, &self.params)?;
        let writes = txn.into_writes();
        if !writes.is_empty() {
            self.store.commit(writes)?;
        }
        Ok(out)
    }

    /// Run `op` at block height `now`.
    ///
    /// Refuses heights below the stored high-water mark. The mark advances
    /// to `now` even when `op` fails, so a failed finalize past the window
    /// still closes the window for later callers.
    fn execute_at<T, F>(&mut self, now: u64, op: F) -> Result<T, MutualError>
    where
        F: FnOnce(&mut PoolTxn<'_, S>, &PoolParams) -> Result<T, MutualError>,
    {
        let last_height = self.store.last_height()?;
        if now < last_height {
            return Err(MutualError::StaleHeight { now, last_height });
        }

        let (out, mut writes) = {
            let mut txn = PoolTxn::begin(&self.store);
            let out = op(&mut txn, &self.params);
            let writes = if out.is_ok() {
                txn.into_writes()
            } else {
                WriteSet::new()
            };
            (out, writes)
        };
        if now > last_height {
            writes.last_height = Some(now);
        }
        if !writes.is_empty() {
            self.store.commit(writes)?;
        }
        out
    }

    /// Read-only view used by the query methods.
    fn reader(&self) -> PoolTxn<'_, S> {
        PoolTxn::begin(&self.store)
    }

    // ---------------------------------------------------------------
    // Claim lifecycle
    // ---------------------------------------------------------------

    /// File a claim for `amount` on behalf of `caller` at height `now`.
    ///
    /// Moves the claim fee from the caller's balance into the pool, assigns
    /// the next claim id, and opens a voting window of `voting_period`
    /// blocks ending at `now + voting_period` (inclusive).
    ///
    /// # Errors
    /// - `NotMember` if the caller has no deposit.
    /// - `InvalidClaimAmount` if `amount` exceeds `max_claim_amount`.
    /// - `EmptyDescription` / `DescriptionTooLong` for a bad description.
    /// - `InsufficientBalance` if the caller cannot pay the fee.
    /// - `StaleHeight` if `now` is below the last observed height.
    pub fn file_claim(
        &mut self,
        caller: &AccountId,
        amount: u64,
        description: &str,
        now: u64,
    ) -> Result<ClaimId, MutualError> {
        let result = self.execute_at(now, |txn, params| {
            if !txn.is_member(caller)? {
                return Err(MutualError::NotMember(*caller));
            }
            if amount > params.max_claim_amount {
                return Err(MutualError::InvalidClaimAmount {
                    amount,
                    max: params.max_claim_amount,
                });
            }
            validate_description(description)?;
            let voting_ends_at = now.checked_add(params.voting_period).ok_or_else(|| {
                MutualError::ArithmeticOverflow("voting window end".to_string())
            })?;

            txn.transfer(params.claim_fee, caller, &AccountId::POOL)?;
            txn.update_stats(|stats| stats.add_fee(params.claim_fee))?;

            let id = txn.allocate_claim_id()?;
            txn.put_claim(Claim {
                id,
                claimant: *caller,
                amount,
                description: description.to_string(),
                status: ClaimStatus::Active,
                created_at: now,
                voting_ends_at,
            });
            tally::open(txn, id);
            Ok((id, voting_ends_at))
        });

        match result {
            Ok((id, voting_ends_at)) => {
                tracing::info!(
                    "Claim {} filed by {} for {} (voting until height {})",
                    id,
                    caller,
                    amount,
                    voting_ends_at
                );
                Ok(id)
            }
            Err(e) => {
                tracing::debug!("file_claim by {} rejected: {}", caller, e);
                Err(e)
            }
        }
    }

    /// Cast `caller`'s vote on a claim at height `now`.
    ///
    /// The caller's current deposit is added to the chosen side of the
    /// tally and recorded on the vote. Later deposit changes do not alter
    /// weight already cast.
    ///
    /// # Errors
    /// - `NotMember` if the caller has no deposit.
    /// - `ClaimNotFound` if the claim does not exist.
    /// - `AlreadyFinalized` if the claim is no longer active.
    /// - `VotingClosed` if `now` is past the claim's voting window.
    /// - `AlreadyVoted` if the caller already voted on this claim.
    /// - `StaleHeight` if `now` is below the last observed height.
    pub fn vote_on_claim(
        &mut self,
        caller: &AccountId,
        claim_id: ClaimId,
        approve: bool,
        now: u64,
    ) -> Result<VoteRecord, MutualError> {
        let result = self.execute_at(now, |txn, _params| {
            let power = txn.voting_power(caller)?;
            if power == 0 {
                return Err(MutualError::NotMember(*caller));
            }
            let claim = txn
                .claim(claim_id)?
                .ok_or(MutualError::ClaimNotFound(claim_id))?;
            if claim.status.is_terminal() {
                return Err(MutualError::AlreadyFinalized {
                    claim_id,
                    status: claim.status,
                });
            }
            if claim.window_closed(now) {
                return Err(MutualError::VotingClosed {
                    claim_id,
                    voting_ends_at: claim.voting_ends_at,
                    now,
                });
            }

            let record = votes::cast(txn, claim_id, caller, approve, power, now)?;
            tally::record(txn, claim_id, approve, power)?;
            Ok(record)
        });

        match result {
            Ok(record) => {
                tracing::info!(
                    "{} voted {} on claim {} with weight {}",
                    caller,
                    if approve { "approve" } else { "reject" },
                    claim_id,
                    record.weight
                );
                Ok(record)
            }
            Err(e) => {
                tracing::debug!("vote by {} on claim {} rejected: {}", caller, claim_id, e);
                Err(e)
            }
        }
    }

    /// Close out a claim whose voting window has passed.
    ///
    /// Anyone may call this. If the tally meets the approval threshold the
    /// claim amount is paid from the pool to the claimant in the same
    /// commit that marks the claim Approved; otherwise the claim is marked
    /// Rejected and nothing moves.
    ///
    /// # Errors
    /// - `ClaimNotFound` if the claim does not exist.
    /// - `AlreadyFinalized` if the claim is already Approved or Rejected.
    /// - `VotingWindowStillOpen` if `now <= voting_ends_at`.
    /// - `InsufficientPoolFunds` if the claim is approved but the pool
    ///   cannot cover it. The claim stays Active and may be finalized again
    ///   once the pool is replenished.
    /// - `StaleHeight` if `now` is below the last observed height.
    pub fn finalize_claim(
        &mut self,
        caller: &AccountId,
        claim_id: ClaimId,
        now: u64,
    ) -> Result<Finalization, MutualError> {
        let result = self.execute_at(now, |txn, params| {
            let mut claim = txn
                .claim(claim_id)?
                .ok_or(MutualError::ClaimNotFound(claim_id))?;
            if claim.status.is_terminal() {
                return Err(MutualError::AlreadyFinalized {
                    claim_id,
                    status: claim.status,
                });
            }
            if !claim.window_closed(now) {
                return Err(MutualError::VotingWindowStillOpen {
                    claim_id,
                    voting_ends_at: claim.voting_ends_at,
                    now,
                });
            }

            let tally = tally::read(txn, claim_id)?;
            let finalization = match decide(&tally, params.approval_threshold_pct) {
                Decision::Approve => {
                    txn.transfer(claim.amount, &AccountId::POOL, &claim.claimant)?;
                    txn.update_stats(|stats| stats.add_payout(claim.amount))?;
                    claim.status = ClaimStatus::Approved;
                    Finalization {
                        claim_id,
                        status: ClaimStatus::Approved,
                        payout: claim.amount,
                        tally,
                        reject_reason: None,
                    }
                }
                Decision::Reject(reason) => {
                    claim.status = ClaimStatus::Rejected;
                    Finalization {
                        claim_id,
                        status: ClaimStatus::Rejected,
                        payout: 0,
                        tally,
                        reject_reason: Some(reason),
                    }
                }
            };
            txn.put_claim(claim);
            Ok(finalization)
        });

        match &result {
            Ok(f) => tracing::info!(
                "Claim {} finalized as {} by {} (approve {}, reject {}, payout {})",
                claim_id,
                f.status,
                caller,
                f.tally.approve_weight,
                f.tally.reject_weight,
                f.payout
            ),
            Err(MutualError::InsufficientPoolFunds { requested, available }) => tracing::warn!(
                "Claim {} approved but pool holds {} of {}; left active for retry",
                claim_id,
                available,
                requested
            ),
            Err(e) => tracing::debug!("finalize of claim {} rejected: {}", claim_id, e),
        }
        result
    }

    // ---------------------------------------------------------------
    // Membership (delegates to mutual-ledger)
    // ---------------------------------------------------------------

    /// Credit an account's external balance (faucet / genesis allocation).
    pub fn credit(&mut self, account: &AccountId, amount: u64) -> Result<(), MutualError> {
        self.execute(|txn, _| mutual_ledger::credit(txn, account, amount))
    }

    /// Join the pool with an initial deposit.
    pub fn join(&mut self, account: &AccountId, amount: u64) -> Result<(), MutualError> {
        self.execute(|txn, _| mutual_ledger::join(txn, account, amount))
    }

    /// Add to an existing member's deposit.
    pub fn deposit(&mut self, account: &AccountId, amount: u64) -> Result<(), MutualError> {
        self.execute(|txn, _| mutual_ledger::deposit(txn, account, amount))
    }

    /// Withdraw from a member's deposit.
    pub fn withdraw(&mut self, account: &AccountId, amount: u64) -> Result<(), MutualError> {
        self.execute(|txn, _| mutual_ledger::withdraw(txn, account, amount))
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn claim(&self, claim_id: ClaimId) -> Result<Claim, MutualError> {
        self.store
            .get_claim(claim_id)?
            .ok_or(MutualError::ClaimNotFound(claim_id))
    }

    pub fn tally(&self, claim_id: ClaimId) -> Result<Tally, MutualError> {
        tally::read(&self.reader(), claim_id)
    }

    /// Whether the claim is Active and still accepting votes at `now`.
    pub fn is_claim_active(&self, claim_id: ClaimId, now: u64) -> Result<bool, MutualError> {
        Ok(self.claim(claim_id)?.is_voting_open(now))
    }

    /// All claims in id order, optionally filtered by status.
    pub fn list_claims(&self, status: Option<ClaimStatus>) -> Result<Vec<Claim>, MutualError> {
        let claims = self.store.list_claims()?;
        Ok(match status {
            Some(s) => claims.into_iter().filter(|c| c.status == s).collect(),
            None => claims,
        })
    }

    /// Vote records on a claim, for audit.
    pub fn votes(&self, claim_id: ClaimId) -> Result<Vec<VoteRecord>, MutualError> {
        self.store.list_votes(claim_id)
    }

    pub fn has_voted(&self, claim_id: ClaimId, voter: &AccountId) -> Result<bool, MutualError> {
        votes::has_voted(&self.reader(), claim_id, voter)
    }

    pub fn is_member(&self, account: &AccountId) -> Result<bool, MutualError> {
        self.reader().is_member(account)
    }

    pub fn voting_power(&self, account: &AccountId) -> Result<u64, MutualError> {
        self.reader().voting_power(account)
    }

    pub fn balance_of(&self, account: &AccountId) -> Result<u64, MutualError> {
        self.reader().balance_of(account)
    }

    pub fn pool_balance(&self) -> Result<u64, MutualError> {
        self.reader().balance_of(&AccountId::POOL)
    }

    pub fn stats(&self) -> Result<PoolStats, MutualError> {
        self.store.stats()
    }

    /// Highest block height any lifecycle operation has run at.
    pub fn last_height(&self) -> Result<u64, MutualError> {
        self.store.last_height()
    }

    /// Verify the pool conservation invariant.
    pub fn audit(&self) -> Result<PoolStats, MutualError> {
        mutual_ledger::audit_pool(&self.store)
    }
}
