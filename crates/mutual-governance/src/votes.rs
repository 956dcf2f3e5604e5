// crates/mutual-governance/src/votes.rs
//
// Vote ledger: one record per (claim, voter), written once.

use mutual_core::claim::ClaimId;
use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::traits::PoolStore;
use mutual_core::vote::VoteRecord;
use mutual_store::PoolTxn;

/// Record a vote with the voter's power snapshotted at `now`.
///
/// # Errors
/// Returns `MutualError::AlreadyVoted` if this voter already has a record
/// for the claim.
pub fn cast<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    claim_id: ClaimId,
    voter: &AccountId,
    approve: bool,
    weight: u64,
    now: u64,
) -> Result<VoteRecord, MutualError> {
    let record = VoteRecord {
        claim_id,
        voter: *voter,
        approve,
        weight,
        cast_at: now,
    };
    txn.insert_vote(record.clone())?;
    Ok(record)
}

/// Whether `voter` has a vote on record for the claim.
pub fn has_voted<S: PoolStore + ?Sized>(
    txn: &PoolTxn<'_, S>,
    claim_id: ClaimId,
    voter: &AccountId,
) -> Result<bool, MutualError> {
    Ok(txn.vote(claim_id, voter)?.is_some())
}
