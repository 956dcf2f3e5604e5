// crates/mutual-governance/src/tally.rs
//
// Vote tally bookkeeping. A mechanical accumulator: each vote adds the
// caster's snapshotted power to one side of its claim's tally. The tally is
// never rebuilt from vote records.

use mutual_core::claim::ClaimId;
use mutual_core::error::MutualError;
use mutual_core::traits::PoolStore;
use mutual_core::vote::Tally;
use mutual_store::PoolTxn;

/// Stage a zeroed tally for a newly filed claim.
pub fn open<S: PoolStore + ?Sized>(txn: &mut PoolTxn<'_, S>, claim_id: ClaimId) {
    txn.put_tally(claim_id, Tally::default());
}

/// Add `power` to the approve or reject side of a claim's tally.
pub fn record<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    claim_id: ClaimId,
    approve: bool,
    power: u64,
) -> Result<Tally, MutualError> {
    let mut tally = read(txn, claim_id)?;
    tally.record(approve, power)?;
    txn.put_tally(claim_id, tally);
    Ok(tally)
}

/// Current tally for a claim.
pub fn read<S: PoolStore + ?Sized>(txn: &PoolTxn<'_, S>, claim_id: ClaimId) -> Result<Tally, MutualError> {
    txn.tally(claim_id)?
        .ok_or(MutualError::ClaimNotFound(claim_id))
}
