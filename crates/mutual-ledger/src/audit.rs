// crates/mutual-ledger/src/audit.rs
//
// Conservation audit: the pool balance must equal the sum of member
// deposits plus fees collected minus approved payouts.

use mutual_core::error::MutualError;
use mutual_core::pool::PoolStats;
use mutual_core::traits::PoolStore;

/// Check the conservation invariant against the stored pool balance.
///
/// Returns the stats on success.
///
/// # Errors
/// Returns `MutualError::ConservationViolated` if the stored balance differs
/// from the balance implied by the recorded flows.
pub fn audit_pool<S: PoolStore + ?Sized>(store: &S) -> Result<PoolStats, MutualError> {
    let stats = store.stats()?;
    let actual = store.pool_balance()?;
    let expected = stats.expected_pool_balance().ok_or_else(|| {
        MutualError::ArithmeticOverflow("payouts exceed recorded inflows".to_string())
    })?;

    if expected != actual {
        tracing::error!(
            "Pool conservation violated: balance {} but deposits {} + fees {} - payouts {} = {}",
            actual,
            stats.total_deposits,
            stats.fees_collected,
            stats.total_paid_out,
            expected
        );
        return Err(MutualError::ConservationViolated { expected, actual });
    }
    Ok(stats)
}
