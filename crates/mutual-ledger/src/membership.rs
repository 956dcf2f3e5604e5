// crates/mutual-ledger/src/membership.rs
//
// Membership operations: credit, join, deposit, withdraw.
//
// Each operation stages its effects in a PoolTxn; the caller commits. A
// member's deposit is held in the pool and is their voting power:
//   - join:     first deposit, account must not already be a member
//   - deposit:  top-up, account must already be a member
//   - withdraw: moves deposit back out of the pool; withdrawing the full
//               deposit ends membership
//
// Withdrawals never touch votes already cast; tallies keep the weight
// snapshotted at vote time.

use mutual_core::error::MutualError;
use mutual_core::identity::AccountId;
use mutual_core::traits::{Ledger, MembershipRegistry, PoolStore};
use mutual_store::PoolTxn;

/// Credit an account's external balance out of thin air.
///
/// This stands in for the environment's native asset issuance (a faucet or
/// genesis allocation). It never touches the pool.
pub fn credit<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    account: &AccountId,
    amount: u64,
) -> Result<(), MutualError> {
    if account.is_pool() {
        return Err(MutualError::InvalidAmount(
            "the pool cannot be credited directly".to_string(),
        ));
    }
    let balance = txn
        .balance_of(account)?
        .checked_add(amount)
        .ok_or_else(|| MutualError::ArithmeticOverflow(format!("balance of {}", account)))?;
    txn.set_balance(*account, balance);
    tracing::debug!("Credited {} with {} (balance {})", account, amount, balance);
    Ok(())
}

/// Join the pool with an initial deposit.
///
/// # Errors
/// - `AlreadyMember` if the account already holds a deposit.
/// - `InvalidAmount` for a zero deposit.
/// - `InsufficientBalance` if the account cannot cover the deposit.
pub fn join<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    account: &AccountId,
    amount: u64,
) -> Result<(), MutualError> {
    if txn.is_member(account)? {
        return Err(MutualError::AlreadyMember(*account));
    }
    add_to_deposit(txn, account, amount)?;
    tracing::info!("{} joined the pool with deposit {}", account, amount);
    Ok(())
}

/// Add to an existing member's deposit.
///
/// # Errors
/// - `NotMember` if the account has no deposit.
/// - `InvalidAmount` for a zero amount.
/// - `InsufficientBalance` if the account cannot cover the amount.
pub fn deposit<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    account: &AccountId,
    amount: u64,
) -> Result<(), MutualError> {
    if !txn.is_member(account)? {
        return Err(MutualError::NotMember(*account));
    }
    add_to_deposit(txn, account, amount)?;
    tracing::info!("{} deposited {}", account, amount);
    Ok(())
}

/// Withdraw part or all of a member's deposit from the pool.
///
/// # Errors
/// - `NotMember` if the account has no deposit.
/// - `InvalidAmount` for a zero amount.
/// - `InsufficientWithdrawableBalance` if `amount` exceeds the deposit.
/// - `InsufficientPoolFunds` if payouts have drained the pool below the
///   requested amount.
pub fn withdraw<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    account: &AccountId,
    amount: u64,
) -> Result<(), MutualError> {
    let deposited = txn.voting_power(account)?;
    if deposited == 0 {
        return Err(MutualError::NotMember(*account));
    }
    if amount == 0 {
        return Err(MutualError::InvalidAmount(
            "withdrawal must be greater than zero".to_string(),
        ));
    }
    if amount > deposited {
        return Err(MutualError::InsufficientWithdrawableBalance {
            requested: amount,
            available: deposited,
        });
    }

    txn.transfer(amount, &AccountId::POOL, account)?;
    txn.set_deposit(*account, deposited - amount);
    txn.update_stats(|stats| stats.remove_deposit(amount))?;

    if deposited == amount {
        tracing::info!("{} withdrew {} and left the pool", account, amount);
    } else {
        tracing::info!(
            "{} withdrew {} (remaining deposit {})",
            account,
            amount,
            deposited - amount
        );
    }
    Ok(())
}

fn add_to_deposit<S: PoolStore + ?Sized>(
    txn: &mut PoolTxn<'_, S>,
    account: &AccountId,
    amount: u64,
) -> Result<(), MutualError> {
    if account.is_pool() {
        return Err(MutualError::InvalidAmount(
            "the pool cannot hold a membership".to_string(),
        ));
    }
    if amount == 0 {
        return Err(MutualError::InvalidAmount(
            "deposit must be greater than zero".to_string(),
        ));
    }
    let new_deposit = txn
        .deposit(account)?
        .checked_add(amount)
        .ok_or_else(|| MutualError::ArithmeticOverflow(format!("deposit of {}", account)))?;

    txn.transfer(amount, account, &AccountId::POOL)?;
    txn.set_deposit(*account, new_deposit);
    txn.update_stats(|stats| stats.add_deposit(amount))?;
    Ok(())
}
