// crates/mutual-core/src/error.rs

use thiserror::Error;

use crate::claim::{ClaimId, ClaimStatus};
use crate::identity::AccountId;

/// Error taxonomy for the Mutual claim pool.
///
/// Every public operation returns one of these as a value. Variants are
/// discrete so callers can match on them; `code()` gives a stable string
/// form for CLI output and logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutualError {
    /// Caller has no deposit in the pool.
    #[error("Account {0} is not a member")]
    NotMember(AccountId),

    /// Join attempted by an account that already holds a deposit.
    #[error("Account {0} is already a member")]
    AlreadyMember(AccountId),

    /// Requested claim amount exceeds the configured maximum.
    #[error("Claim amount {amount} exceeds the maximum of {max}")]
    InvalidClaimAmount { amount: u64, max: u64 },

    /// Claim description is empty.
    #[error("Claim description must not be empty")]
    EmptyDescription,

    /// Claim description exceeds the character bound.
    #[error("Claim description is {len} characters, maximum is {max}")]
    DescriptionTooLong { len: usize, max: usize },

    /// No claim exists with the given id.
    #[error("Claim {0} not found")]
    ClaimNotFound(ClaimId),

    /// Vote attempted after the voting window closed.
    #[error("Voting on claim {claim_id} closed at height {voting_ends_at} (now {now})")]
    VotingClosed {
        claim_id: ClaimId,
        voting_ends_at: u64,
        now: u64,
    },

    /// Claim already reached a terminal status.
    #[error("Claim {claim_id} is already finalized as {status}")]
    AlreadyFinalized {
        claim_id: ClaimId,
        status: ClaimStatus,
    },

    /// A vote record already exists for this (claim, voter) pair.
    #[error("Account {voter} has already voted on claim {claim_id}")]
    AlreadyVoted { claim_id: ClaimId, voter: AccountId },

    /// Finalize attempted while votes are still being accepted.
    #[error("Voting on claim {claim_id} is open until height {voting_ends_at} (now {now})")]
    VotingWindowStillOpen {
        claim_id: ClaimId,
        voting_ends_at: u64,
        now: u64,
    },

    /// The pool cannot cover a payout or withdrawal.
    #[error("Insufficient pool funds: requested {requested}, available {available}")]
    InsufficientPoolFunds { requested: u64, available: u64 },

    /// An account cannot cover a transfer (claim fee, deposit).
    #[error("Account {account} has insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        account: AccountId,
        requested: u64,
        available: u64,
    },

    /// Withdrawal larger than the member's deposit.
    #[error("Insufficient withdrawable balance: requested {requested}, deposited {available}")]
    InsufficientWithdrawableBalance { requested: u64, available: u64 },

    /// Zero or otherwise unusable amount for a membership operation.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Account id could not be parsed.
    #[error("Invalid account id: {0}")]
    InvalidAccount(String),

    /// An operation supplied a height below one the pool has already seen.
    #[error("Height {now} is below the last observed height {last_height}")]
    StaleHeight { now: u64, last_height: u64 },

    /// Pool parameters failed validation.
    #[error("Invalid pool parameters: {0}")]
    InvalidParams(String),

    /// A checked arithmetic operation overflowed.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Pool balance does not match deposits + fees - payouts.
    #[error("Conservation violated: pool balance {actual}, expected {expected}")]
    ConservationViolated { expected: u64, actual: u64 },

    /// Storage layer error (RocksDB).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MutualError {
    /// Stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            MutualError::NotMember(_) => "NOT_MEMBER",
            MutualError::AlreadyMember(_) => "ALREADY_MEMBER",
            MutualError::InvalidClaimAmount { .. } => "INVALID_CLAIM_AMOUNT",
            MutualError::EmptyDescription => "EMPTY_DESCRIPTION",
            MutualError::DescriptionTooLong { .. } => "DESCRIPTION_TOO_LONG",
            MutualError::ClaimNotFound(_) => "CLAIM_NOT_FOUND",
            MutualError::VotingClosed { .. } => "CLAIM_NOT_ACTIVE.VOTING_CLOSED",
            MutualError::AlreadyFinalized { .. } => "CLAIM_NOT_ACTIVE.ALREADY_FINALIZED",
            MutualError::AlreadyVoted { .. } => "ALREADY_VOTED",
            MutualError::VotingWindowStillOpen { .. } => "VOTING_WINDOW_STILL_OPEN",
            MutualError::InsufficientPoolFunds { .. } => "INSUFFICIENT_POOL_FUNDS",
            MutualError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            MutualError::InsufficientWithdrawableBalance { .. } => {
                "INSUFFICIENT_WITHDRAWABLE_BALANCE"
            }
            MutualError::InvalidAmount(_) => "INVALID_AMOUNT",
            MutualError::InvalidAccount(_) => "INVALID_ACCOUNT",
            MutualError::StaleHeight { .. } => "STALE_HEIGHT",
            MutualError::InvalidParams(_) => "INVALID_PARAMS",
            MutualError::ArithmeticOverflow(_) => "ARITHMETIC_OVERFLOW",
            MutualError::ConservationViolated { .. } => "CONSERVATION_VIOLATED",
            MutualError::Storage(_) => "STORAGE",
            MutualError::Serialization(_) => "SERIALIZATION",
        }
    }

    /// True for both sub-codes of "claim not active": the voting window
    /// closed, or the claim is already finalized.
    pub fn is_claim_not_active(&self) -> bool {
        matches!(
            self,
            MutualError::VotingClosed { .. } | MutualError::AlreadyFinalized { .. }
        )
    }
}

impl From<serde_json::Error> for MutualError {
    fn from(e: serde_json::Error) -> Self {
        MutualError::Serialization(e.to_string())
    }
}
