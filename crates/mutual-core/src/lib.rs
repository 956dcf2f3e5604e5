// crates/mutual-core/src/lib.rs
//
// mutual-core: Core types, traits, and errors for the Mutual claim pool.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the claim, vote, and tally records, the pool parameters, the
// error taxonomy, and the storage/ledger trait interfaces that the lifecycle
// engine is written against.

pub mod batch;
pub mod claim;
pub mod error;
pub mod identity;
pub mod params;
pub mod pool;
pub mod traits;
pub mod vote;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use mutual_core::Claim;`

// Claim types
pub use claim::{Claim, ClaimId, ClaimStatus, MAX_DESCRIPTION_CHARS};

// Vote types
pub use vote::{Tally, VoteRecord};

// Identity
pub use identity::AccountId;

// Pool configuration and accounting
pub use params::PoolParams;
pub use pool::PoolStats;

// Batched writes
pub use batch::WriteSet;

// Error type
pub use error::MutualError;

// Traits
pub use traits::{Ledger, MembershipRegistry, PoolStore};
