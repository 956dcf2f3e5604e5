// crates/mutual-ledger/src/lib.rs
//
// mutual-ledger: Membership bookkeeping for the Mutual claim pool.
//
// The claim engine only consumes membership (is_member / voting_power) and
// the transfer primitive. This crate supplies the operations that produce
// that state: crediting external balances, joining with an initial deposit,
// topping up, and withdrawing. It also audits the pool's conservation
// invariant.
//
// All amounts are plain u64 units of the pool's single asset.

pub mod audit;
pub mod membership;

// Re-export key functions for ergonomic access from downstream crates.
pub use audit::audit_pool;
pub use membership::{credit, deposit, join, withdraw};
