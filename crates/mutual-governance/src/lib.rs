// crates/mutual-governance/src/lib.rs
//
// mutual-governance: Claim lifecycle, deposit-weighted voting, and payout
// settlement for the Mutual claim pool.
//
// This crate implements the rules that decide which claims are paid: claim
// filing, exactly-once voting inside a fixed window, incremental tallies,
// the approval threshold, and atomic finalize-and-pay.

pub mod decision;
pub mod engine;
pub mod shared;
pub mod tally;
pub mod votes;

pub use decision::{decide, Decision, RejectReason};
pub use engine::{ClaimEngine, Finalization};
pub use shared::SharedEngine;
