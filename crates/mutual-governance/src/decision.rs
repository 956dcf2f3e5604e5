// crates/mutual-governance/src/decision.rs
//
// Threshold rule applied at finalization.
//
// A claim is approved iff approve_weight * 100 >= threshold_pct * total_weight,
// where total_weight = approve_weight + reject_weight. Both sides are
// widened to u128 so the products cannot overflow and no division is
// involved. A claim with no votes at all is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use mutual_core::vote::Tally;

/// Why a claim was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Nobody voted before the window closed.
    NoVotes,
    /// Approve weight fell short of the threshold.
    BelowThreshold,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoVotes => write!(f, "no votes cast"),
            RejectReason::BelowThreshold => write!(f, "approval below threshold"),
        }
    }
}

/// Outcome of the threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Reject(RejectReason),
}

/// Apply the approval threshold (percent of cast weight) to a tally.
pub fn decide(tally: &Tally, threshold_pct: u8) -> Decision {
    let total = tally.total();
    if total == 0 {
        return Decision::Reject(RejectReason::NoVotes);
    }
    let approve = tally.approve_weight as u128;
    if approve * 100 >= threshold_pct as u128 * total {
        Decision::Approve
    } else {
        Decision::Reject(RejectReason::BelowThreshold)
    }
}
