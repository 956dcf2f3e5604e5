// crates/mutual-core/src/claim.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MutualError;
use crate::identity::AccountId;

/// Claim identifiers are assigned sequentially starting at 1.
pub type ClaimId = u64;

/// Maximum description length, counted in Unicode scalar values.
pub const MAX_DESCRIPTION_CHARS: usize = 256;

/// Lifecycle status of a claim.
///
///   Active --> Approved   (window closed, threshold met, payout made)
///      |
///      +-----> Rejected   (window closed, threshold not met or no votes)
///
/// Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Accepting votes (or awaiting finalization once the window closes).
    Active,
    /// Approved by vote and paid out.
    Approved,
    /// Rejected by vote, or closed with no votes cast.
    Rejected,
}

impl ClaimStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Active)
    }

    /// Short, stable tag used for CLI status filters and display.
    pub fn tag(&self) -> &'static str {
        match self {
            ClaimStatus::Active => "active",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Parse a tag produced by `tag()`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "active" => Some(ClaimStatus::Active),
            "approved" => Some(ClaimStatus::Approved),
            "rejected" => Some(ClaimStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A request for payout from the pool, decided by member vote.
///
/// Every field except `status` is fixed at filing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    /// Member who filed the claim and receives the payout on approval.
    pub claimant: AccountId,
    /// Requested payout.
    pub amount: u64,
    pub description: String,
    pub status: ClaimStatus,
    /// Block height at filing.
    pub created_at: u64,
    /// Last block height at which votes are accepted.
    pub voting_ends_at: u64,
}

impl Claim {
    /// Whether a vote cast at `now` would be accepted.
    pub fn is_voting_open(&self, now: u64) -> bool {
        self.status == ClaimStatus::Active && now <= self.voting_ends_at
    }

    /// Whether the voting window has closed as of `now`.
    pub fn window_closed(&self, now: u64) -> bool {
        now > self.voting_ends_at
    }
}

/// Check a claim description against the length bounds.
pub fn validate_description(description: &str) -> Result<(), MutualError> {
    if description.trim().is_empty() {
        return Err(MutualError::EmptyDescription);
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(MutualError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_claim(status: ClaimStatus) -> Claim {
        Claim {
            id: 1,
            claimant: AccountId::from_label("alice"),
            amount: 500,
            description: "roof damage".to_string(),
            status,
            created_at: 100,
            voting_ends_at: 110,
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ClaimStatus::Active.is_terminal());
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_tag_roundtrip() {
        for status in [ClaimStatus::Active, ClaimStatus::Approved, ClaimStatus::Rejected] {
            assert_eq!(ClaimStatus::from_tag(status.tag()), Some(status));
        }
        assert_eq!(ClaimStatus::from_tag("pending"), None);
    }

    #[test]
    fn test_status_serializes_as_snake_case() {
        let json = serde_json::to_string(&ClaimStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }

    #[test]
    fn test_voting_window_inclusive_end() {
        let claim = make_claim(ClaimStatus::Active);
        assert!(claim.is_voting_open(100));
        assert!(claim.is_voting_open(110));
        assert!(!claim.is_voting_open(111));
        assert!(!claim.window_closed(110));
        assert!(claim.window_closed(111));
    }

    #[test]
    fn test_voting_closed_for_terminal_claim() {
        let claim = make_claim(ClaimStatus::Rejected);
        assert!(!claim.is_voting_open(105));
    }

    #[test]
    fn test_description_bounds() {
        assert_eq!(validate_description(""), Err(MutualError::EmptyDescription));
        assert_eq!(validate_description("   "), Err(MutualError::EmptyDescription));
        assert!(validate_description("flood").is_ok());
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_CHARS)).is_ok());
        assert_eq!(
            validate_description(&"a".repeat(MAX_DESCRIPTION_CHARS + 1)),
            Err(MutualError::DescriptionTooLong {
                len: MAX_DESCRIPTION_CHARS + 1,
                max: MAX_DESCRIPTION_CHARS
            })
        );
    }

    #[test]
    fn test_description_counts_chars_not_bytes() {
        // 256 three-byte characters is within bounds.
        let text = "\u{20ac}".repeat(MAX_DESCRIPTION_CHARS);
        assert!(text.len() > MAX_DESCRIPTION_CHARS);
        assert!(validate_description(&text).is_ok());
    }
}
