// crates/mutual-cli/src/output.rs
//
// Rendering for command results: `tabled` rows for claims and votes, or
// pretty JSON when `--json` is passed.

use serde::Serialize;
use tabled::{Table, Tabled};

use mutual_core::claim::Claim;
use mutual_core::vote::VoteRecord;

/// How command results are printed, selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render rows (claims, votes) as a bordered table.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).to_string()
}

/// Render a result record as indented JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// A row in the claim listing table.
#[derive(Tabled)]
pub struct ClaimRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Claimant")]
    pub claimant: String,
    #[tabled(rename = "Amount")]
    pub amount: u64,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Filed")]
    pub created_at: u64,
    #[tabled(rename = "Voting Ends")]
    pub voting_ends_at: u64,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&Claim> for ClaimRow {
    fn from(c: &Claim) -> Self {
        Self {
            id: c.id,
            claimant: c.claimant.short(),
            amount: c.amount,
            status: c.status.to_string(),
            created_at: c.created_at,
            voting_ends_at: c.voting_ends_at,
            description: truncate(&c.description, 40),
        }
    }
}

/// A row in the vote listing table.
#[derive(Tabled)]
pub struct VoteRow {
    #[tabled(rename = "Voter")]
    pub voter: String,
    #[tabled(rename = "Vote")]
    pub vote: String,
    #[tabled(rename = "Weight")]
    pub weight: u64,
    #[tabled(rename = "Height")]
    pub cast_at: u64,
}

impl From<&VoteRecord> for VoteRow {
    fn from(v: &VoteRecord) -> Self {
        Self {
            voter: v.voter.short(),
            vote: if v.approve { "approve" } else { "reject" }.to_string(),
            weight: v.weight,
            cast_at: v.cast_at,
        }
    }
}

/// Truncate a string to `max_chars` characters, appending "..." if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
