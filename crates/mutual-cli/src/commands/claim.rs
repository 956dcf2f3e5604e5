// crates/mutual-cli/src/commands/claim.rs
//
// `mutual claim {file, vote, finalize, show, list, votes}`: the claim
// lifecycle. Heights are supplied by the caller with `--height` and may not
// go below the last height the pool has seen.

use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use mutual_core::claim::{Claim, ClaimStatus};
use mutual_core::vote::Tally;

use super::{resolve_account, Context};
use crate::output::{format_json, format_table, ClaimRow, OutputFormat, VoteRow};

/// How a member votes on a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Choice {
    Approve,
    Reject,
}

/// Claim subcommands.
#[derive(Debug, Subcommand)]
pub enum ClaimCmd {
    /// File a claim against the pool (pays the claim fee).
    File {
        /// Claimant account label or hex id.
        #[arg(long)]
        caller: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        description: String,
        /// Current block height. Heights below the last one the pool has
        /// seen are refused.
        #[arg(long)]
        height: u64,
    },
    /// Vote on an active claim with the caller's current deposit as weight.
    Vote {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        id: u64,
        #[arg(value_enum)]
        choice: Choice,
        #[arg(long)]
        height: u64,
    },
    /// Finalize a claim whose voting window has closed.
    Finalize {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        id: u64,
        #[arg(long)]
        height: u64,
    },
    /// Show a claim and its tally.
    Show {
        #[arg(long)]
        id: u64,
        /// Height at which to report whether voting is open.
        #[arg(long)]
        height: Option<u64>,
    },
    /// List claims, optionally filtered by status: active, approved, rejected.
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// List the vote records cast on a claim.
    Votes {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Debug, Serialize)]
struct ClaimView {
    #[serde(flatten)]
    claim: Claim,
    tally: Tally,
    #[serde(skip_serializing_if = "Option::is_none")]
    voting_open: Option<bool>,
}

/// Run the claim subcommand.
pub async fn run(cmd: &ClaimCmd, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ctx.open_engine()?;

    match cmd {
        ClaimCmd::File {
            caller,
            amount,
            description,
            height,
        } => {
            let caller = resolve_account(caller)?;
            let id = engine.file_claim(&caller, *amount, description, *height)?;
            let claim = engine.claim(id)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&claim)),
                OutputFormat::Table => {
                    println!("Claim {} filed by {}", id, caller);
                    println!("  Amount:       {}", claim.amount);
                    println!("  Fee paid:     {}", engine.params().claim_fee);
                    println!("  Voting until: height {}", claim.voting_ends_at);
                }
            }
        }
        ClaimCmd::Vote {
            caller,
            id,
            choice,
            height,
        } => {
            let caller = resolve_account(caller)?;
            let record =
                engine.vote_on_claim(&caller, *id, *choice == Choice::Approve, *height)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&record)),
                OutputFormat::Table => {
                    let tally = engine.tally(*id)?;
                    println!(
                        "{} voted {} on claim {} with weight {}",
                        caller,
                        if record.approve { "approve" } else { "reject" },
                        id,
                        record.weight
                    );
                    println!(
                        "  Tally: approve {} / reject {}",
                        tally.approve_weight, tally.reject_weight
                    );
                }
            }
        }
        ClaimCmd::Finalize { caller, id, height } => {
            let caller = resolve_account(caller)?;
            let f = engine.finalize_claim(&caller, *id, *height)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&f)),
                OutputFormat::Table => {
                    println!("Claim {} finalized: {}", f.claim_id, f.status);
                    println!(
                        "  Tally:  approve {} / reject {}",
                        f.tally.approve_weight, f.tally.reject_weight
                    );
                    if f.status == ClaimStatus::Approved {
                        println!("  Payout: {}", f.payout);
                    } else if let Some(reason) = f.reject_reason {
                        println!("  Reason: {}", reason);
                    }
                }
            }
        }
        ClaimCmd::Show { id, height } => {
            let claim = engine.claim(*id)?;
            let view = ClaimView {
                tally: engine.tally(*id)?,
                voting_open: height.map(|h| claim.is_voting_open(h)),
                claim,
            };
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&view)),
                OutputFormat::Table => {
                    println!("{}", format_table(&[ClaimRow::from(&view.claim)]));
                    println!(
                        "Tally: approve {} / reject {}",
                        view.tally.approve_weight, view.tally.reject_weight
                    );
                    if let Some(open) = view.voting_open {
                        println!("Voting open: {}", if open { "yes" } else { "no" });
                    }
                }
            }
        }
        ClaimCmd::List { status } => {
            let filter = match status {
                Some(s) => Some(
                    ClaimStatus::from_tag(s).ok_or_else(|| format!("unknown claim status: {}", s))?,
                ),
                None => None,
            };
            let claims = engine.list_claims(filter)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&claims)),
                OutputFormat::Table if claims.is_empty() => println!("No claims found."),
                OutputFormat::Table => {
                    let rows: Vec<ClaimRow> = claims.iter().map(ClaimRow::from).collect();
                    println!("{}", format_table(&rows));
                }
            }
        }
        ClaimCmd::Votes { id } => {
            engine.claim(*id)?;
            let records = engine.votes(*id)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&records)),
                OutputFormat::Table if records.is_empty() => {
                    println!("No votes on claim {}.", id)
                }
                OutputFormat::Table => {
                    let rows: Vec<VoteRow> = records.iter().map(VoteRow::from).collect();
                    println!("{}", format_table(&rows));
                }
            }
        }
    }

    Ok(())
}
