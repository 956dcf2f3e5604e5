// crates/mutual-cli/src/commands/pool.rs
//
// `mutual pool {status, audit}`: pool balance, parameters, and the
// conservation check.

use clap::Subcommand;
use serde::Serialize;

use mutual_core::claim::ClaimStatus;
use mutual_core::params::PoolParams;
use mutual_core::pool::PoolStats;

use super::Context;
use crate::output::{format_json, OutputFormat};

/// Pool subcommands.
#[derive(Debug, Subcommand)]
pub enum PoolCmd {
    /// Show the pool balance, parameters, and claim counts.
    Status,
    /// Check that the pool balance equals deposits plus fees minus payouts.
    Audit,
}

#[derive(Debug, Serialize)]
struct PoolStatus {
    pool_balance: u64,
    last_height: u64,
    stats: PoolStats,
    params: PoolParams,
    active_claims: usize,
    approved_claims: usize,
    rejected_claims: usize,
}

/// Run the pool subcommand.
pub async fn run(cmd: &PoolCmd, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let engine = ctx.open_engine()?;

    match cmd {
        PoolCmd::Status => {
            let claims = engine.list_claims(None)?;
            let count = |s: ClaimStatus| claims.iter().filter(|c| c.status == s).count();
            let status = PoolStatus {
                pool_balance: engine.pool_balance()?,
                last_height: engine.last_height()?,
                stats: engine.stats()?,
                params: engine.params().clone(),
                active_claims: count(ClaimStatus::Active),
                approved_claims: count(ClaimStatus::Approved),
                rejected_claims: count(ClaimStatus::Rejected),
            };
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&status)),
                OutputFormat::Table => {
                    println!("Pool Status");
                    println!("-----------");
                    println!("  Balance:         {}", status.pool_balance);
                    println!("  Last height:     {}", status.last_height);
                    println!("  Total deposits:  {}", status.stats.total_deposits);
                    println!("  Fees collected:  {}", status.stats.fees_collected);
                    println!("  Paid out:        {}", status.stats.total_paid_out);
                    println!(
                        "  Claims:          {} active, {} approved, {} rejected",
                        status.active_claims, status.approved_claims, status.rejected_claims
                    );
                    println!();
                    println!("Parameters");
                    println!("  Max claim amount:   {}", status.params.max_claim_amount);
                    println!("  Claim fee:          {}", status.params.claim_fee);
                    println!("  Voting period:      {} blocks", status.params.voting_period);
                    println!("  Approval threshold: {}%", status.params.approval_threshold_pct);
                }
            }
        }
        PoolCmd::Audit => {
            let stats = engine.audit()?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&stats)),
                OutputFormat::Table => {
                    println!("Pool balance is consistent.");
                    println!(
                        "  {} deposits + {} fees - {} paid out = {}",
                        stats.total_deposits,
                        stats.fees_collected,
                        stats.total_paid_out,
                        engine.pool_balance()?
                    );
                }
            }
        }
    }

    Ok(())
}
