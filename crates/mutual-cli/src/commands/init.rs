// crates/mutual-cli/src/commands/init.rs
//
// `mutual init`: write a default configuration file and create the data
// directory.

use std::fs;
use std::path::Path;

use super::Context;
use crate::config::{expand_tilde, MutualConfig};

/// Run the init command.
pub async fn run(ctx: &Context, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = expand_tilde(&ctx.config_path);
    if Path::new(&path).exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path).into());
    }

    let config = MutualConfig {
        data_dir: ctx.config.data_dir.clone(),
        ..MutualConfig::default()
    };
    config.save(&path)?;
    fs::create_dir_all(expand_tilde(&config.data_dir))?;
    tracing::info!("Wrote default configuration to {}", path);

    println!("Initialized Mutual pool configuration.");
    println!("  Config:   {}", path);
    println!("  Data dir: {}", expand_tilde(&config.data_dir));
    println!();
    println!("Pool parameters");
    println!("  Max claim amount:   {}", config.pool.max_claim_amount);
    println!("  Claim fee:          {}", config.pool.claim_fee);
    println!("  Voting period:      {} blocks", config.pool.voting_period);
    println!("  Approval threshold: {}%", config.pool.approval_threshold_pct);

    Ok(())
}
