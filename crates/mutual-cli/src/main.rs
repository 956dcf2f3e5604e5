// crates/mutual-cli/src/main.rs
//
// CLI entrypoint for the Mutual claim pool.
//
// Loads configuration, initializes tracing, opens the local RocksDB pool
// database, and dispatches to the init, member, claim, and pool
// subcommands. Engine errors are printed as `error[CODE]: message`.

mod commands;
mod config;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::claim::ClaimCmd;
use commands::member::MemberCmd;
use commands::pool::PoolCmd;
use commands::Context;
use config::MutualConfig;
use output::OutputFormat;

use mutual_core::error::MutualError;

/// Mutual: a deposit-weighted mutual-insurance claim pool.
#[derive(Parser, Debug)]
#[command(
    name = "mutual",
    version = "0.1.0",
    about = "Mutual claim pool CLI: members deposit, file claims, and vote on payouts"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.mutual/config.toml")]
    config: String,

    /// Override the data directory from the config file.
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Write a default configuration file and create the data directory.
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long)]
        force: bool,
    },

    /// Account balances and pool membership.
    #[command(subcommand)]
    Member(MemberCmd),

    /// Claim lifecycle: file, vote, finalize, and inspect claims.
    #[command(subcommand)]
    Claim(ClaimCmd),

    /// Pool balance, parameters, and audit.
    #[command(subcommand)]
    Pool(PoolCmd),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is loaded before tracing so its log level can seed the filter.
    let (mut config, load_error) = match MutualConfig::load(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (MutualConfig::default(), Some(e.to_string())),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match load_error {
        None => tracing::debug!("Loaded configuration from {}", cli.config),
        Some(e) if !matches!(cli.command, Commands::Init { .. }) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
        Some(_) => {}
    }

    let ctx = Context {
        config,
        config_path: cli.config.clone(),
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        },
    };

    let result = match &cli.command {
        Commands::Init { force } => commands::init::run(&ctx, *force).await,
        Commands::Member(cmd) => commands::member::run(cmd, &ctx).await,
        Commands::Claim(cmd) => commands::claim::run(cmd, &ctx).await,
        Commands::Pool(cmd) => commands::pool::run(cmd, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MutualError>() {
                Some(err) => eprintln!("error[{}]: {}", err.code(), err),
                None => eprintln!("error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}
