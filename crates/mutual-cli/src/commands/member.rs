// crates/mutual-cli/src/commands/member.rs
//
// `mutual member {fund, join, deposit, withdraw, info}`: account balances
// and pool membership.

use clap::Subcommand;
use serde::Serialize;

use super::{resolve_account, Context};
use crate::output::{format_json, OutputFormat};

/// Membership subcommands.
#[derive(Debug, Subcommand)]
pub enum MemberCmd {
    /// Credit an account's external balance.
    Fund {
        /// Account label or 64-character hex id.
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u64,
    },
    /// Join the pool with an initial deposit.
    Join {
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u64,
    },
    /// Add to an existing deposit.
    Deposit {
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u64,
    },
    /// Withdraw part or all of a deposit back to the account balance.
    Withdraw {
        #[arg(long)]
        account: String,
        #[arg(long)]
        amount: u64,
    },
    /// Show balance, deposit, and membership for an account.
    Info {
        #[arg(long)]
        account: String,
    },
}

#[derive(Debug, Serialize)]
struct MemberInfo {
    account: String,
    balance: u64,
    deposit: u64,
    member: bool,
}

/// Run the member subcommand.
pub async fn run(cmd: &MemberCmd, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ctx.open_engine()?;

    let account_arg = match cmd {
        MemberCmd::Fund { account, amount } => {
            let id = resolve_account(account)?;
            engine.credit(&id, *amount)?;
            println!("Credited {} to {}", amount, id);
            account
        }
        MemberCmd::Join { account, amount } => {
            let id = resolve_account(account)?;
            engine.join(&id, *amount)?;
            println!("{} joined the pool with a deposit of {}", id, amount);
            account
        }
        MemberCmd::Deposit { account, amount } => {
            let id = resolve_account(account)?;
            engine.deposit(&id, *amount)?;
            println!("Deposited {} for {}", amount, id);
            account
        }
        MemberCmd::Withdraw { account, amount } => {
            let id = resolve_account(account)?;
            engine.withdraw(&id, *amount)?;
            println!("Withdrew {} for {}", amount, id);
            account
        }
        MemberCmd::Info { account } => account,
    };

    let id = resolve_account(account_arg)?;
    let info = MemberInfo {
        account: id.to_hex(),
        balance: engine.balance_of(&id)?,
        deposit: engine.voting_power(&id)?,
        member: engine.is_member(&id)?,
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&info)),
        OutputFormat::Table => {
            println!();
            println!("Account {}", id);
            println!("  Id:       {}", info.account);
            println!("  Balance:  {}", info.balance);
            println!("  Deposit:  {}", info.deposit);
            println!("  Member:   {}", if info.member { "yes" } else { "no" });
        }
    }

    Ok(())
}
