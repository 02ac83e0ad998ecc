//! Wallet and loyalty command handlers.

use clap::Subcommand;
use rust_decimal::Decimal;
use srmiggy_core::{format_inr, WalletTransactionKind};

use crate::context::ClientContext;
use crate::display::{fmt_datetime, truncate};

/// Sub-commands available under `wallet`.
#[derive(Debug, Subcommand)]
pub enum WalletCommands {
    /// Current wallet balance
    Balance,
    /// Wallet credits and debits, newest first
    Transactions {
        /// Maximum number of rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Top up the wallet
    Add {
        /// Amount in rupees (e.g., 150 or 99.50)
        amount: Decimal,
    },
    /// Loyalty points balance
    Points,
}

pub(crate) async fn run_wallet(
    ctx: &mut ClientContext,
    command: WalletCommands,
) -> anyhow::Result<()> {
    ctx.require_login()?;

    match command {
        WalletCommands::Balance => {
            let balance = match ctx.api.wallet_balance().await {
                Ok(balance) => balance,
                Err(e) => return Err(ctx.api_failure("could not load wallet balance", e)),
            };
            println!("wallet balance: {}", format_inr(balance));
        }
        WalletCommands::Transactions { limit } => {
            let mut transactions = match ctx.api.wallet_transactions().await {
                Ok(transactions) => transactions,
                Err(e) => return Err(ctx.api_failure("could not load transactions", e)),
            };
            if transactions.is_empty() {
                println!("no wallet activity yet");
                return Ok(());
            }
            transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            println!("{:<18}{:<8}{:<12}DESCRIPTION", "WHEN", "TYPE", "AMOUNT");
            for tx in transactions.iter().take(limit) {
                let (kind, sign) = match tx.kind {
                    WalletTransactionKind::Credit => ("credit", "+"),
                    WalletTransactionKind::Debit => ("debit", "-"),
                };
                println!(
                    "{:<18}{:<8}{:<12}{}",
                    fmt_datetime(tx.created_at),
                    kind,
                    format!("{sign}{}", format_inr(tx.amount.abs())),
                    truncate(tx.description.as_deref().unwrap_or_default(), 50)
                );
            }
        }
        WalletCommands::Add { amount } => {
            let top_up = match ctx.api.add_money(amount).await {
                Ok(top_up) => top_up,
                Err(e) => return Err(ctx.api_failure("could not add money", e)),
            };
            if let Some(message) = top_up.message.filter(|m| !m.trim().is_empty()) {
                println!("{message}");
            }
            match top_up.balance {
                Some(balance) => println!("wallet balance: {}", format_inr(balance)),
                None => println!("added {} to your wallet", format_inr(amount)),
            }
        }
        WalletCommands::Points => {
            let points = match ctx.api.loyalty_points().await {
                Ok(points) => points,
                Err(e) => return Err(ctx.api_failure("could not load loyalty points", e)),
            };
            println!("loyalty points: {}", points.round_dp(2).normalize());
            println!("each point is worth ₹1 at checkout (`srmiggy checkout --use-points`)");
        }
    }
    Ok(())
}
