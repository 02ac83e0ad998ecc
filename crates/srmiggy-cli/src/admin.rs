//! Admin-only command handlers.

use clap::Subcommand;
use srmiggy_core::{format_inr, OrderStatus};

use crate::context::ClientContext;
use crate::display::{fmt_money, truncate};
use crate::orders::print_order_table;

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Platform totals
    Stats,
    /// Every order on the platform
    Orders {
        /// Only orders in this status (e.g., PENDING)
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Every vendor, including inactive ones
    Vendors,
    /// Registered users
    Users,
    /// Move an order to a new status
    SetStatus {
        order_id: i64,
        /// New status (e.g., PREPARING, out-for-delivery)
        status: OrderStatus,
    },
}

pub(crate) async fn run_admin(ctx: &mut ClientContext, command: AdminCommands) -> anyhow::Result<()> {
    ctx.require_admin()?;

    match command {
        AdminCommands::Stats => {
            let stats = match ctx.api.admin_stats().await {
                Ok(stats) => stats,
                Err(e) => return Err(ctx.api_failure("could not load stats", e)),
            };
            println!("orders:   {}", stats.total_orders);
            println!("vendors:  {}", stats.total_vendors);
            println!("users:    {}", stats.total_users);
            println!("revenue:  {}", format_inr(stats.total_revenue));
        }
        AdminCommands::Orders { status } => {
            let orders = match ctx.api.admin_orders().await {
                Ok(orders) => orders,
                Err(e) => return Err(ctx.api_failure("could not load orders", e)),
            };
            let orders: Vec<_> = orders
                .into_iter()
                .filter(|o| status.is_none() || o.status == status)
                .collect();
            if orders.is_empty() {
                println!("no matching orders");
                return Ok(());
            }
            print_order_table(&orders);
        }
        AdminCommands::Vendors => {
            let vendors = match ctx.api.admin_vendors().await {
                Ok(vendors) => vendors,
                Err(e) => return Err(ctx.api_failure("could not load vendors", e)),
            };
            println!("{:<6}{:<30}STATE", "ID", "NAME");
            for vendor in &vendors {
                println!(
                    "{:<6}{:<30}{}",
                    vendor.id,
                    truncate(&vendor.name, 28),
                    if vendor.active { "active" } else { "inactive" }
                );
            }
        }
        AdminCommands::Users => {
            let users = match ctx.api.admin_users().await {
                Ok(users) => users,
                Err(e) => return Err(ctx.api_failure("could not load users", e)),
            };
            println!("{:<6}{:<20}{:<10}{:<12}EMAIL", "ID", "USERNAME", "ROLE", "WALLET");
            for user in &users {
                println!(
                    "{:<6}{:<20}{:<10}{:<12}{}",
                    user.id.map_or_else(|| "\u{2014}".to_string(), |id| id.to_string()),
                    truncate(&user.username, 18),
                    user.role.as_deref().unwrap_or("USER"),
                    fmt_money(user.wallet_balance),
                    user.email.as_deref().unwrap_or_default()
                );
            }
        }
        AdminCommands::SetStatus { order_id, status } => {
            let order = match ctx.api.update_order_status(order_id, status).await {
                Ok(order) => order,
                Err(e) => return Err(ctx.api_failure("could not update order", e)),
            };
            println!(
                "order #{} is now {}",
                order.id,
                order.status.unwrap_or(status)
            );
        }
    }
    Ok(())
}
