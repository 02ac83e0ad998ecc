mod admin;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod context;
mod display;
mod orders;
mod theme;
mod wallet;

use clap::{Parser, Subcommand};
use srmiggy_core::{MenuFilter, PaymentMethod, SlotId};
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::cart::CartCommands;
use crate::context::ClientContext;
use crate::theme::ThemeMode;
use crate::wallet::WalletCommands;

#[derive(Debug, Parser)]
#[command(name = "srmiggy")]
#[command(about = "SRMiggy campus food delivery from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "SRMIGGY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "SRMIGGY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List vendors
    Vendors,
    /// Show a vendor's menu
    Menu {
        vendor_id: i64,
        /// Only vegetarian items
        #[arg(long, conflicts_with = "non_veg")]
        veg: bool,
        /// Only non-vegetarian items
        #[arg(long)]
        non_veg: bool,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Today's delivery slots
    Slots,
    /// Place the cart as an order
    Checkout {
        /// Delivery slot id (see `srmiggy slots`)
        #[arg(long)]
        slot: String,
        /// wallet, online, or cod
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
        /// Overrides the address saved on the account
        #[arg(long)]
        address: Option<String>,
        /// Overrides the phone number saved on the account
        #[arg(long)]
        phone: Option<String>,
        /// Spend loyalty points on this order
        #[arg(long)]
        use_points: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Order history, or one order in detail
    Orders { order_id: Option<i64> },
    /// Wallet and loyalty points
    Wallet {
        #[command(subcommand)]
        command: WalletCommands,
    },
    /// Administration (admin accounts only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Show or change the colour theme
    Theme { mode: Option<ThemeMode> },
}

impl Commands {
    fn menu_filter(veg: bool, non_veg: bool) -> MenuFilter {
        match (veg, non_veg) {
            (true, _) => MenuFilter::Veg,
            (false, true) => MenuFilter::NonVeg,
            (false, false) => MenuFilter::All,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = srmiggy_core::load_app_config()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut ctx = ClientContext::init(config)?;
    ctx.welcome_once();

    let result = run(&mut ctx, cli.command).await;
    ctx.shutdown();
    result
}

async fn run(ctx: &mut ClientContext, command: Option<Commands>) -> anyhow::Result<()> {
    match command {
        Some(Commands::Login { username, password }) => {
            auth::run_login(ctx, &username, password).await
        }
        Some(Commands::Logout) => auth::run_logout(ctx),
        Some(Commands::Register {
            username,
            email,
            full_name,
            phone,
            address,
            password,
        }) => {
            let details = auth::Registration {
                username,
                email,
                full_name,
                phone,
                address,
            };
            auth::run_register(ctx, details, password).await
        }
        Some(Commands::Vendors) => catalog::run_vendors(ctx).await,
        Some(Commands::Menu {
            vendor_id,
            veg,
            non_veg,
        }) => catalog::run_menu(ctx, vendor_id, Commands::menu_filter(veg, non_veg)).await,
        Some(Commands::Cart { command }) => cart::run_cart(ctx, command).await,
        Some(Commands::Slots) => catalog::run_slots(ctx).await,
        Some(Commands::Checkout {
            slot,
            payment,
            address,
            phone,
            use_points,
            yes,
        }) => {
            let options = checkout::CheckoutOptions {
                slot_id: SlotId::from(slot),
                payment_method: payment,
                address,
                phone,
                use_points,
                assume_yes: yes,
            };
            checkout::run_checkout(ctx, options).await
        }
        Some(Commands::Orders { order_id }) => orders::run_orders(ctx, order_id).await,
        Some(Commands::Wallet { command }) => wallet::run_wallet(ctx, command).await,
        Some(Commands::Admin { command }) => admin::run_admin(ctx, command).await,
        Some(Commands::Theme { mode }) => theme::run_theme(ctx, mode),
        None => {
            cart::print_cart(ctx);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
