//! Cart command handlers.
//!
//! The cart lives on disk between runs, so every change here is already
//! persisted when the handler returns.

use clap::Subcommand;
use srmiggy_core::{format_inr, MenuItem, PriceBreakdown, PricingInput, Vendor};
use srmiggy_store::{CartStore, KeyValueStore, StoreError, VendorSwitch};

use crate::context::ClientContext;
use crate::display::{confirm, truncate};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart with a price estimate
    Show,
    /// Add an item from a vendor's menu
    Add {
        /// Vendor the item belongs to
        #[arg(long)]
        vendor: i64,
        /// Menu item id (see `srmiggy menu <vendor>`)
        item: i64,
        /// How many to add
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Discard a cart from another vendor without asking
        #[arg(long)]
        yes: bool,
    },
    /// Remove an item entirely
    Remove { item: i64 },
    /// Set an item's quantity; zero or less removes it
    Set {
        item: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

pub(crate) async fn run_cart(ctx: &mut ClientContext, command: CartCommands) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {
            print_cart(ctx);
            Ok(())
        }
        CartCommands::Add {
            vendor,
            item,
            quantity,
            yes,
        } => run_cart_add(ctx, vendor, item, quantity, yes).await,
        CartCommands::Remove { item } => {
            if ctx.cart.cart().line(item).is_none() {
                println!("item {item} is not in your cart");
                return Ok(());
            }
            ctx.cart.remove(item)?;
            print_cart(ctx);
            Ok(())
        }
        CartCommands::Set { item, quantity } => {
            if ctx.cart.cart().line(item).is_none() {
                println!("item {item} is not in your cart; use `srmiggy cart add` first");
                return Ok(());
            }
            ctx.cart.set_quantity(item, quantity)?;
            print_cart(ctx);
            Ok(())
        }
        CartCommands::Clear => {
            ctx.cart.clear()?;
            println!("cart cleared");
            Ok(())
        }
    }
}

/// Adds `quantity` of a menu item, asking before a vendor switch discards
/// the current cart.
///
/// # Errors
///
/// Returns an error if the vendor or menu cannot be loaded, the item is not
/// on the menu or sold out, or the cart cannot be saved.
async fn run_cart_add(
    ctx: &mut ClientContext,
    vendor_id: i64,
    item_id: i64,
    quantity: u32,
    assume_yes: bool,
) -> anyhow::Result<()> {
    if quantity == 0 {
        anyhow::bail!("quantity must be at least 1");
    }

    let (vendor, menu) = tokio::join!(ctx.api.get_vendor(vendor_id), ctx.api.vendor_menu(vendor_id));
    let vendor = match vendor {
        Ok(vendor) => vendor,
        Err(e) => return Err(ctx.api_failure("could not load vendor", e)),
    };
    let menu = match menu {
        Ok(menu) => menu,
        Err(e) => return Err(ctx.api_failure("could not load menu", e)),
    };

    let item = menu
        .into_iter()
        .find(|i| i.id == item_id)
        .ok_or_else(|| anyhow::anyhow!("item {item_id} is not on {}'s menu", vendor.name))?;
    if !item.available {
        anyhow::bail!("{} is sold out", item.name);
    }

    let confirm_switch = |switch: &VendorSwitch<'_>| {
        assume_yes
            || confirm(&format!(
                "Your cart has {} item(s) from another vendor. Discard them and start a cart from {}?",
                switch.discarded_items, switch.new_vendor.name
            ))
    };

    if !add_units(&mut ctx.cart, &item, &vendor, quantity, confirm_switch)? {
        println!("kept your current cart");
        return Ok(());
    }

    println!("added {quantity} x {}", item.name);
    print_cart(ctx);
    Ok(())
}

/// Adds `quantity` units with at most two writes: the first unit goes
/// through [`CartStore::add`] so vendor switches are confirmed, the rest
/// land in one [`CartStore::set_quantity`].
fn add_units<S, F>(
    cart: &mut CartStore<S>,
    item: &MenuItem,
    vendor: &Vendor,
    quantity: u32,
    confirm_switch: F,
) -> Result<bool, StoreError>
where
    S: KeyValueStore,
    F: FnOnce(&VendorSwitch<'_>) -> bool,
{
    if !cart.add(item, vendor, confirm_switch)? {
        return Ok(false);
    }
    if quantity > 1 {
        let current = cart.cart().line(item.id).map_or(1, |l| l.quantity);
        cart.set_quantity(item.id, i64::from(current) + i64::from(quantity - 1))?;
    }
    Ok(true)
}

/// Local estimate; the checkout quote also folds in loyalty data.
pub(crate) fn estimate(ctx: &ClientContext) -> PriceBreakdown {
    ctx.config.pricing.breakdown(&PricingInput {
        subtotal: ctx.cart.total(),
        available_points: rust_decimal::Decimal::ZERO,
        use_loyalty_points: false,
        server_points_preview: None,
    })
}

pub(crate) fn print_cart(ctx: &ClientContext) {
    if ctx.cart.is_empty() {
        println!("your cart is empty");
        return;
    }

    if let Some(vendor_id) = ctx.cart.vendor_id() {
        println!("cart from vendor {vendor_id}");
    }
    println!("{:<6}{:<30}{:<6}{:<10}TOTAL", "ID", "ITEM", "QTY", "PRICE");
    for line in ctx.cart.lines() {
        println!(
            "{:<6}{:<30}{:<6}{:<10}{}",
            line.item_id,
            truncate(&line.name, 28),
            line.quantity,
            format_inr(line.unit_price),
            format_inr(line.line_total())
        );
    }

    let quote = estimate(ctx);
    println!();
    println!("items:         {}", ctx.cart.item_count());
    println!("subtotal:      {}", format_inr(quote.subtotal));
    println!("delivery fee:  {}", format_inr(quote.delivery_fee));
    println!("platform fee:  {}", format_inr(quote.platform_fee));
    println!("total:         {}", format_inr(quote.total));
    println!(
        "points earned: ~{} (estimate)",
        quote.points_earned_preview.round_dp(2).normalize()
    );
    if let Some(shortfall) = ctx.config.pricing.minimum_order_shortfall(quote.subtotal) {
        println!(
            "add {} more to reach the minimum order",
            format_inr(shortfall)
        );
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use srmiggy_store::MemoryStore;

    use super::*;

    fn vendor(id: i64) -> Vendor {
        Vendor {
            id,
            name: format!("Vendor {id}"),
            description: None,
            image_url: None,
            active: true,
            rating: None,
        }
    }

    fn dosa() -> MenuItem {
        MenuItem {
            id: 11,
            name: "Masala Dosa".to_owned(),
            description: None,
            price: Decimal::from(60),
            image_url: None,
            available: true,
            category: None,
            is_veg: true,
        }
    }

    #[test]
    fn add_units_tops_up_an_existing_line() {
        let mut cart = CartStore::restore(MemoryStore::new());
        assert!(add_units(&mut cart, &dosa(), &vendor(2), 2, |_| true).unwrap());
        assert!(add_units(&mut cart, &dosa(), &vendor(2), 3, |_| true).unwrap());

        assert_eq!(cart.cart().line(11).map(|l| l.quantity), Some(5));
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn add_units_starts_fresh_after_a_vendor_switch() {
        let mut cart = CartStore::restore(MemoryStore::new());
        add_units(&mut cart, &dosa(), &vendor(2), 4, |_| true).unwrap();
        assert!(add_units(&mut cart, &dosa(), &vendor(3), 2, |_| true).unwrap());

        assert_eq!(cart.vendor_id(), Some(3));
        assert_eq!(cart.cart().line(11).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn declined_switch_leaves_the_cart_alone() {
        let mut cart = CartStore::restore(MemoryStore::new());
        add_units(&mut cart, &dosa(), &vendor(2), 1, |_| true).unwrap();
        assert!(!add_units(&mut cart, &dosa(), &vendor(3), 5, |_| false).unwrap());

        assert_eq!(cart.vendor_id(), Some(2));
        assert_eq!(cart.item_count(), 1);
    }
}
