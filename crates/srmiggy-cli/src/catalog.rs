//! Vendor list, menus, and delivery slots.

use srmiggy_core::{format_inr, MenuFilter};

use crate::context::ClientContext;
use crate::display::truncate;

pub(crate) async fn run_vendors(ctx: &mut ClientContext) -> anyhow::Result<()> {
    let vendors = match ctx.api.list_vendors().await {
        Ok(vendors) => vendors,
        Err(e) => return Err(ctx.api_failure("could not load vendors", e)),
    };

    if vendors.is_empty() {
        println!("no vendors are open right now");
        return Ok(());
    }

    println!("{:<6}{:<28}{:<8}DESCRIPTION", "ID", "NAME", "RATING");
    for vendor in vendors.iter().filter(|v| v.active) {
        let rating = vendor
            .rating
            .map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:<6}{:<28}{:<8}{}",
            vendor.id,
            truncate(&vendor.name, 26),
            rating,
            truncate(vendor.description.as_deref().unwrap_or_default(), 50)
        );
    }
    Ok(())
}

/// Prints a vendor's menu, filtered by diet.
///
/// # Errors
///
/// Returns an error if the vendor or its menu cannot be loaded.
pub(crate) async fn run_menu(
    ctx: &mut ClientContext,
    vendor_id: i64,
    filter: MenuFilter,
) -> anyhow::Result<()> {
    let (vendor, menu) = tokio::join!(ctx.api.get_vendor(vendor_id), ctx.api.vendor_menu(vendor_id));
    let vendor = match vendor {
        Ok(vendor) => vendor,
        Err(e) => return Err(ctx.api_failure("could not load vendor", e)),
    };
    let menu = match menu {
        Ok(menu) => menu,
        Err(e) => return Err(ctx.api_failure("could not load menu", e)),
    };

    println!("{} (vendor {})", vendor.name, vendor.id);
    let items: Vec<_> = filter.apply(&menu).collect();
    if items.is_empty() {
        println!("nothing on the menu matches that filter");
        return Ok(());
    }

    println!("{:<6}{:<30}{:<10}{:<9}IN CART", "ID", "ITEM", "PRICE", "DIET");
    for item in items {
        let in_cart = if ctx.cart.vendor_id() == Some(vendor.id) {
            ctx.cart.cart().line(item.id).map_or(0, |line| line.quantity)
        } else {
            0
        };
        let name = if item.available {
            truncate(&item.name, 28)
        } else {
            format!("{} (sold out)", truncate(&item.name, 16))
        };
        println!(
            "{:<6}{:<30}{:<10}{:<9}{}",
            item.id,
            name,
            format_inr(item.price),
            if item.is_veg { "veg" } else { "non-veg" },
            in_cart
        );
    }
    Ok(())
}

pub(crate) async fn run_slots(ctx: &mut ClientContext) -> anyhow::Result<()> {
    let availability = match ctx.api.active_slots().await {
        Ok(availability) => availability,
        Err(e) => return Err(ctx.api_failure("could not load delivery slots", e)),
    };

    if !availability.is_ordering_open {
        println!("ordering is closed for today; please come back during ordering hours");
        return Ok(());
    }

    let open: Vec<_> = availability.open_slots().collect();
    if open.is_empty() {
        println!("no delivery slots are left for today");
        return Ok(());
    }
    println!("{:<38}SLOT", "ID");
    for slot in open {
        println!("{:<38}{}", slot.id, slot.label());
    }
    Ok(())
}
