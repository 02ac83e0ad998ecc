use srmiggy_core::Order;

use crate::context::ClientContext;
use crate::display::{fmt_datetime, fmt_money, truncate};

/// Lists the signed-in user's orders, or prints one in full.
///
/// # Errors
///
/// Returns an error if the user is not signed in or the orders cannot be
/// loaded.
pub(crate) async fn run_orders(ctx: &mut ClientContext, order_id: Option<i64>) -> anyhow::Result<()> {
    ctx.require_login()?;

    if let Some(order_id) = order_id {
        let order = match ctx.api.get_order(order_id).await {
            Ok(order) => order,
            Err(e) => return Err(ctx.api_failure("could not load order", e)),
        };
        print_order_detail(&order);
        return Ok(());
    }

    let mut orders = match ctx.api.my_orders().await {
        Ok(orders) => orders,
        Err(e) => return Err(ctx.api_failure("could not load orders", e)),
    };
    if orders.is_empty() {
        println!("no orders yet");
        return Ok(());
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    print_order_table(&orders);
    Ok(())
}

pub(crate) fn print_order_table(orders: &[Order]) {
    println!(
        "{:<8}{:<18}{:<18}{:<10}PAYMENT",
        "ORDER", "PLACED", "STATUS", "TOTAL"
    );
    for order in orders {
        println!(
            "{:<8}{:<18}{:<18}{:<10}{}",
            order.id,
            fmt_datetime(order.created_at),
            order
                .status
                .map_or_else(|| "\u{2014}".to_string(), |s| s.to_string()),
            fmt_money(order.total),
            order
                .payment_method
                .map_or_else(|| "\u{2014}".to_string(), |m| m.to_string())
        );
    }
}

fn print_order_detail(order: &Order) {
    println!("order #{}", order.id);
    if let Some(status) = order.status {
        println!("status:        {status}");
    }
    println!("placed:        {}", fmt_datetime(order.created_at));
    if let Some(address) = &order.delivery_address {
        println!("deliver to:    {address}");
    }
    for item in &order.items {
        println!(
            "  {:>3} x {:<28}{}",
            item.quantity,
            truncate(item.name.as_deref().unwrap_or("item"), 26),
            fmt_money(item.subtotal.or(item.price))
        );
    }
    println!("subtotal:      {}", fmt_money(order.subtotal));
    println!("delivery fee:  {}", fmt_money(order.delivery_fee));
    println!("platform fee:  {}", fmt_money(order.platform_fee));
    if let Some(points) = order.points_used.filter(|p| !p.is_zero()) {
        println!("points used:   {}", points.normalize());
    }
    println!("total:         {}", fmt_money(order.total));
    if let Some(points) = order.points_earned {
        println!("points earned: {}", points.normalize());
    }
}
