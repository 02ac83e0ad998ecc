//! The `checkout` command: one pass through the checkout view.

use srmiggy_checkout::{Checkout, CheckoutError, CheckoutState, Fetch};
use srmiggy_core::{format_inr, PaymentMethod, SlotId};

use crate::context::ClientContext;
use crate::display::confirm;

#[derive(Debug)]
pub(crate) struct CheckoutOptions {
    pub(crate) slot_id: SlotId,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) address: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) use_points: bool,
    pub(crate) assume_yes: bool,
}

/// Loads slots, wallet, and loyalty data, shows the quote, and places the
/// order once the user confirms.
///
/// # Errors
///
/// Returns an error listing every blocker when the order cannot be placed,
/// or the failure message when submission fails. The cart is kept in both
/// cases.
pub(crate) async fn run_checkout(
    ctx: &mut ClientContext,
    options: CheckoutOptions,
) -> anyhow::Result<()> {
    ctx.require_login()?;
    if ctx.cart.is_empty() {
        anyhow::bail!("your cart is empty");
    }

    let mut checkout = Checkout::new(&ctx.api, &ctx.gateway, &ctx.config, &ctx.session);
    checkout.load(ctx.cart.cart()).await?;

    if let Fetch::Unavailable(reason) = checkout.wallet_balance() {
        println!("wallet balance unavailable: {reason}");
    }
    if let Fetch::Unavailable(reason) = checkout.loyalty() {
        println!("loyalty points unavailable: {reason}");
    }

    if let Some(address) = options.address {
        checkout.set_delivery_address(address);
    }
    if let Some(phone) = options.phone {
        checkout.set_customer_phone(phone);
    }
    checkout.set_payment_method(options.payment_method);
    checkout.set_use_loyalty_points(options.use_points);
    if let Err(e) = checkout.select_slot(options.slot_id.clone()) {
        tracing::debug!(error = %e, "slot selection rejected");
        println!(
            "slot {} is not open for ordering; run `srmiggy slots` to see today's slots",
            options.slot_id
        );
    }

    let blockers = checkout.blockers(ctx.cart.cart());
    if !blockers.is_empty() {
        let reasons: Vec<String> = blockers.iter().map(|b| format!("  - {b}")).collect();
        anyhow::bail!("cannot place this order yet:\n{}", reasons.join("\n"));
    }

    let quote = checkout.quote(ctx.cart.cart());
    let selection = checkout.selection();
    println!("subtotal:      {}", format_inr(quote.subtotal));
    println!("delivery fee:  {}", format_inr(quote.delivery_fee));
    println!("platform fee:  {}", format_inr(quote.platform_fee));
    if !quote.loyalty_discount.is_zero() {
        println!("points used:  -{}", format_inr(quote.loyalty_discount));
    }
    println!("total:         {}", format_inr(quote.total));
    println!(
        "points earned: {}{}",
        quote.points_earned_preview.round_dp(2).normalize(),
        if quote.points_preview_is_estimate { " (estimate)" } else { "" }
    );
    println!("deliver to:    {}", selection.delivery_address);
    println!("phone:         {}", selection.customer_phone);
    println!("payment:       {}", selection.payment_method);

    if !options.assume_yes && !confirm("Place this order?") {
        println!("order not placed; your cart is unchanged");
        return Ok(());
    }

    match checkout.submit(&mut ctx.cart).await {
        Ok(confirmation) => {
            println!(
                "order #{} placed ({} via {})",
                confirmation.order_id,
                format_inr(confirmation.total),
                confirmation.payment_method
            );
            if !confirmation.cart_cleared {
                println!("note: your cart could not be cleared; run `srmiggy cart clear`");
            }
            Ok(())
        }
        Err(CheckoutError::Blocked(blockers)) => {
            let reasons: Vec<String> = blockers.iter().map(|b| format!("  - {b}")).collect();
            anyhow::bail!("cannot place this order yet:\n{}", reasons.join("\n"))
        }
        Err(e) => {
            if let CheckoutState::Failed(failure) = checkout.state() {
                let actions: Vec<&str> = failure.actions.iter().map(|a| a.label()).collect();
                let pending = failure
                    .order_id
                    .map(|id| format!(" (order #{id} was created; see `srmiggy orders {id}`)"))
                    .unwrap_or_default();
                tracing::debug!(error = %e, "checkout failed");
                anyhow::bail!(
                    "{}{pending}\nyour cart is unchanged. Options: {}",
                    failure.message,
                    actions.join(", ")
                )
            }
            Err(e.into())
        }
    }
}
