use std::fmt;

use rust_decimal::Decimal;
use srmiggy_core::{format_inr, PaymentMethod};

/// Where a single checkout attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    SlotsLoading,
    SlotsReady,
    Submitting,
    Succeeded(OrderConfirmation),
    Failed(CheckoutFailure),
}

impl CheckoutState {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::SlotsLoading => "loading slots",
            CheckoutState::SlotsReady => "ready",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded(_) => "succeeded",
            CheckoutState::Failed(_) => "failed",
        }
    }
}

/// What the confirmation view needs after a paid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_id: i64,
    pub payment_method: PaymentMethod,
    /// Client-side total shown at submission; the server's figure is on the order.
    pub total: Decimal,
    /// `false` when the order went through but the local cart could not be
    /// cleared.
    pub cart_cleared: bool,
}

/// Recovery choices offered on the failure view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    RetryCheckout,
    ReturnToCart,
    ReturnHome,
}

impl FailureAction {
    pub const ALL: [FailureAction; 3] = [
        FailureAction::RetryCheckout,
        FailureAction::ReturnToCart,
        FailureAction::ReturnHome,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FailureAction::RetryCheckout => "Retry checkout",
            FailureAction::ReturnToCart => "Back to cart",
            FailureAction::ReturnHome => "Home",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFailure {
    pub message: String,
    /// Order the server already holds for this attempt, if creation got that far.
    pub order_id: Option<i64>,
    pub actions: Vec<FailureAction>,
}

pub const GENERIC_FAILURE: &str = "Failed to place order";

/// Result of one of the entry reads (slots, wallet, loyalty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    NotLoaded,
    Ready(T),
    /// The read failed; carries the user-facing reason.
    Unavailable(String),
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Fetch::NotLoaded
    }
}

impl<T> Fetch<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetch::Ready(value) => Some(value),
            Fetch::NotLoaded | Fetch::Unavailable(_) => None,
        }
    }
}

/// A reason submission is disabled, with the remediation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocker {
    EmptyCart,
    NotAuthenticated,
    SlotsNotLoaded,
    /// The slot read failed; retrying may help.
    SlotsUnavailable,
    /// The server says ordering is closed for the day.
    OrderingClosed,
    NoSlotsRemaining,
    SlotNotSelected,
    MissingAddress,
    MissingPhone,
    BelowMinimumOrder { shortfall: Decimal },
    WalletBalanceUnknown,
    InsufficientWallet { shortfall: Decimal },
    OnlinePaymentUnavailable,
    AlreadySubmitting,
}

impl Blocker {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Blocker::EmptyCart => "Your cart is empty.".to_owned(),
            Blocker::NotAuthenticated => "Please log in to place an order.".to_owned(),
            Blocker::SlotsNotLoaded => "Delivery slots are still loading.".to_owned(),
            Blocker::SlotsUnavailable => {
                "Could not load delivery slots. Please try again.".to_owned()
            }
            Blocker::OrderingClosed => {
                "Ordering is closed for today. Please come back during ordering hours.".to_owned()
            }
            Blocker::NoSlotsRemaining => "No delivery slots are left for today.".to_owned(),
            Blocker::SlotNotSelected => "Please select a delivery slot.".to_owned(),
            Blocker::MissingAddress => "Please enter a delivery address.".to_owned(),
            Blocker::MissingPhone => "Please enter a phone number.".to_owned(),
            Blocker::BelowMinimumOrder { shortfall } => format!(
                "Minimum order not reached. Add {} more to place this order.",
                format_inr(*shortfall)
            ),
            Blocker::WalletBalanceUnknown => {
                "Could not check your wallet balance. Choose another payment method or try again."
                    .to_owned()
            }
            Blocker::InsufficientWallet { shortfall } => format!(
                "Insufficient wallet balance. Please add {} more.",
                format_inr(*shortfall)
            ),
            Blocker::OnlinePaymentUnavailable => {
                "Online payment is not available. Choose wallet or cash on delivery.".to_owned()
            }
            Blocker::AlreadySubmitting => "Your order is being placed.".to_owned(),
        }
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_shortfall_message_names_the_amount() {
        let blocker = Blocker::InsufficientWallet {
            shortfall: Decimal::from(42),
        };
        assert!(blocker.message().ends_with("add ₹42 more."));
    }

    #[test]
    fn closed_and_failed_slot_messages_differ() {
        assert_ne!(
            Blocker::OrderingClosed.message(),
            Blocker::SlotsUnavailable.message()
        );
    }

    #[test]
    fn fetch_ready_only_for_loaded_values() {
        assert_eq!(Fetch::Ready(3).ready(), Some(&3));
        assert_eq!(Fetch::<i32>::Unavailable("down".to_owned()).ready(), None);
        assert_eq!(Fetch::<i32>::default(), Fetch::NotLoaded);
    }
}
