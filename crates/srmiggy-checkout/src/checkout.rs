//! Turns a cart plus the user's selections into a placed, paid order.
//!
//! One [`Checkout`] covers one visit to the checkout view. Entry data is read
//! concurrently by [`Checkout::load`]; [`Checkout::submit`] then runs the
//! strictly sequential create-order and payment chain under a deadline.

use std::time::Duration;

use rust_decimal::Decimal;
use srmiggy_api::{ApiClient, ApiError};
use srmiggy_core::pricing::wallet_shortfall;
use srmiggy_core::{
    AppConfig, Cart, CreateOrderRequest, LoyaltyPreview, PaymentMethod, PaymentVerification,
    PriceBreakdown, PricingConfig, PricingInput, Session, SlotAvailability, SlotId,
};
use srmiggy_store::{CartStore, KeyValueStore};
use uuid::Uuid;

use crate::error::CheckoutError;
use crate::gateway::PaymentGateway;
use crate::state::{
    Blocker, CheckoutFailure, CheckoutState, FailureAction, Fetch, OrderConfirmation,
    GENERIC_FAILURE,
};

/// The user's choices on the checkout view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub slot_id: Option<SlotId>,
    pub delivery_address: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub use_loyalty_points: bool,
}

/// Loyalty data and the subtotal it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltySnapshot {
    pub preview: LoyaltyPreview,
    pub subtotal: Decimal,
}

/// One submission attempt. The key and any created order survive a failed
/// submission so a retry reuses them instead of creating a second order.
#[derive(Debug, Clone)]
struct Attempt {
    key: Uuid,
    request: Option<CreateOrderRequest>,
    order_id: Option<i64>,
}

impl Attempt {
    fn fresh() -> Self {
        Self {
            key: Uuid::new_v4(),
            request: None,
            order_id: None,
        }
    }
}

pub struct Checkout<'a, G: PaymentGateway> {
    api: &'a ApiClient,
    gateway: &'a G,
    pricing: PricingConfig,
    session: Session,
    timeout: Duration,
    state: CheckoutState,
    slots: Fetch<SlotAvailability>,
    wallet_balance: Fetch<Decimal>,
    loyalty: Fetch<LoyaltySnapshot>,
    selection: Selection,
    attempt: Attempt,
}

impl<'a, G: PaymentGateway> Checkout<'a, G> {
    /// Starts an idle checkout with address and phone prefilled from the
    /// signed-in user.
    pub fn new(api: &'a ApiClient, gateway: &'a G, config: &AppConfig, session: &Session) -> Self {
        let selection = Selection {
            slot_id: None,
            delivery_address: session.default_address().unwrap_or_default().to_owned(),
            customer_phone: session.default_phone().unwrap_or_default().to_owned(),
            payment_method: PaymentMethod::CashOnDelivery,
            use_loyalty_points: false,
        };

        Self {
            api,
            gateway,
            pricing: config.pricing.clone(),
            session: session.clone(),
            timeout: Duration::from_secs(config.checkout_timeout_secs),
            state: CheckoutState::Idle,
            slots: Fetch::NotLoaded,
            wallet_balance: Fetch::NotLoaded,
            loyalty: Fetch::NotLoaded,
            selection,
            attempt: Attempt::fresh(),
        }
    }

    /// Overrides the deadline for the whole submission chain.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    #[must_use]
    pub fn slots(&self) -> &Fetch<SlotAvailability> {
        &self.slots
    }

    #[must_use]
    pub fn wallet_balance(&self) -> &Fetch<Decimal> {
        &self.wallet_balance
    }

    #[must_use]
    pub fn loyalty(&self) -> &Fetch<LoyaltySnapshot> {
        &self.loyalty
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Key sent as `Idempotency-Key` with the next order creation.
    #[must_use]
    pub fn idempotency_key(&self) -> Uuid {
        self.attempt.key
    }

    /// Order created by an earlier, unfinished attempt.
    #[must_use]
    pub fn pending_order_id(&self) -> Option<i64> {
        self.attempt.order_id
    }

    /// Fetches slots, wallet balance, and loyalty data concurrently.
    ///
    /// A failed read is logged and recorded as [`Fetch::Unavailable`]; it
    /// never stops the other two.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] unless the checkout is idle or
    /// ready.
    pub async fn load(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        if !matches!(self.state, CheckoutState::Idle | CheckoutState::SlotsReady) {
            return Err(self.invalid("load checkout data"));
        }
        self.state = CheckoutState::SlotsLoading;

        let api = self.api;
        let subtotal = cart.subtotal();
        let (slots, balance, loyalty) = tokio::join!(
            api.active_slots(),
            api.wallet_balance(),
            api.calculate_loyalty_points(subtotal),
        );

        self.slots = settle("delivery slots", slots);
        self.wallet_balance = settle("wallet balance", balance);
        self.loyalty = settle(
            "loyalty points",
            loyalty.map(|preview| LoyaltySnapshot { preview, subtotal }),
        );

        if let Some(slot_id) = &self.selection.slot_id {
            if !self.is_open_slot(slot_id) {
                tracing::info!(%slot_id, "selected slot is no longer offered");
                self.selection.slot_id = None;
            }
        }

        if let Some(slots) = self.slots.ready() {
            tracing::info!(
                open_slots = slots.open_slots().count(),
                ordering_open = slots.is_ordering_open,
                "checkout data loaded"
            );
        }
        self.state = CheckoutState::SlotsReady;
        Ok(())
    }

    /// Re-reads the loyalty preview after the subtotal changed.
    pub async fn refresh_loyalty(&mut self, cart: &Cart) {
        let subtotal = cart.subtotal();
        let result = self.api.calculate_loyalty_points(subtotal).await;
        self.loyalty = settle(
            "loyalty points",
            result.map(|preview| LoyaltySnapshot { preview, subtotal }),
        );
    }

    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownSlot`] unless `slot_id` is one of the
    /// open slots from the last [`Self::load`].
    pub fn select_slot(&mut self, slot_id: impl Into<SlotId>) -> Result<(), CheckoutError> {
        let slot_id = slot_id.into();
        if !self.is_open_slot(&slot_id) {
            return Err(CheckoutError::UnknownSlot(slot_id));
        }
        self.selection.slot_id = Some(slot_id);
        Ok(())
    }

    pub fn set_delivery_address(&mut self, address: impl Into<String>) {
        self.selection.delivery_address = address.into();
    }

    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.selection.customer_phone = phone.into();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.selection.payment_method = method;
    }

    pub fn set_use_loyalty_points(&mut self, enabled: bool) {
        self.selection.use_loyalty_points = enabled;
    }

    /// Price for `cart` under the current selections. Uses the server's
    /// points preview when it was computed for this subtotal.
    #[must_use]
    pub fn quote(&self, cart: &Cart) -> PriceBreakdown {
        let subtotal = cart.subtotal();
        let loyalty = self.loyalty.ready();

        self.pricing.breakdown(&PricingInput {
            subtotal,
            available_points: loyalty.map_or(Decimal::ZERO, |l| l.preview.current_points),
            use_loyalty_points: self.selection.use_loyalty_points,
            server_points_preview: loyalty
                .filter(|l| l.subtotal == subtotal)
                .map(|l| l.preview.points_earned_from_order),
        })
    }

    /// Every reason submission is currently disabled. Empty means the order
    /// can be placed.
    #[must_use]
    pub fn blockers(&self, cart: &Cart) -> Vec<Blocker> {
        let mut blockers = Vec::new();

        if matches!(self.state, CheckoutState::Submitting) {
            blockers.push(Blocker::AlreadySubmitting);
        }
        if cart.is_empty() {
            blockers.push(Blocker::EmptyCart);
        }
        if !self.session.is_authenticated() {
            blockers.push(Blocker::NotAuthenticated);
        }

        match &self.slots {
            Fetch::NotLoaded => blockers.push(Blocker::SlotsNotLoaded),
            Fetch::Unavailable(_) => blockers.push(Blocker::SlotsUnavailable),
            Fetch::Ready(slots) if !slots.is_ordering_open => {
                blockers.push(Blocker::OrderingClosed);
            }
            Fetch::Ready(slots) if slots.open_slots().next().is_none() => {
                blockers.push(Blocker::NoSlotsRemaining);
            }
            Fetch::Ready(_) => {
                if self.selection.slot_id.is_none() {
                    blockers.push(Blocker::SlotNotSelected);
                }
            }
        }

        if self.selection.delivery_address.trim().is_empty() {
            blockers.push(Blocker::MissingAddress);
        }
        if self.selection.customer_phone.trim().is_empty() {
            blockers.push(Blocker::MissingPhone);
        }

        if let Some(shortfall) = self.pricing.minimum_order_shortfall(cart.subtotal()) {
            blockers.push(Blocker::BelowMinimumOrder { shortfall });
        }

        match self.selection.payment_method {
            PaymentMethod::Wallet => match self.wallet_balance.ready() {
                None => blockers.push(Blocker::WalletBalanceUnknown),
                Some(balance) => {
                    if let Some(shortfall) = wallet_shortfall(*balance, self.quote(cart).total) {
                        blockers.push(Blocker::InsufficientWallet { shortfall });
                    }
                }
            },
            PaymentMethod::Online => {
                if !self.gateway.is_available() {
                    blockers.push(Blocker::OnlinePaymentUnavailable);
                }
            }
            PaymentMethod::CashOnDelivery => {}
        }

        blockers
    }

    /// Places the order and settles payment, then clears the cart.
    ///
    /// The chain is create order, then pay-with-wallet, confirm-cod, or
    /// provider order plus gateway plus verify. An order created by an
    /// earlier failed attempt with identical details is reused.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Blocked`] or [`CheckoutError::InvalidState`] before
    ///   anything is sent; the state is unchanged.
    /// - Any failure inside the chain, including [`CheckoutError::TimedOut`];
    ///   the state becomes [`CheckoutState::Failed`] and the cart is kept.
    pub async fn submit<S: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if !matches!(self.state, CheckoutState::SlotsReady) {
            return Err(self.invalid("submit"));
        }
        let blockers = self.blockers(cart.cart());
        if !blockers.is_empty() {
            return Err(CheckoutError::Blocked(blockers));
        }
        let request = self
            .order_request(cart.cart())
            .ok_or_else(|| CheckoutError::Blocked(vec![Blocker::SlotNotSelected]))?;
        let total = self.quote(cart.cart()).total;

        if self.attempt.request.as_ref().is_some_and(|prev| *prev != request) {
            tracing::info!(
                previous_order_id = ?self.attempt.order_id,
                "checkout details changed since the last attempt; starting a new order"
            );
            self.attempt = Attempt::fresh();
        }
        self.attempt.request = Some(request.clone());

        self.state = CheckoutState::Submitting;
        tracing::info!(
            idempotency_key = %self.attempt.key,
            payment_method = %request.payment_method,
            %total,
            "submitting order"
        );

        let timeout = self.timeout;
        let outcome = match tokio::time::timeout(timeout, self.run_chain(&request)).await {
            Ok(result) => result,
            Err(_) => Err(CheckoutError::TimedOut(timeout)),
        };

        match outcome {
            Ok(order_id) => {
                let cart_cleared = match cart.clear() {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!(order_id, error = %e, "order placed but cart could not be cleared");
                        false
                    }
                };
                let confirmation = OrderConfirmation {
                    order_id,
                    payment_method: request.payment_method,
                    total,
                    cart_cleared,
                };
                tracing::info!(order_id, "order placed");
                self.attempt = Attempt::fresh();
                self.state = CheckoutState::Succeeded(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    order_id = ?self.attempt.order_id,
                    "checkout failed"
                );
                self.state = CheckoutState::Failed(CheckoutFailure {
                    message: failure_message(&e),
                    order_id: self.attempt.order_id,
                    actions: FailureAction::ALL.to_vec(),
                });
                Err(e)
            }
        }
    }

    /// Leaves the failure view and re-enables submission, keeping the
    /// attempt's idempotency key and any order already created.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] unless the last submission
    /// failed.
    pub fn retry(&mut self) -> Result<(), CheckoutError> {
        if !matches!(self.state, CheckoutState::Failed(_)) {
            return Err(self.invalid("retry"));
        }
        tracing::info!(
            idempotency_key = %self.attempt.key,
            order_id = ?self.attempt.order_id,
            "retrying checkout"
        );
        self.state = CheckoutState::SlotsReady;
        Ok(())
    }

    async fn run_chain(&mut self, request: &CreateOrderRequest) -> Result<i64, CheckoutError> {
        let order_id = match self.attempt.order_id {
            Some(order_id) => {
                tracing::info!(order_id, "reusing order from the previous attempt");
                order_id
            }
            None => {
                let order = self.api.create_order(request, self.attempt.key).await?;
                self.attempt.order_id = Some(order.id);
                order.id
            }
        };

        match request.payment_method {
            PaymentMethod::Wallet => {
                self.api.pay_with_wallet(order_id).await?;
            }
            PaymentMethod::CashOnDelivery => {
                self.api.confirm_cod(order_id).await?;
            }
            PaymentMethod::Online => {
                let payment = self.api.create_payment_order(order_id).await?;
                let receipt = self.gateway.authorize(&payment).await?;
                self.api
                    .verify_payment(&PaymentVerification {
                        provider_order_id: payment.provider_order_id,
                        provider_payment_id: receipt.provider_payment_id,
                        provider_signature: receipt.provider_signature,
                    })
                    .await?;
            }
        }

        Ok(order_id)
    }

    fn order_request(&self, cart: &Cart) -> Option<CreateOrderRequest> {
        Some(CreateOrderRequest {
            vendor_id: cart.vendor_id?,
            slot_id: self.selection.slot_id.clone()?,
            delivery_address: self.selection.delivery_address.trim().to_owned(),
            customer_phone: self.selection.customer_phone.trim().to_owned(),
            items: cart.order_items(),
            use_loyalty_points: self.selection.use_loyalty_points,
            payment_method: self.selection.payment_method,
        })
    }

    fn is_open_slot(&self, slot_id: &SlotId) -> bool {
        self.slots
            .ready()
            .is_some_and(|s| s.is_ordering_open && s.open_slots().any(|slot| &slot.id == slot_id))
    }

    fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidState {
            action,
            state: self.state.name(),
        }
    }
}

fn settle<T>(what: &'static str, result: Result<T, ApiError>) -> Fetch<T> {
    match result {
        Ok(value) => Fetch::Ready(value),
        Err(e) => {
            tracing::warn!(what, error = %e, "checkout data unavailable");
            Fetch::Unavailable(e.user_message())
        }
    }
}

/// Server text when there is any, otherwise a fixed fallback.
fn failure_message(error: &CheckoutError) -> String {
    match error {
        CheckoutError::Api(e) => e
            .server_message()
            .map_or_else(|| GENERIC_FAILURE.to_owned(), str::to_owned),
        CheckoutError::Gateway(e) => format!("{GENERIC_FAILURE}: {e}"),
        CheckoutError::TimedOut(_) => {
            format!("{GENERIC_FAILURE}: the server took too long to respond")
        }
        _ => GENERIC_FAILURE.to_owned(),
    }
}
