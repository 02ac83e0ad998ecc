//! Checkout orchestration for the SRMiggy client.
//!
//! [`Checkout`] is a state machine over one checkout attempt:
//! `Idle → SlotsLoading → SlotsReady → Submitting → {Succeeded, Failed}`,
//! with an explicit [`Checkout::retry`] from `Failed` back to `SlotsReady`.

pub mod checkout;
pub mod error;
pub mod gateway;
pub mod state;

pub use checkout::{Checkout, LoyaltySnapshot, Selection};
pub use error::{CheckoutError, GatewayError};
pub use gateway::{ConfiguredGateway, DisabledGateway, MockGateway, PaymentGateway, ProviderReceipt};
pub use state::{
    Blocker, CheckoutFailure, CheckoutState, FailureAction, Fetch, OrderConfirmation,
    GENERIC_FAILURE,
};
