use std::time::Duration;

use srmiggy_api::ApiError;
use srmiggy_core::SlotId;
use srmiggy_store::StoreError;
use thiserror::Error;

use crate::state::Blocker;

/// Failures from a [`crate::gateway::PaymentGateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No payment provider is configured for this build.
    #[error("online payment is unavailable: {0}")]
    Unavailable(String),

    #[error("payment declined: {0}")]
    Declined(String),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Validation failed before anything was sent.
    #[error("checkout blocked: {}", describe(.0))]
    Blocked(Vec<Blocker>),

    #[error("cannot {action} while checkout is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("slot {0} is not one of the open delivery slots")]
    UnknownSlot(SlotId),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("checkout did not finish within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn describe(blockers: &[Blocker]) -> String {
    blockers
        .iter()
        .map(Blocker::message)
        .collect::<Vec<_>>()
        .join(" ")
}
