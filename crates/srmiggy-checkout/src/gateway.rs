//! Seam for the external payment provider.
//!
//! The backend expects the client to come back from the provider with a
//! payment id and signature for `POST /payments/verify`. No real provider is
//! integrated; [`MockGateway`] fabricates placeholder identifiers and must
//! only be selected in development.

use async_trait::async_trait;
use rand::Rng;
use srmiggy_core::PaymentOrder;

use crate::error::GatewayError;

/// Proof of payment returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReceipt {
    pub provider_payment_id: String,
    pub provider_signature: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Whether online payment can be offered at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Collects payment for a provider-side order.
    async fn authorize(&self, order: &PaymentOrder) -> Result<ProviderReceipt, GatewayError>;
}

/// Development stand-in that approves every payment with placeholder ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGateway;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn placeholder_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("{prefix}{suffix}")
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn authorize(&self, order: &PaymentOrder) -> Result<ProviderReceipt, GatewayError> {
        let receipt = ProviderReceipt {
            provider_payment_id: placeholder_id("MOCK_PAY_"),
            provider_signature: placeholder_id("MOCK_SIG_"),
        };
        tracing::warn!(
            provider_order_id = %order.provider_order_id,
            provider_payment_id = %receipt.provider_payment_id,
            "mock gateway approved payment without charging anyone"
        );
        Ok(receipt)
    }
}

/// Used when no provider is configured: online payment is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    fn is_available(&self) -> bool {
        false
    }

    async fn authorize(&self, _order: &PaymentOrder) -> Result<ProviderReceipt, GatewayError> {
        Err(GatewayError::Unavailable(
            "no payment provider is configured".to_owned(),
        ))
    }
}

/// Either gateway, picked at startup from configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredGateway {
    Mock(MockGateway),
    Disabled(DisabledGateway),
}

impl ConfiguredGateway {
    #[must_use]
    pub fn from_flag(mock_payments: bool) -> Self {
        if mock_payments {
            tracing::warn!("online payments use the mock gateway; no money moves");
            ConfiguredGateway::Mock(MockGateway)
        } else {
            ConfiguredGateway::Disabled(DisabledGateway)
        }
    }
}

#[async_trait]
impl PaymentGateway for ConfiguredGateway {
    fn is_available(&self) -> bool {
        match self {
            ConfiguredGateway::Mock(g) => g.is_available(),
            ConfiguredGateway::Disabled(g) => g.is_available(),
        }
    }

    async fn authorize(&self, order: &PaymentOrder) -> Result<ProviderReceipt, GatewayError> {
        match self {
            ConfiguredGateway::Mock(g) => g.authorize(order).await,
            ConfiguredGateway::Disabled(g) => g.authorize(order).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment_order() -> PaymentOrder {
        PaymentOrder {
            provider_order_id: "order_1".to_owned(),
            amount: None,
            provider: Some("MOCK".to_owned()),
            order_id: Some(1),
        }
    }

    #[tokio::test]
    async fn mock_gateway_issues_placeholder_ids() {
        let receipt = MockGateway.authorize(&payment_order()).await.unwrap();
        assert!(receipt.provider_payment_id.starts_with("MOCK_PAY_"));
        assert!(receipt.provider_signature.starts_with("MOCK_SIG_"));
        assert_eq!(receipt.provider_payment_id.len(), "MOCK_PAY_".len() + 9);

        let other = MockGateway.authorize(&payment_order()).await.unwrap();
        assert_ne!(receipt.provider_payment_id, other.provider_payment_id);
    }

    #[tokio::test]
    async fn disabled_gateway_refuses() {
        let gateway = ConfiguredGateway::from_flag(false);
        assert!(!gateway.is_available());
        assert!(matches!(
            gateway.authorize(&payment_order()).await,
            Err(GatewayError::Unavailable(_))
        ));
        assert!(ConfiguredGateway::from_flag(true).is_available());
    }
}
