//! Domain model, configuration, and pricing for the SRMiggy client.
//!
//! Everything in this crate is synchronous and free of I/O apart from
//! reading environment variables in [`load_app_config`].

pub mod app_config;
pub mod cart;
pub mod config;
pub mod pricing;
pub mod session;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use config::{load_app_config, load_app_config_from_env};
pub use pricing::{format_inr, PriceBreakdown, PricingConfig, PricingInput};
pub use session::{Session, UserIdentity, UserRole};
pub use types::{
    AdminStats, AuthResponse, CreateOrderRequest, DeliverySlot, LoginRequest, LoyaltyPreview,
    MenuFilter, MenuItem, Order, OrderItem, OrderItemRequest, OrderStatus, PaymentMethod,
    PaymentOrder, PaymentTransaction, PaymentVerification, RegisterRequest, SlotAvailability,
    SlotId, UserAccount, Vendor, WalletTopUp, WalletTransaction, WalletTransactionKind,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
