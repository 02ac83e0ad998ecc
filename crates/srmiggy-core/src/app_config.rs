use std::path::PathBuf;

use crate::pricing::PricingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub log_level: String,
    /// Directory holding the persisted cart, preferences, and auth token.
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    /// Upper bound on the whole create-order → confirm-payment chain.
    pub checkout_timeout_secs: u64,
    pub user_agent: String,
    pub pricing: PricingConfig,
    /// Enables the development payment stand-in that fabricates provider ids.
    pub mock_payments: bool,
}
