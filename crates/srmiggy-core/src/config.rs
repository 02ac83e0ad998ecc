use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::pricing::PricingConfig;
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can feed a `HashMap` instead of touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got '{raw}'"))
            }),
        }
    };

    let parse_amount = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        let amount = raw
            .trim()
            .parse::<Decimal>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if amount.is_sign_negative() {
            return Err(invalid(var, format!("amount must not be negative, got {raw}")));
        }
        Ok(amount)
    };

    let env = parse_environment(&or_default("SRMIGGY_ENV", "development"))?;

    let api_base_url = or_default("SRMIGGY_API_BASE_URL", "http://localhost:8080/api");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "SRMIGGY_API_BASE_URL",
            format!("expected an http(s) URL, got '{api_base_url}'"),
        ));
    }

    let log_level = or_default("SRMIGGY_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("SRMIGGY_DATA_DIR", "./.srmiggy"));
    let request_timeout_secs = parse_u64("SRMIGGY_REQUEST_TIMEOUT_SECS", "30")?;
    let checkout_timeout_secs = parse_u64("SRMIGGY_CHECKOUT_TIMEOUT_SECS", "60")?;
    if checkout_timeout_secs == 0 {
        return Err(invalid(
            "SRMIGGY_CHECKOUT_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("SRMIGGY_USER_AGENT", "srmiggy-client/0.1");

    let pricing = PricingConfig {
        delivery_fee_enabled: parse_bool("SRMIGGY_DELIVERY_FEE_ENABLED", true)?,
        delivery_fee: parse_amount("SRMIGGY_DELIVERY_FEE", "10")?,
        min_order_threshold: parse_amount("SRMIGGY_MIN_ORDER_THRESHOLD", "100")?,
        platform_fee: parse_amount("SRMIGGY_PLATFORM_FEE", "2")?,
        enforce_minimum_order: parse_bool("SRMIGGY_ENFORCE_MIN_ORDER", false)?,
    };

    let mock_payments = parse_bool(
        "SRMIGGY_MOCK_PAYMENTS",
        matches!(env, Environment::Development | Environment::Test),
    )?;

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        data_dir,
        request_timeout_secs,
        checkout_timeout_secs,
        user_agent,
        pricing,
        mock_payments,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SRMIGGY_ENV".to_string(),
            reason: format!("expected development, test, or production, got '{other}'"),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
