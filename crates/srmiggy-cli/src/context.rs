//! The one client context shared by every command handler.
//!
//! Created once in `main`, passed by reference, and consumed by
//! [`ClientContext::shutdown`] on the way out.

use srmiggy_api::{ApiClient, ApiError};
use srmiggy_checkout::ConfiguredGateway;
use srmiggy_core::{AppConfig, AuthResponse, Session, UserIdentity};
use srmiggy_store::{CartStore, FileStore, Preferences};

pub(crate) struct ClientContext {
    pub(crate) config: AppConfig,
    pub(crate) api: ApiClient,
    pub(crate) cart: CartStore<FileStore>,
    pub(crate) preferences: Preferences<FileStore>,
    pub(crate) session: Session,
    pub(crate) gateway: ConfiguredGateway,
}

impl ClientContext {
    /// Restores the persisted cart and session and builds the API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API base URL is unusable.
    pub(crate) fn init(config: AppConfig) -> anyhow::Result<Self> {
        let preferences = Preferences::new(FileStore::new(&config.data_dir));
        let cart = CartStore::restore(FileStore::new(&config.data_dir));
        let session = preferences.session();

        let api = ApiClient::new(&config)
            .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?
            .with_token(session.token.clone());
        let gateway = ConfiguredGateway::from_flag(config.mock_payments);

        tracing::debug!(
            env = %config.env,
            api = %api.base_url(),
            data_dir = %config.data_dir.display(),
            signed_in = session.is_authenticated(),
            cart_items = cart.item_count(),
            "client context ready"
        );

        Ok(Self {
            config,
            api,
            cart,
            preferences,
            session,
            gateway,
        })
    }

    /// Prints the welcome line on the very first run only.
    pub(crate) fn welcome_once(&mut self) {
        if self.preferences.has_seen_welcome() {
            return;
        }
        println!("Welcome to SRMiggy! Run `srmiggy vendors` to see what's cooking on campus.");
        if let Err(e) = self.preferences.mark_welcome_seen() {
            tracing::warn!(error = %e, "could not remember the welcome flag");
        }
    }

    /// Stores the session from a login or registration response.
    pub(crate) fn sign_in(&mut self, auth: &AuthResponse) -> anyhow::Result<()> {
        let identity = UserIdentity::from(auth);
        self.preferences.save_login(&auth.token, &identity)?;
        self.api.set_token(Some(auth.token.clone()));
        self.session = Session::new(Some(identity), Some(auth.token.clone()));
        tracing::info!(username = %auth.username, "signed in");
        Ok(())
    }

    /// Forgets the session. The cart and theme survive.
    pub(crate) fn sign_out(&mut self) -> anyhow::Result<()> {
        self.preferences.clear_login()?;
        self.api.set_token(None);
        self.session = Session::default();
        Ok(())
    }

    pub(crate) fn require_login(&self) -> anyhow::Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "you are not signed in; run `srmiggy login --username <name>` first"
            ))
        }
    }

    pub(crate) fn require_admin(&self) -> anyhow::Result<()> {
        self.require_login()?;
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("this command needs an admin account"))
        }
    }

    /// Turns an API failure into the message the user should see. A 401
    /// also drops the stale session so the next command starts clean.
    pub(crate) fn api_failure(&mut self, action: &str, error: ApiError) -> anyhow::Error {
        tracing::debug!(action, error = %error, "api call failed");
        if matches!(error, ApiError::Rejected { status: 401, .. }) && self.session.token.is_some()
        {
            if let Err(e) = self.sign_out() {
                tracing::warn!(error = %e, "could not clear expired session");
            }
        }
        anyhow::anyhow!("{action}: {}", error.user_message())
    }

    pub(crate) fn shutdown(self) {
        tracing::debug!(
            cart_items = self.cart.item_count(),
            signed_in = self.session.is_authenticated(),
            "client context closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_decimal::Decimal;
    use srmiggy_core::{Environment, PricingConfig, UserRole};

    use super::*;

    fn config(dir: &Path) -> AppConfig {
        AppConfig {
            env: Environment::Test,
            api_base_url: "http://localhost:8080/api".to_owned(),
            log_level: "info".to_owned(),
            data_dir: dir.to_path_buf(),
            request_timeout_secs: 5,
            checkout_timeout_secs: 10,
            user_agent: "srmiggy-test/0.1".to_owned(),
            pricing: PricingConfig::default(),
            mock_payments: true,
        }
    }

    fn auth(role: &str) -> AuthResponse {
        AuthResponse {
            token: "jwt-abc".to_owned(),
            username: "asha".to_owned(),
            email: None,
            role: Some(role.to_owned()),
            user_id: Some(3),
            wallet_balance: Some(Decimal::from(250)),
            phone: Some("9000000000".to_owned()),
            address: Some("Hostel B".to_owned()),
        }
    }

    #[test]
    fn sign_in_survives_restart_and_sign_out_clears_it() {
        let dir = tempfile::tempdir().unwrap();

        let mut ctx = ClientContext::init(config(dir.path())).unwrap();
        assert!(ctx.require_login().is_err());
        ctx.sign_in(&auth("USER")).unwrap();
        assert!(ctx.api.has_token());
        ctx.shutdown();

        let mut ctx = ClientContext::init(config(dir.path())).unwrap();
        assert!(ctx.require_login().is_ok());
        assert!(ctx.require_admin().is_err());
        assert_eq!(ctx.session.default_address(), Some("Hostel B"));
        assert_eq!(
            ctx.session.identity.as_ref().map(|i| i.role),
            Some(UserRole::Customer)
        );

        ctx.sign_out().unwrap();
        assert!(!ctx.api.has_token());
        ctx.shutdown();

        let ctx = ClientContext::init(config(dir.path())).unwrap();
        assert!(!ctx.session.is_authenticated());
    }

    #[test]
    fn admin_role_unlocks_admin_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ClientContext::init(config(dir.path())).unwrap();
        ctx.sign_in(&auth("ADMIN")).unwrap();
        assert!(ctx.require_admin().is_ok());
    }

    #[test]
    fn expired_session_is_dropped_on_401() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ClientContext::init(config(dir.path())).unwrap();
        ctx.sign_in(&auth("USER")).unwrap();

        let err = ctx.api_failure(
            "load orders",
            ApiError::Rejected {
                status: 401,
                message: None,
            },
        );

        assert_eq!(
            err.to_string(),
            "load orders: Your session has expired. Please log in again."
        );
        assert!(!ctx.session.is_authenticated());
    }

    #[test]
    fn welcome_flag_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ClientContext::init(config(dir.path())).unwrap();
        assert!(!ctx.preferences.has_seen_welcome());
        ctx.welcome_once();
        assert!(ctx.preferences.has_seen_welcome());
    }
}
