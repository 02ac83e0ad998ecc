use reqwest::Method;
use srmiggy_core::{AuthResponse, LoginRequest, RegisterRequest};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /auth/login`. The returned token is not attached to this
    /// client; call [`ApiClient::set_token`] with it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for bad credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"], &[]);
        self.execute(self.request(Method::POST, url).json(credentials), "login")
            .await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the username or email is taken or
    /// the details are incomplete.
    pub async fn register(&self, details: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint(&["auth", "register"], &[]);
        self.execute(self.request(Method::POST, url).json(details), "register")
            .await
    }
}
