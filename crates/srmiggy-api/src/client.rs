//! HTTP client for the SRMiggy REST API.
//!
//! Wraps `reqwest` with bearer-token auth, status mapping, and typed
//! response deserialization. Endpoint groups live in [`crate::endpoints`].
//! Nothing here retries on its own; a failed call is reported once and the
//! caller decides whether to try again.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use srmiggy_core::AppConfig;

use crate::error::ApiError;

/// Client for the SRMiggy backend.
///
/// Use [`ApiClient::new`] with loaded configuration, or
/// [`ApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] for a bad base URL.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` is not
    /// an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
        })
    }

    /// Attaches (or drops) the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty());
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path and sets the query pairs.
    pub(crate) fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path that can be extended.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and parses a JSON body into `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(request, context).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }

    /// Like [`Self::execute`] but an empty success body yields `None`.
    pub(crate) async fn execute_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Option<T>, ApiError> {
        let body = self.execute_raw(request, context).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| ApiError::Deserialize {
                context: context.to_owned(),
                source,
            })
    }

    async fn execute_raw(&self, request: RequestBuilder, context: &str) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%url, context, "endpoint returned 404");
            return Err(ApiError::NotFound { url });
        }

        if !status.is_success() {
            let message = server_message(&body);
            tracing::warn!(
                %url,
                context,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "request rejected"
            );
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%url, context, status = status.as_u16(), "request succeeded");
        Ok(body)
    }
}

/// Pulls a human-readable explanation out of an error body.
///
/// Looks for a non-empty `message`, then `error`, in a JSON object. A short
/// plain-text body is used as-is.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_owned),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Ok(_) => None,
        Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => Some(trimmed.to_owned()),
        Err(_) => None,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
