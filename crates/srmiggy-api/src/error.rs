use thiserror::Error;

/// Errors returned by the SRMiggy API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    /// The server answered with a non-2xx status. `message` is the server's
    /// own explanation when the body carried one.
    #[error("request rejected with HTTP {status}{}", detail(.message))]
    Rejected { status: u16, message: Option<String> },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Rejected locally before anything was sent.
    #[error("invalid request: {0}")]
    Validation(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// Text suitable for showing to the person at the keyboard.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Rejected { status: 401, .. } => {
                "Your session has expired. Please log in again.".to_owned()
            }
            ApiError::Rejected { status: 403, .. } => {
                "You are not allowed to do that.".to_owned()
            }
            ApiError::Rejected { status, .. } => format!("Request failed (HTTP {status})."),
            ApiError::Http(e) if e.is_timeout() => {
                "The server took too long to respond.".to_owned()
            }
            ApiError::Http(e) if e.is_connect() => "Could not reach the server.".to_owned(),
            ApiError::Http(_) => "Network error while talking to the server.".to_owned(),
            ApiError::NotFound { .. } => "Not found.".to_owned(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Deserialize { .. } | ApiError::InvalidBaseUrl { .. } => {
                "Unexpected response from the server.".to_owned()
            }
        }
    }

    /// The server's own explanation, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_timeout())
    }
}
