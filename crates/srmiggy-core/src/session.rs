use serde::{Deserialize, Serialize};

use crate::types::AuthResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Customer,
    Vendor,
    Admin,
}

impl UserRole {
    fn from_wire(role: Option<&str>) -> Self {
        match role.map(str::to_ascii_uppercase).as_deref() {
            Some("ADMIN" | "ROLE_ADMIN") => UserRole::Admin,
            Some("VENDOR" | "ROLE_VENDOR") => UserRole::Vendor,
            _ => UserRole::Customer,
        }
    }
}

/// Who is signed in, plus the contact defaults used to prefill checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<&AuthResponse> for UserIdentity {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            id: auth.user_id,
            username: auth.username.clone(),
            role: UserRole::from_wire(auth.role.as_deref()),
            phone: auth.phone.clone(),
            address: auth.address.clone(),
        }
    }
}

/// Read-only view of the signed-in user handed to cart and checkout code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<UserIdentity>,
    pub token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(identity: Option<UserIdentity>, token: Option<String>) -> Self {
        Self { identity, token }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated()
            && self
                .identity
                .as_ref()
                .is_some_and(|u| u.role == UserRole::Admin)
    }

    #[must_use]
    pub fn default_address(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|u| u.address.as_deref())
    }

    #[must_use]
    pub fn default_phone(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|u| u.phone.as_deref())
    }
}
