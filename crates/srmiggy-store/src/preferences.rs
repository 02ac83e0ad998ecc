//! Small per-device flags and the remembered login.

use srmiggy_core::{Session, UserIdentity};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

const DARK_MODE_KEY: &str = "darkMode";
const WELCOME_KEY: &str = "hasSeenWelcome";
const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Typed view over the preference keys of a [`KeyValueStore`].
///
/// Reads are lenient: a value that cannot be parsed reads as the default
/// and is logged. Writes propagate storage errors.
#[derive(Debug)]
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.read_flag(DARK_MODE_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the flag cannot be written.
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Flips the theme and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the flag cannot be written.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StoreError> {
        let next = !self.dark_mode();
        self.set_dark_mode(next)?;
        Ok(next)
    }

    #[must_use]
    pub fn has_seen_welcome(&self) -> bool {
        self.read_flag(WELCOME_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the flag cannot be written.
    pub fn mark_welcome_seen(&mut self) -> Result<(), StoreError> {
        self.store.set(WELCOME_KEY, "true")
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored token");
                None
            }
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<UserIdentity> {
        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable stored user");
                None
            }
        }
    }

    /// Session as last persisted; anonymous when nothing is stored.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.identity(), self.token())
    }

    /// Remembers a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either entry cannot be written.
    pub fn save_login(&mut self, token: &str, identity: &UserIdentity) -> Result<(), StoreError> {
        let user = serde_json::to_string(identity).map_err(|source| StoreError::Serialize {
            context: "stored user".to_owned(),
            source,
        })?;
        self.store.set(USER_KEY, &user)?;
        self.store.set(TOKEN_KEY, token)
    }

    /// Forgets the token and user. Theme and welcome flags are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either entry cannot be removed.
    pub fn clear_login(&mut self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    fn read_flag(&self, key: &str) -> bool {
        match self.store.get(key) {
            Ok(Some(raw)) => raw.trim() == "true",
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read preference");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use srmiggy_core::UserRole;

    use super::*;
    use crate::kv::MemoryStore;

    fn identity() -> UserIdentity {
        UserIdentity {
            id: Some(3),
            username: "ravi".to_owned(),
            role: UserRole::Customer,
            phone: Some("9876543210".to_owned()),
            address: Some("Hostel A".to_owned()),
        }
    }

    #[test]
    fn flags_default_to_false() {
        let prefs = Preferences::new(MemoryStore::new());
        assert!(!prefs.dark_mode());
        assert!(!prefs.has_seen_welcome());
        assert!(!prefs.session().is_authenticated());
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut prefs = Preferences::new(MemoryStore::new());
        assert!(prefs.toggle_dark_mode().unwrap());
        assert!(prefs.dark_mode());
        assert!(!prefs.toggle_dark_mode().unwrap());

        let store = prefs.into_inner();
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn login_round_trips_and_logout_keeps_theme() {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.set_dark_mode(true).unwrap();
        prefs.mark_welcome_seen().unwrap();
        prefs.save_login("jwt-abc", &identity()).unwrap();

        let session = prefs.session();
        assert!(session.is_authenticated());
        assert_eq!(session.identity, Some(identity()));
        assert_eq!(session.default_address(), Some("Hostel A"));

        prefs.clear_login().unwrap();
        assert!(!prefs.session().is_authenticated());
        assert!(prefs.dark_mode());
        assert!(prefs.has_seen_welcome());
    }

    #[test]
    fn unreadable_user_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(USER_KEY, "{broken").unwrap();
        store.set(TOKEN_KEY, "t").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.identity(), None);
        assert!(prefs.session().is_authenticated());
    }
}
