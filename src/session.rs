//! In-memory bearer-token handling.
//!
//! The retrieval workflow never reads ambient session state; whoever owns
//! the session injects a [`CredentialProvider`] into each call. Tokens are
//! opaque strings — no validation here beyond emptiness checks downstream.
//!
//! Key properties:
//! - Tokens exist only in memory — never persisted to disk
//! - Tokens zeroed via `Zeroize` on replacement, clear, and drop

use std::sync::Mutex;

use zeroize::Zeroize;

/// Supplies the bearer token for the authenticated document API.
pub trait CredentialProvider {
    /// Current bearer token, `None` when no session is active.
    fn bearer_token(&self) -> Option<String>;
}

/// Stored token — zeroed on drop to prevent memory leakage.
#[derive(Zeroize)]
#[zeroize(drop)]
struct StoredToken(String);

/// In-memory session token store.
pub struct TokenStore {
    token: Mutex<Option<StoredToken>>,
}

impl TokenStore {
    /// Create an empty store (no active session).
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    /// Replace the stored token. The previous token is zeroed on drop.
    pub fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(StoredToken(token.to_string()));
        }
    }

    /// Drop the stored token (session ended). The token is zeroed.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }

    /// Is a session token currently held?
    pub fn has_token(&self) -> bool {
        self.token
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for TokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.token.lock().ok()?.as_ref().map(|t| t.0.clone())
    }
}

/// Fixed-token provider for embedders that manage sessions elsewhere.
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Provider for the no-session case (direct-URL viewing only).
pub struct NoCredential;

impl CredentialProvider for NoCredential {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_has_no_token() {
        let store = TokenStore::new();
        assert!(!store.has_token());
        assert!(store.bearer_token().is_none());
    }

    #[test]
    fn set_then_read_token() {
        let store = TokenStore::new();
        store.set("tok-123");
        assert!(store.has_token());
        assert_eq!(store.bearer_token().unwrap(), "tok-123");
    }

    #[test]
    fn set_replaces_previous_token() {
        let store = TokenStore::new();
        store.set("old");
        store.set("new");
        assert_eq!(store.bearer_token().unwrap(), "new");
    }

    #[test]
    fn clear_drops_token() {
        let store = TokenStore::new();
        store.set("tok-123");
        store.clear();
        assert!(!store.has_token());
        assert!(store.bearer_token().is_none());
    }

    #[test]
    fn static_token_yields_its_value() {
        let provider = StaticToken("tok-abc".into());
        assert_eq!(provider.bearer_token().unwrap(), "tok-abc");
    }

    #[test]
    fn empty_static_token_yields_none() {
        assert!(StaticToken(String::new()).bearer_token().is_none());
    }

    #[test]
    fn no_credential_yields_none() {
        assert!(NoCredential.bearer_token().is_none());
    }
}
