//! Session, navigation, and notification seams.
//!
//! The pipeline never reaches for globals; the host application injects
//! these collaborators as trait objects when wiring up the auth plugin.

use secrecy::SecretString;
use std::sync::RwLock;

/// Externally owned authentication state.
///
/// Read by every request's before-request hook; concurrent reads are safe.
/// Writes happen only through [`logout`](SessionStore::logout), which must
/// be idempotent.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, if authenticated.
    fn token(&self) -> Option<SecretString>;

    /// Clear authentication state. Logging out twice is a no-op.
    fn logout(&self);

    /// Ask the host UI to show a login prompt. Non-blocking.
    fn request_login(&self);
}

/// Client-side navigation, used only to reach the forbidden view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: &str);
}

/// Fire-and-forget user-facing error surface.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// In-process session store backed by a lock.
///
/// Hosts with a real session layer implement [`SessionStore`] themselves;
/// this one covers embedding and tests. Its login prompt is a no-op.
#[derive(Default)]
pub struct MemorySession {
    token: RwLock<Option<SecretString>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(SecretString::from(token.into()));
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<SecretString> {
        self.token.read().ok()?.clone()
    }

    fn logout(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    fn request_login(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn token_round_trip() {
        let session = MemorySession::new();
        assert!(!session.is_authenticated());

        session.set_token("jwt-abc");
        assert_eq!(session.token().unwrap().expose_secret(), "jwt-abc");
    }

    #[test]
    fn logout_is_idempotent() {
        let session = MemorySession::with_token("jwt-abc");
        session.logout();
        assert!(!session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
    }
}
