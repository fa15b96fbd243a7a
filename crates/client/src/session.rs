//! Session token sources.
//!
//! The connection asks its injected [`SessionTokens`] for the current
//! bearer token on every request; absence means an anonymous session, which
//! the cart gateway maps to an empty cart rather than an error.

use std::fmt::Debug;
use std::sync::RwLock;

/// Supplies the current session token, if any.
pub trait SessionTokens: Debug + Send + Sync {
    fn token(&self) -> Option<String>;
}

/// An in-process token holder, set after login and cleared on logout.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl SessionTokens for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }
}

/// The anonymous session: never has a token.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnonymousSession;

impl SessionTokens for AnonymousSession {
    fn token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_round_trip() {
        let session = MemorySession::new();
        assert_eq!(session.token(), None);

        session.set_token("tok-1");
        assert_eq!(session.token(), Some("tok-1".to_owned()));

        session.clear();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn anonymous_session_has_no_token() {
        assert_eq!(AnonymousSession.token(), None);
    }
}
