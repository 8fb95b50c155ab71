//! Per-client session state.
//!
//! A client moves from [`SessionState::Anonymous`] to
//! [`SessionState::Authenticated`] on a successful login. There is no logout
//! transition; the session ends when the client drops its cookie.

use std::fmt;

use chrono::{DateTime, Utc};

use super::Username;

/// Opaque signed credential proving a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

/// Claims carried inside a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// User the token was issued to.
    pub subject: Username,
    /// Issuance instant.
    pub issued_at: DateTime<Utc>,
    /// Instant after which the token is no longer valid.
    pub expires_at: DateTime<Utc>,
}

/// Session established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    username: Username,
    token: SessionToken,
}

impl AuthenticatedSession {
    /// Bind `token` to `username`.
    pub fn new(username: Username, token: SessionToken) -> Self {
        Self { username, token }
    }

    /// User the session belongs to.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Token issued at login.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

/// Session context threaded into every protected operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No login has happened on this client.
    #[default]
    Anonymous,
    /// The client logged in.
    Authenticated(AuthenticatedSession),
}

impl SessionState {
    /// The attached session, if any.
    pub fn authenticated(&self) -> Option<&AuthenticatedSession> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(session) => Some(session),
        }
    }
}

impl From<AuthenticatedSession> for SessionState {
    fn from(value: AuthenticatedSession) -> Self {
        Self::Authenticated(value)
    }
}

/// How protected operations treat the token attached to a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenVerification {
    /// Trust the token once it is attached to the session.
    #[default]
    TrustSession,
    /// Re-check signature, expiry, and subject on every protected call.
    VerifyOnUse,
}

impl TokenVerification {
    /// Map the configuration flag onto a policy.
    pub fn from_flag(verify_on_use: bool) -> Self {
        if verify_on_use {
            Self::VerifyOnUse
        } else {
            Self::TrustSession
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_anonymous() {
        assert!(SessionState::default().authenticated().is_none());
    }

    #[test]
    fn authenticated_state_exposes_session() {
        let session = AuthenticatedSession::new(
            Username::new("alice").expect("username"),
            SessionToken::new("token"),
        );
        let state = SessionState::from(session.clone());
        assert_eq!(state.authenticated(), Some(&session));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-token");
        assert!(!format!("{token:?}").contains("secret-token"));
    }

    #[test]
    fn verification_flag_maps_to_policy() {
        assert_eq!(TokenVerification::from_flag(true), TokenVerification::VerifyOnUse);
        assert_eq!(TokenVerification::from_flag(false), TokenVerification::TrustSession);
    }
}
