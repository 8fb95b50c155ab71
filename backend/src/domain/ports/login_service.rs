//! Driving port for login and the session gate.
//!
//! Inbound adapters call [`Authenticator::login`] to establish a session and
//! every protected use-case calls [`Authenticator::require_authenticated`]
//! before touching state.

use async_trait::async_trait;

use crate::domain::{AuthenticatedSession, Credentials, Error, SessionState, Username};

/// Authentication use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check `credentials` against the registry and issue a session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] unless both the
    /// username and password match a registered user exactly.
    async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedSession, Error>;

    /// Return the username bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when no session is
    /// attached or, under a verifying policy, when its token is invalid.
    fn require_authenticated(&self, session: &SessionState) -> Result<Username, Error>;
}
