//! Login and session gate implementing [`Authenticator`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{Authenticator, TokenError, TokenIssuer, UserRepository};
use crate::domain::registry_service::map_user_repository_error;
use crate::domain::{
    AuthenticatedSession, Credentials, Error, SessionState, TokenVerification, Username,
};

/// Authenticates against a [`UserRepository`] and signs sessions with a
/// [`TokenIssuer`].
///
/// Under [`TokenVerification::TrustSession`] the gate only checks that a
/// session is attached. [`TokenVerification::VerifyOnUse`] also re-verifies
/// the token on every call.
pub struct SessionAuthenticator<R, T> {
    users: Arc<R>,
    tokens: Arc<T>,
    verification: TokenVerification,
}

impl<R, T> SessionAuthenticator<R, T> {
    /// Create an authenticator with the default trust-session policy.
    pub fn new(users: Arc<R>, tokens: Arc<T>) -> Self {
        Self {
            users,
            tokens,
            verification: TokenVerification::default(),
        }
    }

    /// Select how protected calls treat the attached token.
    #[must_use]
    pub fn with_verification(mut self, verification: TokenVerification) -> Self {
        self.verification = verification;
        self
    }
}

fn not_logged_in() -> Error {
    Error::unauthorized("User not logged in")
}

impl<R, T> SessionAuthenticator<R, T>
where
    T: TokenIssuer,
{
    fn verify_session(&self, session: &AuthenticatedSession) -> Result<(), Error> {
        let claims = self.tokens.verify(session.token()).map_err(|error| {
            match &error {
                TokenError::Expired { .. } => debug!(%error, "session token expired"),
                _ => warn!(%error, "session token rejected"),
            }
            Error::unauthorized("Session expired or invalid")
        })?;
        if claims.subject != *session.username() {
            warn!(
                session_user = %session.username(),
                token_subject = %claims.subject,
                "session token subject mismatch"
            );
            return Err(Error::unauthorized("Session expired or invalid"));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, T> Authenticator for SessionAuthenticator<R, T>
where
    R: UserRepository,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedSession, Error> {
        let user = self
            .users
            .find(credentials.username())
            .await
            .map_err(map_user_repository_error)?;
        let authenticated = user.is_some_and(|user| user.password_matches(credentials.password()));
        if !authenticated {
            debug!(username = %credentials.username(), "login rejected");
            return Err(Error::unauthorized("Invalid username or password"));
        }

        let token = self
            .tokens
            .issue(credentials.username())
            .map_err(|error| Error::internal(format!("failed to issue session token: {error}")))?;
        info!(username = %credentials.username(), "user logged in");
        Ok(AuthenticatedSession::new(
            credentials.username().clone(),
            token,
        ))
    }

    fn require_authenticated(&self, session: &SessionState) -> Result<Username, Error> {
        let session = session.authenticated().ok_or_else(not_logged_in)?;
        if self.verification == TokenVerification::VerifyOnUse {
            self.verify_session(session)?;
        }
        Ok(session.username().clone())
    }
}
