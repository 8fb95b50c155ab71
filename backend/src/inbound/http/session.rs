//! Session cookie access for HTTP handlers.
//!
//! Wraps the Actix session so handlers only see [`SessionState`] and never the
//! cookie layout. The login payload is stored under a single key as
//! `{"username": ..., "accessToken": ...}`.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AuthenticatedSession, Error, SessionState, SessionToken, Username};

pub(crate) const AUTHORIZATION_KEY: &str = "authorization";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    username: String,
    access_token: String,
}

/// Handler-facing view of the client session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Attach a freshly issued session, rotating the cookie.
    pub fn persist(&self, session: &AuthenticatedSession) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(
                AUTHORIZATION_KEY,
                StoredSession {
                    username: session.username().as_ref().to_owned(),
                    access_token: session.token().as_ref().to_owned(),
                },
            )
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current session state.
    ///
    /// Unreadable or inconsistent cookie contents are logged and treated as
    /// anonymous.
    pub fn state(&self) -> SessionState {
        let stored = match self.0.get::<StoredSession>(AUTHORIZATION_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return SessionState::Anonymous,
            Err(error) => {
                warn!(%error, "unreadable session payload");
                return SessionState::Anonymous;
            }
        };
        match Username::new(&stored.username) {
            Ok(username) if !stored.access_token.is_empty() => SessionState::from(
                AuthenticatedSession::new(username, SessionToken::new(stored.access_token)),
            ),
            _ => {
                warn!("session payload missing username or token");
                SessionState::Anonymous
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use serde_json::json;

    async fn whoami(session: SessionContext) -> HttpResponse {
        match session.state().authenticated() {
            Some(session) => HttpResponse::Ok().body(session.username().to_string()),
            None => HttpResponse::Unauthorized().finish(),
        }
    }

    async fn call_with_cookie_from(set_path: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/persist",
                    web::get().to(|session: SessionContext| async move {
                        let auth = AuthenticatedSession::new(
                            Username::new("alice").expect("username"),
                            SessionToken::new("signed"),
                        );
                        session.persist(&auth)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(AUTHORIZATION_KEY, json!({ "username": "  " }))
                            .expect("insert raw payload");
                        HttpResponse::Ok()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let set = test::call_service(&app, test::TestRequest::get().uri(set_path).to_request()).await;
        let cookie = set
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        res.status()
    }

    #[actix_web::test]
    async fn persisted_session_round_trips() {
        assert_eq!(call_with_cookie_from("/persist").await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_payload_is_anonymous() {
        assert_eq!(call_with_cookie_from("/tamper").await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_cookie_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
