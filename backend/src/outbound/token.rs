//! HMAC-SHA256 session token issuer.
//!
//! Tokens have the shape `base64url(claims).base64url(mac)`, where `claims` is
//! a compact JSON object `{"sub","iat","exp"}` with unix-second timestamps
//! and `mac` is HMAC-SHA256 over the encoded claims segment.

use std::sync::Arc;

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{SessionToken, TokenClaims, Username};

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::seconds(3600);

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs tokens with a process-wide secret.
pub struct HmacTokenIssuer {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl HmacTokenIssuer {
    /// Create an issuer signing with `secret` and stamping `ttl` expiries.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
            clock,
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| TokenError::issue(format!("invalid signing key: {err}")))
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenError::malformed(format!("timestamp {seconds} out of range")))
}

impl TokenIssuer for HmacTokenIssuer {
    fn issue(&self, username: &Username) -> Result<SessionToken, TokenError> {
        let now = self.clock.utc();
        let claims = WireClaims {
            sub: username.as_ref().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|err| TokenError::issue(err.to_string()))?;
        let encoded = Base64UrlUnpadded::encode_string(&payload);

        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        let signature = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

        Ok(SessionToken::new(format!("{encoded}.{signature}")))
    }

    fn verify(&self, token: &SessionToken) -> Result<TokenClaims, TokenError> {
        let (encoded, signature) = token
            .as_ref()
            .split_once('.')
            .ok_or_else(|| TokenError::malformed("missing signature segment"))?;
        let signature = Base64UrlUnpadded::decode_vec(signature)
            .map_err(|err| TokenError::malformed(format!("signature: {err}")))?;

        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::bad_signature())?;

        let payload = Base64UrlUnpadded::decode_vec(encoded)
            .map_err(|err| TokenError::malformed(format!("claims: {err}")))?;
        let claims: WireClaims = serde_json::from_slice(&payload)
            .map_err(|err| TokenError::malformed(format!("claims: {err}")))?;

        let expires_at = timestamp(claims.exp)?;
        if self.clock.utc() >= expires_at {
            return Err(TokenError::expired(expires_at.to_rfc3339()));
        }

        Ok(TokenClaims {
            subject: Username::new(&claims.sub)
                .map_err(|err| TokenError::malformed(format!("subject: {err}")))?,
            issued_at: timestamp(claims.iat)?,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct SteppingClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<SteppingClock> {
        Arc::new(SteppingClock {
            now: Mutex::new(
                Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
                    .single()
                    .expect("valid fixture timestamp"),
            ),
        })
    }

    fn issuer(secret: &str, clock: &Arc<SteppingClock>) -> HmacTokenIssuer {
        let clock: Arc<dyn Clock> = clock.clone();
        HmacTokenIssuer::new(secret.as_bytes(), DEFAULT_TOKEN_TTL, clock)
    }

    fn alice() -> Username {
        Username::new("alice").expect("username")
    }

    #[rstest]
    fn issued_token_verifies_with_claims(clock: Arc<SteppingClock>) {
        let issuer = issuer("access", &clock);
        let token = issuer.issue(&alice()).expect("issue");
        let claims = issuer.verify(&token).expect("verify");

        assert_eq!(claims.subject, alice());
        assert_eq!(claims.issued_at, clock.utc());
        assert_eq!(claims.expires_at, clock.utc() + DEFAULT_TOKEN_TTL);
    }

    #[rstest]
    fn token_expires_after_ttl(clock: Arc<SteppingClock>) {
        let issuer = issuer("access", &clock);
        let token = issuer.issue(&alice()).expect("issue");

        clock.advance(DEFAULT_TOKEN_TTL - Duration::seconds(1));
        assert!(issuer.verify(&token).is_ok());

        clock.advance(Duration::seconds(1));
        assert!(matches!(
            issuer.verify(&token),
            Err(TokenError::Expired { .. })
        ));
    }

    #[rstest]
    fn foreign_secret_is_rejected(clock: Arc<SteppingClock>) {
        let token = issuer("access", &clock).issue(&alice()).expect("issue");
        assert_eq!(
            issuer("other", &clock).verify(&token),
            Err(TokenError::bad_signature())
        );
    }

    #[rstest]
    fn tampered_claims_are_rejected(clock: Arc<SteppingClock>) {
        let issuer = issuer("access", &clock);
        let token = issuer.issue(&alice()).expect("issue");
        let (_, signature) = token.as_ref().split_once('.').expect("two segments");
        let forged_claims = Base64UrlUnpadded::encode_string(
            br#"{"sub":"mallory","iat":0,"exp":9999999999}"#,
        );
        let forged = SessionToken::new(format!("{forged_claims}.{signature}"));

        assert_eq!(issuer.verify(&forged), Err(TokenError::bad_signature()));
    }

    #[rstest]
    #[case("")]
    #[case("no-separator")]
    #[case("abc.!!!")]
    fn malformed_tokens_are_rejected(clock: Arc<SteppingClock>, #[case] raw: &str) {
        let result = issuer("access", &clock).verify(&SessionToken::new(raw));
        assert!(matches!(result, Err(TokenError::Malformed { .. })));
    }
}
