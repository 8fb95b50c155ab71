//! Session cookie configuration from the environment.
//!
//! Reads `SESSION_KEY_FILE`, `SESSION_COOKIE_SECURE`, and
//! `SESSION_ALLOW_EPHEMERAL` through [`mockable::Env`] so the rules can be
//! exercised without touching the process environment.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::cap_fs;
use crate::settings::{BuildMode, fingerprint};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Resolved session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// `Lax` in debug builds, `Strict` in release builds.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from the environment.
///
/// Debug builds fall back to defaults with a warning; release builds reject
/// missing or invalid values.
///
/// # Examples
/// ```rust
/// use bookstore::inbound::http::session_config::session_settings_from_env;
/// use bookstore::settings::BuildMode;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
/// let settings = session_settings_from_env(&env, BuildMode::Debug)?;
/// assert!(settings.cookie_secure);
/// # Ok::<(), bookstore::inbound::http::session_config::SessionConfigError>(())
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag_from_env(env, mode, COOKIE_SECURE_ENV, true)?;
    let allow_ephemeral = flag_from_env(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key_from_env(env, mode, allow_ephemeral)?;
    let same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn flag_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = debug_default, "session toggle not set; using default");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(variable = name, value = %value, default = debug_default, "invalid session toggle; using default");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let key = match cap_fs::read_file(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if bytes.len() >= SESSION_KEY_MIN_LEN {
                Key::derive_from(&bytes)
            } else if mode.is_debug() {
                warn!(path = %path.display(), length = bytes.len(), "session key too short; using temporary key (dev only)");
                Key::generate()
            } else {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            Key::generate()
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };
    info!(fingerprint = %fingerprint(key.signing()), "session key loaded");
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp key file");
        file.write_all(&vec![b'a'; len]).expect("write key");
        file
    }

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn path_of(file: &NamedTempFile) -> &str {
        file.path().to_str().expect("utf-8 temp path")
    }

    #[rstest]
    fn process_environment_is_read_through_default_env() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let _guard = env_lock::lock_env([
            (KEY_FILE_ENV, Some(path_of(&key).to_owned())),
            (COOKIE_SECURE_ENV, Some("0".to_owned())),
            (ALLOW_EPHEMERAL_ENV, Some("0".to_owned())),
        ]);

        let settings = session_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::Release)
            .expect("valid config");
        assert!(!settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn release_accepts_complete_configuration() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let env = mock_env(&[
            (KEY_FILE_ENV, path_of(&key)),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);

        let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid config");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
        assert_eq!(settings.key.signing(), Key::derive_from(&[b'a'; 64]).signing());
    }

    #[rstest]
    #[case(&[], COOKIE_SECURE_ENV)]
    #[case(&[(COOKIE_SECURE_ENV, "1")], ALLOW_EPHEMERAL_ENV)]
    fn release_requires_toggles(#[case] vars: &[(&str, &str)], #[case] missing: &str) {
        let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    fn release_rejects_invalid_bool() {
        let env = mock_env(&[(COOKIE_SECURE_ENV, "maybe"), (ALLOW_EPHEMERAL_ENV, "0")]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("invalid toggle");
        assert!(matches!(err, SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, .. }));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys() {
        let env = mock_env(&[(COOKIE_SECURE_ENV, "1"), (ALLOW_EPHEMERAL_ENV, "1")]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("ephemeral rejected");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_short_key() {
        let key = key_file(16);
        let env = mock_env(&[
            (KEY_FILE_ENV, path_of(&key)),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
    }

    #[rstest]
    fn release_rejects_missing_key_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent");
        let env = mock_env(&[
            (KEY_FILE_ENV, missing.to_str().expect("utf-8 path")),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("missing key");
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    fn debug_tolerates_empty_environment() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent");
        let env = mock_env(&[(KEY_FILE_ENV, missing.to_str().expect("utf-8 path"))]);

        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case("0", Some(false))]
    #[case("No", Some(false))]
    #[case(" yes ", Some(true))]
    #[case("", None)]
    fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
