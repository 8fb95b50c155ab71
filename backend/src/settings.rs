//! Application settings loaded via OrthoConfig.
//!
//! Values come from `BOOKSTORE_*` environment variables, command-line flags,
//! and an optional configuration file, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use chrono::Duration;
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::cap_fs;
use crate::domain::TokenVerification;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;
const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode used to decide how strictly configuration is validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or weak values fall back to development defaults with a warning.
    Debug,
    /// Missing or weak values are startup errors.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSTORE")]
pub struct AppSettings {
    /// Listen address; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Listen port; defaults to 8080.
    pub port: Option<u16>,
    /// Catalogue seed file replacing the built-in seed.
    pub catalogue_path: Option<PathBuf>,
    /// File holding the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Session token lifetime in seconds; defaults to one hour.
    pub token_ttl_seconds: Option<i64>,
    /// Re-verify the session token on every protected request.
    #[ortho_config(default = false)]
    pub verify_tokens: bool,
}

impl AppSettings {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Token lifetime. Non-positive values fall back to the default.
    pub fn token_ttl(&self) -> Duration {
        match self.token_ttl_seconds {
            Some(seconds) if seconds > 0 => Duration::seconds(seconds),
            _ => Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
        }
    }

    pub fn token_verification(&self) -> TokenVerification {
        TokenVerification::from_flag(self.verify_tokens)
    }

    /// Load the token signing secret.
    ///
    /// Debug builds without a configured file use a random per-process secret,
    /// so sessions do not survive a restart.
    pub fn token_secret(&self, mode: BuildMode) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        let secret = match &self.token_secret_file {
            Some(path) => read_secret(path, mode)?,
            None if mode.is_debug() => {
                warn!("BOOKSTORE_TOKEN_SECRET_FILE not set; using ephemeral token secret (dev only)");
                let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(&mut bytes);
                bytes
            }
            None => return Err(SettingsError::MissingTokenSecret),
        };
        info!(fingerprint = %fingerprint(&secret), "token signing secret loaded");
        Ok(secret)
    }
}

fn read_secret(path: &Path, mode: BuildMode) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
    let bytes = Zeroizing::new(cap_fs::read_file(path).map_err(|source| {
        SettingsError::SecretRead {
            path: path.to_path_buf(),
            source,
        }
    })?);
    if bytes.len() < TOKEN_SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(
                path = %path.display(),
                length = bytes.len(),
                "token secret shorter than recommended"
            );
        } else {
            return Err(SettingsError::SecretTooShort {
                path: path.to_path_buf(),
                length: bytes.len(),
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
    }
    Ok(bytes)
}

/// Truncated SHA-256 fingerprint of key material, as 16 hex characters.
///
/// Lets operators tell keys apart in logs without exposing them.
///
/// # Examples
/// ```
/// use bookstore::settings::fingerprint;
///
/// let fp = fingerprint(b"secret");
/// assert_eq!(fp.len(), 16);
/// assert_eq!(fp, fingerprint(b"secret"));
/// ```
#[must_use]
pub fn fingerprint(material: &[u8]) -> String {
    let digest = Sha256::digest(material);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Release builds require a token secret file.
    #[error("BOOKSTORE_TOKEN_SECRET_FILE must be set in release builds")]
    MissingTokenSecret,
    /// The token secret file could not be read.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The token secret is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}
