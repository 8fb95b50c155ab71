//! Registered user identity and credentials.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors raised when building usernames and passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was missing or whitespace only.
    EmptyUsername,
    /// Password was missing or empty.
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique account name.
///
/// ## Invariants
/// - Stored exactly as given; `" alice"` and `"alice"` are different names.
/// - Never empty or whitespace only.
///
/// # Examples
/// ```
/// use bookstore::domain::Username;
///
/// let name = Username::new(" alice").unwrap();
/// assert_eq!(name.as_ref(), " alice");
/// assert_ne!(name, Username::new("alice").unwrap());
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Plain-text password.
///
/// Stored verbatim (whitespace included) and compared with exact equality.
/// The buffer is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a password.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        if raw.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Raw password text.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Entry in the user registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password: Password,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Whether `candidate` equals the stored password exactly.
    pub fn password_matches(&self, candidate: &Password) -> bool {
        self.password == *candidate
    }
}
