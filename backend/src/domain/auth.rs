//! Registration and login credentials.
//!
//! Inbound adapters build [`Credentials`] from raw strings before calling a
//! port, so every use-case receives validated input.

use serde_json::json;

use super::{Error, Password, User, UserValidationError, Username};

/// Validated username/password pair used by registration and login.
///
/// ## Invariants
/// - `username` is kept verbatim and is not blank.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use bookstore::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "pw1").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password().expose(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Username used for lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Turn the credentials into a registry entry.
    pub fn into_user(self) -> User {
        User::new(self.username, self.password)
    }
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        let (field, code) = match value {
            UserValidationError::EmptyUsername => ("username", "empty_username"),
            UserValidationError::EmptyPassword => ("password", "empty_password"),
        };
        Error::invalid_request("Username and password are required")
            .with_details(json!({ "field": field, "code": code }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", UserValidationError::EmptyUsername)]
    #[case("   ", "pw", UserValidationError::EmptyUsername)]
    #[case("alice", "", UserValidationError::EmptyPassword)]
    #[case("", "", UserValidationError::EmptyUsername)]
    fn invalid_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(UserValidationError::EmptyUsername, "username")]
    #[case(UserValidationError::EmptyPassword, "password")]
    fn validation_errors_map_to_invalid_request(
        #[case] validation: UserValidationError,
        #[case] field: &str,
    ) {
        let err = Error::from(validation);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], field);
    }

    #[rstest]
    fn into_user_keeps_password() {
        let creds = Credentials::try_from_parts(" bob ", "secret").expect("valid credentials");
        let user = creds.clone().into_user();
        assert_eq!(user.username().as_ref(), " bob ");
        assert!(user.password_matches(creds.password()));
    }
}
