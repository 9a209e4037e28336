//! Authentication primitives: login credentials and the session user id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation failures for login payload values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroed on drop.
///
/// # Examples
/// ```
/// use coursehub::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Coach.io ", "admin123").unwrap();
/// assert_eq!(creds.email(), "admin@coach.io");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised.to_ascii_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identifier of an authenticated user stored in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a UUID string.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.as_ref()).map(Self)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
