//! Credential check against the single configured operator account.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// [`LoginService`] accepting exactly one email/password pair.
///
/// # Examples
/// ```
/// use coursehub::domain::{OperatorLoginService, UserId};
///
/// let id = UserId::new("123e4567-e89b-12d3-a456-426614174000").unwrap();
/// let login = OperatorLoginService::new("Ops@Coach.io", "hunter2", id);
/// # let _ = login;
/// ```
pub struct OperatorLoginService {
    email: String,
    password_digest: Zeroizing<[u8; 32]>,
    user_id: UserId,
}

fn digest(secret: &str) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(secret.as_bytes()).into())
}

/// Compares fixed-length digests without an early exit, so timing does not
/// reveal how much of a guess matched.
fn digests_match(left: &[u8; 32], right: &[u8; 32]) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
        == 0
}

impl OperatorLoginService {
    /// The email is normalised the same way as [`LoginCredentials`].
    pub fn new(email: &str, password: &str, user_id: UserId) -> Self {
        Self {
            email: email.trim().to_ascii_lowercase(),
            password_digest: digest(password),
            user_id,
        }
    }
}

#[async_trait]
impl LoginService for OperatorLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let email_matches = digests_match(&digest(credentials.email()), &digest(&self.email));
        let password_matches =
            digests_match(&digest(credentials.password()), &self.password_digest);
        if email_matches & password_matches {
            Ok(self.user_id)
        } else {
            warn!("rejected login attempt");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
