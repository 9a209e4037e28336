//! Driving port for credential login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Authenticate credentials and yield the id stored in the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Email accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_EMAIL: &str = "admin@coach.io";
/// Password accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_PASSWORD: &str = "admin123";
/// User id returned by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator with one hard-coded account, for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email() == FIXTURE_LOGIN_EMAIL
            && credentials.password() == FIXTURE_LOGIN_PASSWORD
        {
            UserId::new(FIXTURE_LOGIN_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("Invalid credentials"))
        }
    }
}
