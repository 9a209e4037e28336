//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with fixtures and no store.

use std::sync::Arc;

use crate::domain::Error;
use crate::domain::ports::{
    CourseCatalogue, FixtureCourseCatalogue, FixtureLoginService, FixtureTeacherCatalogue,
    LoginService, TeacherCatalogue,
};
use crate::inbound::http::session::SessionContext;

/// Whether catalogue writes need an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteAccess {
    /// Anyone may create teachers and courses.
    #[default]
    Open,
    /// Creating teachers and courses requires a logged-in session.
    RequireSession,
}

impl WriteAccess {
    /// Map the configuration flag onto an access policy.
    #[must_use]
    pub const fn from_flag(require_login: bool) -> Self {
        if require_login {
            Self::RequireSession
        } else {
            Self::Open
        }
    }

    /// Check `session` against the policy.
    pub fn authorise(self, session: &SessionContext) -> Result<(), Error> {
        match self {
            Self::Open => Ok(()),
            Self::RequireSession => session.require_user_id().map(|_| ()),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub teachers: Arc<dyn TeacherCatalogue>,
    pub courses: Arc<dyn CourseCatalogue>,
    pub login: Arc<dyn LoginService>,
    pub write_access: WriteAccess,
}

impl HttpState {
    /// Construct state with open write access.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use coursehub::domain::ports::{
    ///     FixtureCourseCatalogue, FixtureLoginService, FixtureTeacherCatalogue,
    /// };
    /// use coursehub::inbound::http::state::{HttpState, WriteAccess};
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureTeacherCatalogue),
    ///     Arc::new(FixtureCourseCatalogue),
    ///     Arc::new(FixtureLoginService),
    /// );
    /// assert_eq!(state.write_access, WriteAccess::Open);
    /// ```
    pub fn new(
        teachers: Arc<dyn TeacherCatalogue>,
        courses: Arc<dyn CourseCatalogue>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            teachers,
            courses,
            login,
            write_access: WriteAccess::Open,
        }
    }

    /// Replace the write access policy.
    #[must_use]
    pub fn with_write_access(mut self, write_access: WriteAccess) -> Self {
        self.write_access = write_access;
        self
    }

    /// State backed entirely by the `Fixture*` port implementations.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureTeacherCatalogue),
            Arc::new(FixtureCourseCatalogue),
            Arc::new(FixtureLoginService),
        )
    }
}
