//! Driven port for course persistence.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseListQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
        /// The referenced teacher does not exist at write time.
        MissingTeacher { teacher_id: String } =>
            "course references unknown teacher {teacher_id}",
    }
}

/// Storage of course records.
///
/// Adapters must refuse to store a course whose teacher does not exist and
/// report [`CourseRepositoryError::MissingTeacher`] instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// List courses matching the query filter, ordered and truncated.
    async fn list(&self, query: CourseListQuery) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Number of stored courses.
    async fn count(&self) -> Result<u64, CourseRepositoryError>;
}
