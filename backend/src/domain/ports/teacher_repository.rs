//! Driven port for teacher persistence.

use async_trait::async_trait;

use crate::domain::{Teacher, TeacherId, TeacherListQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by teacher repository adapters.
    pub enum TeacherRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "teacher repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "teacher repository query failed: {message}",
    }
}

/// Storage of teacher records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Persist a new teacher.
    async fn insert(&self, teacher: &Teacher) -> Result<(), TeacherRepositoryError>;

    /// Fetch a teacher by identifier.
    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherRepositoryError>;

    /// Fetch every teacher whose id is in `ids`. Unknown ids are skipped and
    /// the result order is unspecified.
    async fn find_by_ids(&self, ids: &[TeacherId]) -> Result<Vec<Teacher>, TeacherRepositoryError>;

    /// List teachers in the requested order, truncated to the query limit.
    async fn list(&self, query: TeacherListQuery) -> Result<Vec<Teacher>, TeacherRepositoryError>;

    /// Number of stored teachers.
    async fn count(&self) -> Result<u64, TeacherRepositoryError>;
}
