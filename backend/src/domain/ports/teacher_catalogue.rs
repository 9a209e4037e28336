//! Driving port for teacher use-cases.
//!
//! Inbound adapters call this port to create and browse teachers without
//! knowing which store backs the catalogue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, NewTeacherRequest, Teacher, TeacherId, TeacherSort};

/// Teacher use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherCatalogue: Send + Sync {
    /// Validate and persist a new teacher.
    async fn create_teacher(&self, request: NewTeacherRequest) -> Result<Teacher, Error>;

    /// Every teacher in the requested order.
    async fn list_teachers(&self, sort: TeacherSort) -> Result<Vec<Teacher>, Error>;

    /// The top-rated `limit` teachers.
    async fn list_top_teachers(&self, limit: usize) -> Result<Vec<Teacher>, Error>;

    /// A single teacher, or `not_found`.
    async fn get_teacher(&self, id: &TeacherId) -> Result<Teacher, Error>;
}

/// Identifier of the teacher served by [`FixtureTeacherCatalogue`].
pub const FIXTURE_TEACHER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

pub(crate) fn fixture_timestamp() -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(1_700_000_000, 0)
        .ok_or_else(|| Error::internal("invalid fixture timestamp"))
}

pub(crate) fn fixture_teacher() -> Result<Teacher, Error> {
    let id: TeacherId = FIXTURE_TEACHER_ID
        .parse()
        .map_err(|err| Error::internal(format!("invalid fixture teacher id: {err}")))?;
    Teacher::create(
        id,
        NewTeacherRequest {
            name: Some("Sarah Johnson".to_owned()),
            bio: Some("Certified personal trainer.".to_owned()),
            expertise: vec!["Strength Training".to_owned(), "HIIT".to_owned()],
            rating: Some(4.9),
            total_students: Some(1250),
            ..NewTeacherRequest::default()
        },
        fixture_timestamp()?,
    )
    .map_err(|err| Error::internal(format!("invalid fixture teacher: {err}")))
}

/// Deterministic catalogue holding a single teacher, for handler tests.
///
/// `create_teacher` validates the request and echoes the result without
/// storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTeacherCatalogue;

#[async_trait]
impl TeacherCatalogue for FixtureTeacherCatalogue {
    async fn create_teacher(&self, request: NewTeacherRequest) -> Result<Teacher, Error> {
        Ok(Teacher::create(TeacherId::random(), request, fixture_timestamp()?)?)
    }

    async fn list_teachers(&self, _sort: TeacherSort) -> Result<Vec<Teacher>, Error> {
        Ok(vec![fixture_teacher()?])
    }

    async fn list_top_teachers(&self, limit: usize) -> Result<Vec<Teacher>, Error> {
        Ok(vec![fixture_teacher()?].into_iter().take(limit).collect())
    }

    async fn get_teacher(&self, id: &TeacherId) -> Result<Teacher, Error> {
        let teacher = fixture_teacher()?;
        if teacher.id() == *id {
            Ok(teacher)
        } else {
            Err(Error::not_found("Teacher not found"))
        }
    }
}
