//! Driving port for course use-cases.

use async_trait::async_trait;

use crate::domain::{
    CourseDraft, CourseId, CourseSort, CourseView, Error, NewCourseRequest, TeacherRef,
    TeacherSummary,
};

use super::teacher_catalogue::{fixture_teacher, fixture_timestamp};

/// Course use-cases exposed to inbound adapters.
///
/// Every course returned by this port carries a populated teacher, or the
/// unresolved variant when the reference no longer resolves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// Validate, check the teacher reference, and persist a new course.
    async fn create_course(&self, request: NewCourseRequest) -> Result<CourseView, Error>;

    /// Every course in the requested order.
    async fn list_courses(&self, sort: CourseSort) -> Result<Vec<CourseView>, Error>;

    /// The `limit` highest-rated courses flagged as top courses.
    async fn list_top_courses(&self, limit: usize) -> Result<Vec<CourseView>, Error>;

    /// A single course, or `not_found`.
    async fn get_course(&self, id: &CourseId) -> Result<CourseView, Error>;
}

/// Identifier of the course served by [`FixtureCourseCatalogue`].
pub const FIXTURE_COURSE_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn fixture_course() -> Result<CourseView, Error> {
    let teacher = fixture_teacher()?;
    let id: CourseId = FIXTURE_COURSE_ID
        .parse()
        .map_err(|err| Error::internal(format!("invalid fixture course id: {err}")))?;
    let draft = CourseDraft::validate(NewCourseRequest {
        title: Some("Complete Fitness Transformation".to_owned()),
        description: Some("Twelve weeks of progressive training.".to_owned()),
        teacher_id: Some(teacher.id().to_string()),
        price: Some(99.0),
        rating: Some(4.8),
        lessons: vec!["Foundations".to_owned(), "Progressive Overload".to_owned()],
        is_top_course: Some(true),
        ..NewCourseRequest::default()
    })
    .map_err(|err| Error::internal(format!("invalid fixture course: {err}")))?;
    Ok(draft
        .into_course(id, teacher.id(), fixture_timestamp()?)
        .into_view(TeacherRef::Populated(TeacherSummary::from(&teacher))))
}

/// Deterministic catalogue holding a single top course taught by the
/// fixture teacher, for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCatalogue;

#[async_trait]
impl CourseCatalogue for FixtureCourseCatalogue {
    async fn create_course(&self, request: NewCourseRequest) -> Result<CourseView, Error> {
        let draft = CourseDraft::validate(request)?;
        let teacher = fixture_teacher()?;
        if draft.teacher_id() != teacher.id().to_string() {
            return Err(Error::not_found("Teacher not found"));
        }
        Ok(draft
            .into_course(CourseId::random(), teacher.id(), fixture_timestamp()?)
            .into_view(TeacherRef::Populated(TeacherSummary::from(&teacher))))
    }

    async fn list_courses(&self, _sort: CourseSort) -> Result<Vec<CourseView>, Error> {
        Ok(vec![fixture_course()?])
    }

    async fn list_top_courses(&self, limit: usize) -> Result<Vec<CourseView>, Error> {
        Ok(vec![fixture_course()?].into_iter().take(limit).collect())
    }

    async fn get_course(&self, id: &CourseId) -> Result<CourseView, Error> {
        let course = fixture_course()?;
        if course.id == *id {
            Ok(course)
        } else {
            Err(Error::not_found("Course not found"))
        }
    }
}
