//! Catalogue domain services implementing the teacher and course driving
//! ports on top of the repository ports.
//!
//! Course reads go through a populate step: every teacher reference is
//! resolved with one batched repository read, and references that no longer
//! resolve are returned as [`TeacherRef::Unresolved`] rather than failing the
//! whole read.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CourseCatalogue, CourseRepository, CourseRepositoryError, TeacherCatalogue,
    TeacherRepository, TeacherRepositoryError,
};
use crate::domain::{
    Course, CourseDraft, CourseId, CourseListQuery, CourseSort, CourseView, Error,
    NewCourseRequest, NewTeacherRequest, Teacher, TeacherId, TeacherListQuery, TeacherRef,
    TeacherSort, TeacherSummary,
};

/// Message of the not-found error for teachers.
pub const TEACHER_NOT_FOUND: &str = "Teacher not found";
/// Message of the not-found error for courses.
pub const COURSE_NOT_FOUND: &str = "Course not found";

pub(crate) fn map_teacher_repository_error(err: TeacherRepositoryError) -> Error {
    error!(error = %err, "teacher repository failure");
    Error::internal(err.to_string())
}

pub(crate) fn map_course_repository_error(err: CourseRepositoryError) -> Error {
    match err {
        CourseRepositoryError::MissingTeacher { teacher_id } => {
            warn!(%teacher_id, "course insert rejected: teacher disappeared");
            Error::not_found(TEACHER_NOT_FOUND)
        }
        other => {
            error!(error = %other, "course repository failure");
            Error::internal(other.to_string())
        }
    }
}

/// Teacher use-cases backed by a [`TeacherRepository`].
#[derive(Clone)]
pub struct TeacherService<T> {
    teachers: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<T> TeacherService<T> {
    /// Create a service over `teachers`, stamping records with `clock`.
    pub fn new(teachers: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self { teachers, clock }
    }
}

#[async_trait]
impl<T> TeacherCatalogue for TeacherService<T>
where
    T: TeacherRepository,
{
    async fn create_teacher(&self, request: NewTeacherRequest) -> Result<Teacher, Error> {
        let teacher = Teacher::create(TeacherId::random(), request, self.clock.utc())?;
        self.teachers
            .insert(&teacher)
            .await
            .map_err(map_teacher_repository_error)?;
        info!(teacher_id = %teacher.id(), "teacher created");
        Ok(teacher)
    }

    async fn list_teachers(&self, sort: TeacherSort) -> Result<Vec<Teacher>, Error> {
        self.teachers
            .list(TeacherListQuery::all(sort))
            .await
            .map_err(map_teacher_repository_error)
    }

    async fn list_top_teachers(&self, limit: usize) -> Result<Vec<Teacher>, Error> {
        self.teachers
            .list(TeacherListQuery::top(limit))
            .await
            .map_err(map_teacher_repository_error)
    }

    async fn get_teacher(&self, id: &TeacherId) -> Result<Teacher, Error> {
        self.teachers
            .find_by_id(id)
            .await
            .map_err(map_teacher_repository_error)?
            .ok_or_else(|| Error::not_found(TEACHER_NOT_FOUND))
    }
}

/// Course use-cases backed by a [`CourseRepository`] with teacher
/// references resolved through a [`TeacherRepository`].
#[derive(Clone)]
pub struct CourseService<C, T> {
    courses: Arc<C>,
    teachers: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<C, T> CourseService<C, T> {
    /// Create a service over `courses`, resolving teachers via `teachers`.
    pub fn new(courses: Arc<C>, teachers: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            teachers,
            clock,
        }
    }
}

impl<C, T> CourseService<C, T>
where
    C: CourseRepository,
    T: TeacherRepository,
{
    async fn populate(&self, courses: Vec<Course>) -> Result<Vec<CourseView>, Error> {
        let mut ids: Vec<TeacherId> = courses.iter().map(|course| course.teacher).collect();
        ids.sort_unstable();
        ids.dedup();

        let summaries: HashMap<TeacherId, TeacherSummary> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.teachers
                .find_by_ids(&ids)
                .await
                .map_err(map_teacher_repository_error)?
                .iter()
                .map(|teacher| (teacher.id(), TeacherSummary::from(teacher)))
                .collect()
        };

        Ok(courses
            .into_iter()
            .map(|course| {
                let reference = match summaries.get(&course.teacher) {
                    Some(summary) => TeacherRef::Populated(summary.clone()),
                    None => {
                        warn!(
                            course_id = %course.id,
                            teacher_id = %course.teacher,
                            "course references a teacher that no longer exists"
                        );
                        TeacherRef::Unresolved(course.teacher)
                    }
                };
                course.into_view(reference)
            })
            .collect())
    }

    async fn list(&self, query: CourseListQuery) -> Result<Vec<CourseView>, Error> {
        let courses = self
            .courses
            .list(query)
            .await
            .map_err(map_course_repository_error)?;
        self.populate(courses).await
    }
}

#[async_trait]
impl<C, T> CourseCatalogue for CourseService<C, T>
where
    C: CourseRepository,
    T: TeacherRepository,
{
    async fn create_course(&self, request: NewCourseRequest) -> Result<CourseView, Error> {
        let draft = CourseDraft::validate(request)?;
        let teacher_id: TeacherId = draft
            .teacher_id()
            .parse()
            .map_err(|_| Error::not_found(TEACHER_NOT_FOUND))?;
        let teacher = self
            .teachers
            .find_by_id(&teacher_id)
            .await
            .map_err(map_teacher_repository_error)?
            .ok_or_else(|| Error::not_found(TEACHER_NOT_FOUND))?;

        let course = draft.into_course(CourseId::random(), teacher_id, self.clock.utc());
        self.courses
            .insert(&course)
            .await
            .map_err(map_course_repository_error)?;
        info!(course_id = %course.id, %teacher_id, "course created");
        Ok(course.into_view(TeacherRef::Populated(TeacherSummary::from(&teacher))))
    }

    async fn list_courses(&self, sort: CourseSort) -> Result<Vec<CourseView>, Error> {
        self.list(CourseListQuery::all(sort)).await
    }

    async fn list_top_courses(&self, limit: usize) -> Result<Vec<CourseView>, Error> {
        self.list(CourseListQuery::top(limit)).await
    }

    async fn get_course(&self, id: &CourseId) -> Result<CourseView, Error> {
        let course = self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))?;
        let mut views = self.populate(vec![course]).await?;
        views
            .pop()
            .ok_or_else(|| Error::internal("populate dropped the requested course"))
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
