//! Domain ports for the catalogue hexagon.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Catalogue`, [`LoginService`]) are called by inbound adapters.
//! Each driving port ships a deterministic `Fixture*` implementation so
//! handlers can be tested without a store.

mod macros;
pub(crate) use macros::define_port_error;

mod course_catalogue;
mod course_repository;
mod login_service;
mod teacher_catalogue;
mod teacher_repository;

#[cfg(test)]
pub use course_catalogue::MockCourseCatalogue;
pub use course_catalogue::{CourseCatalogue, FIXTURE_COURSE_ID, FixtureCourseCatalogue};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, FixtureLoginService,
    LoginService,
};
#[cfg(test)]
pub use teacher_catalogue::MockTeacherCatalogue;
pub use teacher_catalogue::{FIXTURE_TEACHER_ID, FixtureTeacherCatalogue, TeacherCatalogue};
#[cfg(test)]
pub use teacher_repository::MockTeacherRepository;
pub use teacher_repository::{TeacherRepository, TeacherRepositoryError};
