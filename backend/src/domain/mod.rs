//! Domain primitives, ports and services for the course catalogue.
//!
//! Purpose: define the teacher and course records, their validation and
//! defaulting rules, and the use-case services that enforce referential
//! integrity on write and populate teacher references on read. Nothing here
//! knows about HTTP or SQL.
//!
//! Public surface:
//! - `Teacher`, `Course`, `CourseView`, `TeacherRef`: catalogue records.
//! - `TeacherService`, `CourseService`: use-cases implementing the driving
//!   ports in [`ports`].
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `CatalogueSeeder`: applies a seed document through the use-cases.
//! - `OperatorLoginService`: checks the configured operator account.

pub mod auth;
pub mod catalogue_seed;
pub mod catalogue_service;
pub mod course;
pub mod error;
pub mod ids;
pub mod listing;
pub mod operator_login;
pub mod ports;
pub mod rating;
pub mod tag_list;
pub mod teacher;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError, UserId};
pub use self::catalogue_seed::{
    CatalogueSeeder, CatalogueSeedingError, SeedCourse, SeedDocument, SeedOutcome, SeedTeacher,
};
pub use self::catalogue_service::{
    COURSE_NOT_FOUND, CourseService, TEACHER_NOT_FOUND, TeacherService,
};
pub use self::course::{
    Course, CourseDraft, CourseValidationError, CourseView, MISSING_COURSE_FIELDS_MESSAGE,
    NewCourseRequest,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CourseId, IdParseError, TeacherId};
pub use self::listing::{
    CourseListQuery, CourseSort, TOP_COURSES_LIMIT, TOP_TEACHERS_LIMIT, TeacherListQuery,
    TeacherSort, UnknownSortError,
};
pub use self::operator_login::OperatorLoginService;
pub use self::rating::{MAX_RATING, Rating, RatingValidationError};
pub use self::tag_list::{normalise_tags, split_comma_list};
pub use self::teacher::{
    NewTeacherRequest, Teacher, TeacherRef, TeacherSummary, TeacherValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
