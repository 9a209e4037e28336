//! OpenAPI document for the catalogue API.
//!
//! [`ApiDoc`] aggregates every handler's `utoipa::path` and the payload
//! schemas. Swagger UI serves it in debug builds and the `openapi-dump`
//! binary prints it for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CourseView, Error, ErrorCode, Teacher, TeacherRef, TeacherSummary};
use crate::inbound::http::catalogue_dto::{CreateCourseRequest, CreateTeacherRequest, TagListInput};
use crate::inbound::http::users::{LoginRequest, SessionResponse};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI description of the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Coursehub catalogue API",
        description = "Course and teacher listings, catalogue writes and operator sessions."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::teachers::list_teachers,
        crate::inbound::http::teachers::create_teacher,
        crate::inbound::http::teachers::list_top_teachers,
        crate::inbound::http::teachers::get_teacher,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_top_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Teacher,
        TeacherSummary,
        TeacherRef,
        CourseView,
        CreateTeacherRequest,
        CreateCourseRequest,
        TagListInput,
        LoginRequest,
        SessionResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "teachers", description = "Teacher listings and creation"),
        (name = "courses", description = "Course listings and creation"),
        (name = "session", description = "Operator login sessions"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;
