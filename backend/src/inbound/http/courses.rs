//! Course endpoints.
//!
//! Every course leaves these handlers with its teacher populated, or as the
//! bare teacher id when that teacher no longer exists.
//!
//! ```text
//! GET  /api/v1/courses?sort=newest|rating
//! POST /api/v1/courses {"title":"Yoga","teacherId":"...","price":0,"lessons":"Intro, Flow"}
//! GET  /api/v1/courses/top
//! GET  /api/v1/courses/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{COURSE_NOT_FOUND, CourseId, CourseSort, CourseView, Error, TOP_COURSES_LIMIT};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::CreateCourseRequest;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{SortQuery, parse_path_id};

/// List courses, newest first unless `sort=rating`.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(SortQuery),
    responses(
        (status = 200, description = "Courses with populated teachers", body = [CourseView]),
        (status = 400, description = "Unknown sort order", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<SortQuery>,
) -> ApiResult<web::Json<Vec<CourseView>>> {
    let sort: CourseSort = query.resolve()?;
    let courses = state.courses.list_courses(sort).await?;
    Ok(web::Json(courses))
}

/// Create a course for an existing teacher.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseView),
        (status = 400, description = "Missing or invalid fields", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Teacher not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    state.write_access.authorise(&session)?;
    let course = state
        .courses
        .create_course(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

/// The three highest-rated featured courses.
#[utoipa::path(
    get,
    path = "/api/v1/courses/top",
    responses(
        (status = 200, description = "Top courses", body = [CourseView]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listTopCourses",
    security([])
)]
#[get("/courses/top")]
pub async fn list_top_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseView>>> {
    let courses = state.courses.list_top_courses(TOP_COURSES_LIMIT).await?;
    Ok(web::Json(courses))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course with populated teacher", body = CourseView),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseView>> {
    let id: CourseId = parse_path_id(&path, COURSE_NOT_FOUND)?;
    let course = state.courses.get_course(&id).await?;
    Ok(web::Json(course))
}

/// Register the course routes; `/courses/top` precedes `/courses/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_courses)
        .service(create_course)
        .service(list_top_courses)
        .service(get_course);
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
