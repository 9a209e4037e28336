//! Teacher endpoints.
//!
//! ```text
//! GET  /api/v1/teachers?sort=rating|newest
//! POST /api/v1/teachers {"name":"Sarah Johnson","expertise":"HIIT, Nutrition"}
//! GET  /api/v1/teachers/top
//! GET  /api/v1/teachers/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, TOP_TEACHERS_LIMIT, TEACHER_NOT_FOUND, Teacher, TeacherId, TeacherSort};
use crate::inbound::http::ApiResult;
use crate::inbound::http::catalogue_dto::CreateTeacherRequest;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{SortQuery, parse_path_id};

/// List teachers, highest rated first unless `sort=newest`.
#[utoipa::path(
    get,
    path = "/api/v1/teachers",
    params(SortQuery),
    responses(
        (status = 200, description = "Teachers", body = [Teacher]),
        (status = 400, description = "Unknown sort order", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teachers"],
    operation_id = "listTeachers",
    security([])
)]
#[get("/teachers")]
pub async fn list_teachers(
    state: web::Data<HttpState>,
    query: web::Query<SortQuery>,
) -> ApiResult<web::Json<Vec<Teacher>>> {
    let sort: TeacherSort = query.resolve()?;
    let teachers = state.teachers.list_teachers(sort).await?;
    Ok(web::Json(teachers))
}

/// Create a teacher.
#[utoipa::path(
    post,
    path = "/api/v1/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Missing or invalid field", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teachers"],
    operation_id = "createTeacher"
)]
#[post("/teachers")]
pub async fn create_teacher(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTeacherRequest>,
) -> ApiResult<HttpResponse> {
    state.write_access.authorise(&session)?;
    let teacher = state
        .teachers
        .create_teacher(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(teacher))
}

/// The four highest-rated teachers.
#[utoipa::path(
    get,
    path = "/api/v1/teachers/top",
    responses(
        (status = 200, description = "Top teachers", body = [Teacher]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teachers"],
    operation_id = "listTopTeachers",
    security([])
)]
#[get("/teachers/top")]
pub async fn list_top_teachers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Teacher>>> {
    let teachers = state.teachers.list_top_teachers(TOP_TEACHERS_LIMIT).await?;
    Ok(web::Json(teachers))
}

/// Fetch one teacher.
#[utoipa::path(
    get,
    path = "/api/v1/teachers/{id}",
    params(("id" = String, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher", body = Teacher),
        (status = 404, description = "Teacher not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["teachers"],
    operation_id = "getTeacher",
    security([])
)]
#[get("/teachers/{id}")]
pub async fn get_teacher(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Teacher>> {
    let id: TeacherId = parse_path_id(&path, TEACHER_NOT_FOUND)?;
    let teacher = state.teachers.get_teacher(&id).await?;
    Ok(web::Json(teacher))
}

/// Register the teacher routes; `/teachers/top` precedes `/teachers/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_teachers)
        .service(create_teacher)
        .service(list_top_teachers)
        .service(get_teacher);
}

#[cfg(test)]
#[path = "teachers_tests.rs"]
mod tests;
