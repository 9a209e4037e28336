//! Tests for the course endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    FIXTURE_COURSE_ID, FIXTURE_TEACHER_ID, FixtureLoginService, FixtureTeacherCatalogue,
    MockCourseCatalogue,
};
use crate::domain::{
    CourseDraft, CourseId, CourseSort, CourseView, NewCourseRequest, TeacherId, TeacherRef,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::api_test_app;

fn state_with(courses: MockCourseCatalogue) -> HttpState {
    HttpState::new(
        Arc::new(FixtureTeacherCatalogue),
        Arc::new(courses),
        Arc::new(FixtureLoginService),
    )
}

async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(api_test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn orphaned_course() -> CourseView {
    let teacher = TeacherId::random();
    CourseDraft::validate(NewCourseRequest {
        title: Some("Orphan".to_owned()),
        teacher_id: Some(teacher.to_string()),
        price: Some(5.0),
        ..NewCourseRequest::default()
    })
    .expect("valid draft")
    .into_course(CourseId::random(), teacher, chrono::Utc::now())
    .into_view(TeacherRef::Unresolved(teacher))
}

#[actix_web::test]
async fn list_returns_populated_teachers() {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::get().uri("/api/v1/courses"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let teacher = &body[0]["teacher"];
    assert_eq!(teacher["_id"], FIXTURE_TEACHER_ID);
    assert_eq!(teacher["name"], "Sarah Johnson");
    assert_eq!(teacher["totalStudents"], 1250);
    assert_eq!(body[0]["isTopCourse"], true);
}

#[actix_web::test]
async fn unresolved_teacher_is_rendered_as_bare_id() {
    let course = orphaned_course();
    let expected = course.teacher.id().to_string();
    let mut courses = MockCourseCatalogue::new();
    courses
        .expect_list_courses()
        .withf(|sort| *sort == CourseSort::Newest)
        .return_once(move |_| Ok(vec![course]));

    let (status, body) = call(
        state_with(courses),
        actix_test::TestRequest::get().uri("/api/v1/courses"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["teacher"], Value::String(expected));
}

#[actix_web::test]
async fn create_returns_populated_course_with_defaults() {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({
                "title": "Free Yoga",
                "teacherId": FIXTURE_TEACHER_ID,
                "price": 0,
                "lessons": "Intro, , Getting Started,  "
            })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["teacher"]["_id"], FIXTURE_TEACHER_ID);
    assert_eq!(body["price"], json!(0.0));
    assert_eq!(body["description"], "");
    assert_eq!(body["image"], "");
    assert_eq!(body["rating"], json!(0.0));
    assert_eq!(body["isTopCourse"], false);
    assert_eq!(body["lessons"], json!(["Intro", "Getting Started"]));
}

#[rstest]
#[case(json!({"teacherId": FIXTURE_TEACHER_ID, "price": 10}), json!(["title"]))]
#[case(json!({"title": "Yoga", "price": null}), json!(["teacherId", "price"]))]
#[case(json!({"title": "  ", "teacherId": "", "price": 1}), json!(["title", "teacherId"]))]
#[actix_web::test]
async fn missing_fields_are_listed(#[case] payload: Value, #[case] fields: Value) {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: title, teacherId, price");
    assert_eq!(body["details"]["fields"], fields);
}

#[actix_web::test]
async fn unknown_teacher_is_not_found() {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::post()
            .uri("/api/v1/courses")
            .set_json(json!({
                "title": "Yoga",
                "teacherId": TeacherId::random().to_string(),
                "price": 10
            })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Teacher not found");
}

#[actix_web::test]
async fn top_courses_requests_three() {
    let mut courses = MockCourseCatalogue::new();
    courses
        .expect_list_top_courses()
        .withf(|limit| *limit == 3)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let (status, body) = call(
        state_with(courses),
        actix_test::TestRequest::get().uri("/api/v1/courses/top"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn top_route_is_not_captured_by_id_route() {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::get().uri("/api/v1/courses/top"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[rstest]
#[case(FIXTURE_COURSE_ID, StatusCode::OK)]
#[case("7c9e6679-7425-40de-944b-000000000000", StatusCode::NOT_FOUND)]
#[case("64b7f9e2c1a4d5e6f7a8b9c0", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn get_course_by_id(#[case] id: &str, #[case] expected: StatusCode) {
    let (status, body) = call(
        HttpState::fixtures(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/courses/{id}")),
    )
    .await;

    assert_eq!(status, expected);
    if expected == StatusCode::NOT_FOUND {
        assert_eq!(body["message"], "Course not found");
    } else {
        assert_eq!(body["_id"], FIXTURE_COURSE_ID);
    }
}
