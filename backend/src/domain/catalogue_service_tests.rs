//! Tests for the catalogue services.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{MockCourseRepository, MockTeacherRepository};
use crate::domain::{ErrorCode, Rating, TOP_COURSES_LIMIT, TOP_TEACHERS_LIMIT};

#[fixture]
fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn teacher_named(name: &str, now: DateTime<Utc>) -> Teacher {
    Teacher::create(
        TeacherId::random(),
        NewTeacherRequest {
            name: Some(name.to_owned()),
            ..NewTeacherRequest::default()
        },
        now,
    )
    .expect("valid teacher")
}

fn course_request(teacher_id: &str) -> NewCourseRequest {
    NewCourseRequest {
        title: Some("Morning Yoga".to_owned()),
        teacher_id: Some(teacher_id.to_owned()),
        price: Some(0.0),
        ..NewCourseRequest::default()
    }
}

fn stored_course(teacher: TeacherId, now: DateTime<Utc>) -> Course {
    CourseDraft::validate(course_request(&teacher.to_string()))
        .expect("valid draft")
        .into_course(CourseId::random(), teacher, now)
}

fn course_service(
    courses: MockCourseRepository,
    teachers: MockTeacherRepository,
    now: DateTime<Utc>,
) -> CourseService<MockCourseRepository, MockTeacherRepository> {
    CourseService::new(Arc::new(courses), Arc::new(teachers), clock_at(now))
}

#[rstest]
#[tokio::test]
async fn create_course_populates_teacher_and_applies_defaults(now: DateTime<Utc>) {
    let teacher = teacher_named("Ada", now);
    let teacher_id = teacher.id();
    let mut teachers = MockTeacherRepository::new();
    teachers
        .expect_find_by_id()
        .withf(move |id| *id == teacher_id)
        .times(1)
        .return_once(move |_| Ok(Some(teacher)));
    let mut courses = MockCourseRepository::new();
    courses
        .expect_insert()
        .withf(move |course| course.teacher == teacher_id)
        .times(1)
        .return_once(|_| Ok(()));

    let view = course_service(courses, teachers, now)
        .create_course(course_request(&teacher_id.to_string()))
        .await
        .expect("course created");

    assert_eq!(view.teacher.id(), teacher_id);
    assert_eq!(view.teacher.display_name(), Some("Ada"));
    assert_eq!(view.description, "");
    assert_eq!(view.image, "");
    assert_eq!(view.rating, Rating::ZERO);
    assert!(view.lessons.is_empty());
    assert!(!view.is_top_course);
    assert_eq!(view.created_at, now);
}

#[rstest]
#[tokio::test]
async fn create_course_with_unknown_teacher_never_writes(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_find_by_id().times(1).return_once(|_| Ok(None));
    let mut courses = MockCourseRepository::new();
    courses.expect_insert().never();

    let err = course_service(courses, teachers, now)
        .create_course(course_request(&TeacherId::random().to_string()))
        .await
        .expect_err("teacher missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), TEACHER_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn create_course_with_malformed_teacher_id_is_not_found(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_find_by_id().never();
    let mut courses = MockCourseRepository::new();
    courses.expect_insert().never();

    let err = course_service(courses, teachers, now)
        .create_course(course_request("64b7f9e2c1a4d5e6f7a8b9c0"))
        .await
        .expect_err("malformed id");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_course_missing_fields_fails_before_any_lookup(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_find_by_id().never();
    let mut courses = MockCourseRepository::new();
    courses.expect_insert().never();

    let err = course_service(courses, teachers, now)
        .create_course(NewCourseRequest {
            title: Some("Yoga".to_owned()),
            ..NewCourseRequest::default()
        })
        .await
        .expect_err("missing fields");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details(),
        Some(&json!({"fields": ["teacherId", "price"], "code": "missing_fields"}))
    );
}

#[rstest]
#[tokio::test]
async fn insert_rejected_for_vanished_teacher_maps_to_not_found(now: DateTime<Utc>) {
    let teacher = teacher_named("Ada", now);
    let teacher_id = teacher.id();
    let mut teachers = MockTeacherRepository::new();
    teachers
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(teacher)));
    let mut courses = MockCourseRepository::new();
    courses
        .expect_insert()
        .return_once(move |_| Err(CourseRepositoryError::missing_teacher(teacher_id.to_string())));

    let err = course_service(courses, teachers, now)
        .create_course(course_request(&teacher_id.to_string()))
        .await
        .expect_err("race lost");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_courses_degrades_unresolved_teachers(now: DateTime<Utc>) {
    let known = teacher_named("Ada", now);
    let known_id = known.id();
    let missing_id = TeacherId::random();
    let listed = vec![stored_course(known_id, now), stored_course(missing_id, now)];

    let mut courses = MockCourseRepository::new();
    courses
        .expect_list()
        .withf(|query| *query == CourseListQuery::all(CourseSort::Newest))
        .return_once(move |_| Ok(listed));
    let mut teachers = MockTeacherRepository::new();
    teachers
        .expect_find_by_ids()
        .withf(move |ids| ids.len() == 2 && ids.contains(&known_id) && ids.contains(&missing_id))
        .times(1)
        .return_once(move |_| Ok(vec![known]));

    let views = course_service(courses, teachers, now)
        .list_courses(CourseSort::Newest)
        .await
        .expect("listed");

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].teacher.display_name(), Some("Ada"));
    assert_eq!(views[1].teacher, TeacherRef::Unresolved(missing_id));
}

#[rstest]
#[tokio::test]
async fn list_top_courses_requests_flagged_courses_by_rating(now: DateTime<Utc>) {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_list()
        .withf(|query| *query == CourseListQuery::top(TOP_COURSES_LIMIT))
        .return_once(|_| Ok(Vec::new()));
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_find_by_ids().never();

    let views = course_service(courses, teachers, now)
        .list_top_courses(TOP_COURSES_LIMIT)
        .await
        .expect("listed");
    assert!(views.is_empty());
}

#[rstest]
#[tokio::test]
async fn get_course_reports_missing_course(now: DateTime<Utc>) {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));

    let err = course_service(courses, MockTeacherRepository::new(), now)
        .get_course(&CourseId::random())
        .await
        .expect_err("missing course");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), COURSE_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn store_failures_become_internal_errors(now: DateTime<Utc>) {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_list()
        .return_once(|_| Err(CourseRepositoryError::connection("pool exhausted")));

    let err = course_service(courses, MockTeacherRepository::new(), now)
        .list_courses(CourseSort::Rating)
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn create_teacher_stamps_clock_and_persists(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers
        .expect_insert()
        .withf(|teacher| teacher.name() == "Ada")
        .times(1)
        .return_once(|_| Ok(()));
    let service = TeacherService::new(Arc::new(teachers), clock_at(now));

    let teacher = service
        .create_teacher(NewTeacherRequest {
            name: Some("Ada".to_owned()),
            ..NewTeacherRequest::default()
        })
        .await
        .expect("teacher created");

    assert_eq!(teacher.created_at(), now);
    assert_eq!(teacher.bio(), None);
    assert_eq!(teacher.rating(), Rating::ZERO);
}

#[rstest]
#[tokio::test]
async fn create_teacher_without_name_never_writes(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_insert().never();
    let service = TeacherService::new(Arc::new(teachers), clock_at(now));

    let err = service
        .create_teacher(NewTeacherRequest::default())
        .await
        .expect_err("missing name");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn list_top_teachers_uses_rating_order_and_limit(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers
        .expect_list()
        .withf(|query| *query == TeacherListQuery::top(TOP_TEACHERS_LIMIT))
        .return_once(|_| Ok(Vec::new()));
    let service = TeacherService::new(Arc::new(teachers), clock_at(now));

    let listed = service
        .list_top_teachers(TOP_TEACHERS_LIMIT)
        .await
        .expect("listed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn get_teacher_reports_missing_teacher(now: DateTime<Utc>) {
    let mut teachers = MockTeacherRepository::new();
    teachers.expect_find_by_id().return_once(|_| Ok(None));
    let service = TeacherService::new(Arc::new(teachers), clock_at(now));

    let err = service
        .get_teacher(&TeacherId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.message(), TEACHER_NOT_FOUND);
}
