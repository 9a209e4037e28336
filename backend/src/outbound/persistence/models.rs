//! Internal Diesel row structs for catalogue tables.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{courses, teachers};

/// Row read from `teachers`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teachers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeacherRow {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub image: Option<String>,
    pub rating: f64,
    pub total_students: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable teacher row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teachers)]
pub(crate) struct NewTeacherRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub bio: Option<&'a str>,
    pub expertise: &'a [String],
    pub image: Option<&'a str>,
    pub rating: f64,
    pub total_students: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `courses`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub rating: f64,
    pub teacher_id: Uuid,
    pub lessons: Vec<String>,
    pub is_top_course: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable course row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub price: f64,
    pub rating: f64,
    pub teacher_id: Uuid,
    pub lessons: &'a [String],
    pub is_top_course: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
