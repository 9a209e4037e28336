//! Request bodies of the catalogue endpoints.
//!
//! Every field is optional so that a missing key and an explicit `null` both
//! reach the domain as "absent" and are reported with the domain's own
//! validation messages instead of a deserialiser error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewCourseRequest, NewTeacherRequest, normalise_tags, split_comma_list};

/// A list of short strings sent either as a JSON array or as one
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TagListInput {
    /// `["Intro", "Basics"]`
    List(Vec<String>),
    /// `"Intro, Basics"`
    Csv(String),
}

impl TagListInput {
    /// Trimmed, non-empty entries in input order.
    pub fn into_entries(self) -> Vec<String> {
        match self {
            Self::List(entries) => normalise_tags(entries),
            Self::Csv(raw) => split_comma_list(&raw),
        }
    }
}

fn entries(input: Option<TagListInput>) -> Vec<String> {
    input.map(TagListInput::into_entries).unwrap_or_default()
}

/// Body of `POST /api/v1/teachers`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherRequest {
    /// Display name; required.
    #[schema(example = "Sarah Johnson")]
    pub name: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Skill tags as an array or a comma-separated string.
    #[schema(value_type = Option<Vec<String>>)]
    pub expertise: Option<TagListInput>,
    /// Portrait URL.
    pub image: Option<String>,
    /// Rating; clamped into 0..=5.
    #[schema(example = 4.8)]
    pub rating: Option<f64>,
    /// Number of students taught.
    #[schema(example = 1250)]
    pub total_students: Option<i64>,
}

impl From<CreateTeacherRequest> for NewTeacherRequest {
    fn from(body: CreateTeacherRequest) -> Self {
        Self {
            name: body.name,
            bio: body.bio,
            expertise: entries(body.expertise),
            image: body.image,
            rating: body.rating,
            total_students: body.total_students,
        }
    }
}

/// Body of `POST /api/v1/courses`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Title; required.
    #[schema(example = "Complete Fitness Transformation")]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Id of an existing teacher; required.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub teacher_id: Option<String>,
    /// Price; required, `0` marks a free course.
    #[schema(example = 49.99)]
    pub price: Option<f64>,
    /// Rating; clamped into 0..=5.
    pub rating: Option<f64>,
    /// Lesson titles as an array or a comma-separated string.
    #[schema(value_type = Option<Vec<String>>)]
    pub lessons: Option<TagListInput>,
    /// Featured flag.
    pub is_top_course: Option<bool>,
}

impl From<CreateCourseRequest> for NewCourseRequest {
    fn from(body: CreateCourseRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            image: body.image,
            teacher_id: body.teacher_id,
            price: body.price,
            rating: body.rating,
            lessons: entries(body.lessons),
            is_top_course: body.is_top_course,
        }
    }
}
