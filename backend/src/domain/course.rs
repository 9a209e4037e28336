//! Course records, create-time validation and the populated read shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::rating::{Rating, RatingValidationError};
use super::tag_list::normalise_tags;
use super::{CourseId, Error, TeacherId, TeacherRef};

/// Message returned when any of the required course fields is absent.
pub const MISSING_COURSE_FIELDS_MESSAGE: &str = "Missing required fields: title, teacherId, price";

/// Validation failures raised while building a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// One or more of `title`, `teacherId` and `price` were absent.
    #[error("Missing required fields: title, teacherId, price")]
    MissingFields {
        /// Absent request fields, in declaration order.
        fields: Vec<&'static str>,
    },
    /// `price` was negative, `NaN` or infinite.
    #[error("price must be a finite number greater than or equal to 0")]
    InvalidPrice,
    /// `rating` was `NaN` or infinite.
    #[error("rating must be a finite number")]
    InvalidRating,
}

impl From<RatingValidationError> for CourseValidationError {
    fn from(_: RatingValidationError) -> Self {
        Self::InvalidRating
    }
}

impl From<CourseValidationError> for Error {
    fn from(err: CourseValidationError) -> Self {
        let details = match &err {
            CourseValidationError::MissingFields { fields } => {
                json!({ "fields": fields, "code": "missing_fields" })
            }
            CourseValidationError::InvalidPrice => {
                json!({ "field": "price", "code": "invalid_price" })
            }
            CourseValidationError::InvalidRating => {
                json!({ "field": "rating", "code": "invalid_rating" })
            }
        };
        Self::invalid_request(err.to_string()).with_details(details)
    }
}

/// Raw input accepted by the create-course use-case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCourseRequest {
    /// Course title; required.
    pub title: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Identifier of the teaching teacher, as supplied by the caller; required.
    pub teacher_id: Option<String>,
    /// Price; required, `0` is a valid free course.
    pub price: Option<f64>,
    /// Rating before clamping.
    pub rating: Option<f64>,
    /// Lesson titles, already split into entries.
    pub lessons: Vec<String>,
    /// Whether the course is featured.
    pub is_top_course: Option<bool>,
}

/// A course request that passed the presence and value checks but whose
/// teacher reference has not yet been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    title: String,
    description: String,
    image: String,
    teacher_id: String,
    price: f64,
    rating: Rating,
    lessons: Vec<String>,
    is_top_course: bool,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl CourseDraft {
    /// Check required fields then field values, applying defaults.
    ///
    /// Presence is tested explicitly so that `price: 0` is accepted.
    pub fn validate(request: NewCourseRequest) -> Result<Self, CourseValidationError> {
        let NewCourseRequest {
            title,
            description,
            image,
            teacher_id,
            price,
            rating,
            lessons,
            is_top_course,
        } = request;

        let title = present(title);
        let teacher_id = present(teacher_id);
        let (Some(title), Some(teacher_id), Some(price)) = (title.clone(), teacher_id.clone(), price)
        else {
            let fields = [
                ("title", title.is_none()),
                ("teacherId", teacher_id.is_none()),
                ("price", price.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();
            return Err(CourseValidationError::MissingFields { fields });
        };

        if !price.is_finite() || price < 0.0 {
            return Err(CourseValidationError::InvalidPrice);
        }

        Ok(Self {
            title,
            description: description.map(|raw| raw.trim().to_owned()).unwrap_or_default(),
            image: image.map(|raw| raw.trim().to_owned()).unwrap_or_default(),
            teacher_id,
            price,
            rating: Rating::from_optional(rating)?,
            lessons: normalise_tags(lessons),
            is_top_course: is_top_course.unwrap_or(false),
        })
    }

    /// Teacher identifier exactly as supplied, trimmed.
    #[must_use]
    pub fn teacher_id(&self) -> &str {
        &self.teacher_id
    }

    /// Turn the draft into a record once the teacher reference is known.
    #[must_use]
    pub fn into_course(self, id: CourseId, teacher: TeacherId, now: DateTime<Utc>) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            price: self.price,
            rating: self.rating,
            teacher,
            lessons: self.lessons,
            is_top_course: self.is_top_course,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persisted course record holding a non-owning teacher reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Stable identifier.
    pub id: CourseId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Description; empty when not supplied.
    pub description: String,
    /// Cover image URL; empty when not supplied.
    pub image: String,
    /// Finite, non-negative price.
    pub price: f64,
    /// Clamped rating.
    pub rating: Rating,
    /// Referenced teacher.
    pub teacher: TeacherId,
    /// Lesson titles in input order.
    pub lessons: Vec<String>,
    /// Featured flag.
    pub is_top_course: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Pair the record with its resolved (or unresolved) teacher.
    #[must_use]
    pub fn into_view(self, teacher: TeacherRef) -> CourseView {
        CourseView {
            id: self.id,
            title: self.title,
            description: self.description,
            image: self.image,
            price: self.price,
            rating: self.rating,
            teacher,
            lessons: self.lessons,
            is_top_course: self.is_top_course,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A course as returned to callers, with its teacher populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: CourseId,
    /// Course title.
    #[schema(example = "Complete Fitness Transformation")]
    pub title: String,
    /// Description.
    pub description: String,
    /// Cover image URL.
    pub image: String,
    /// Price.
    #[schema(example = 49.99)]
    pub price: f64,
    /// Clamped rating.
    #[schema(value_type = f64)]
    pub rating: Rating,
    /// Populated teacher, or the bare id when it no longer resolves.
    pub teacher: TeacherRef,
    /// Lesson titles.
    pub lessons: Vec<String>,
    /// Featured flag.
    pub is_top_course: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
