//! Teacher records and their validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::rating::{Rating, RatingValidationError};
use super::tag_list::normalise_tags;
use super::{Error, TeacherId};

/// Validation failures raised while building a [`Teacher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeacherValidationError {
    /// `name` was absent or blank once trimmed.
    #[error("Missing required field: name")]
    MissingName,
    /// `rating` was `NaN` or infinite.
    #[error("rating must be a finite number")]
    InvalidRating,
    /// `totalStudents` was negative.
    #[error("totalStudents must not be negative")]
    NegativeTotalStudents,
}

impl TeacherValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::InvalidRating => "rating",
            Self::NegativeTotalStudents => "totalStudents",
        }
    }

    /// Stable machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_field",
            Self::InvalidRating => "invalid_rating",
            Self::NegativeTotalStudents => "negative_value",
        }
    }
}

impl From<RatingValidationError> for TeacherValidationError {
    fn from(_: RatingValidationError) -> Self {
        Self::InvalidRating
    }
}

impl From<TeacherValidationError> for Error {
    fn from(err: TeacherValidationError) -> Self {
        Self::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

/// Raw input accepted by the create-teacher use-case.
///
/// Every field is optional at this level so that presence is checked by the
/// domain rather than by the deserialiser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTeacherRequest {
    /// Display name; required.
    pub name: Option<String>,
    /// Free-text biography.
    pub bio: Option<String>,
    /// Skill tags, already split into entries.
    pub expertise: Vec<String>,
    /// Portrait URL.
    pub image: Option<String>,
    /// Rating before clamping.
    pub rating: Option<f64>,
    /// Number of students taught.
    pub total_students: Option<i64>,
}

/// Persisted teacher record.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `bio` and `image` are either absent or non-blank.
/// - `rating` lies within `0..=5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    id: TeacherId,
    #[schema(example = "Sarah Johnson")]
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    expertise: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[schema(value_type = f64, example = 4.8)]
    rating: Rating,
    total_students: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl Teacher {
    /// Validate `request` and build a new record stamped with `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use coursehub::domain::{NewTeacherRequest, Teacher, TeacherId};
    ///
    /// let teacher = Teacher::create(
    ///     TeacherId::random(),
    ///     NewTeacherRequest { name: Some(" Ada ".into()), ..Default::default() },
    ///     Utc::now(),
    /// )
    /// .unwrap();
    /// assert_eq!(teacher.name(), "Ada");
    /// assert_eq!(teacher.total_students(), 0);
    /// ```
    pub fn create(
        id: TeacherId,
        request: NewTeacherRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, TeacherValidationError> {
        let NewTeacherRequest {
            name,
            bio,
            expertise,
            image,
            rating,
            total_students,
        } = request;

        let name = non_blank(name).ok_or(TeacherValidationError::MissingName)?;
        let rating = Rating::from_optional(rating)?;
        let total_students = match total_students {
            Some(count) => {
                u64::try_from(count).map_err(|_| TeacherValidationError::NegativeTotalStudents)?
            }
            None => 0,
        };

        Ok(Self {
            id,
            name,
            bio: non_blank(bio),
            expertise: normalise_tags(expertise),
            image: non_blank(image),
            rating,
            total_students,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a record read back from storage without re-running defaults.
    #[expect(clippy::too_many_arguments, reason = "mirrors the stored row")]
    #[must_use]
    pub fn from_parts(
        id: TeacherId,
        name: String,
        bio: Option<String>,
        expertise: Vec<String>,
        image: Option<String>,
        rating: Rating,
        total_students: u64,
        timestamps: (DateTime<Utc>, DateTime<Utc>),
    ) -> Self {
        let (created_at, updated_at) = timestamps;
        Self {
            id,
            name,
            bio,
            expertise,
            image,
            rating,
            total_students,
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> TeacherId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Biography, when provided.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Skill tags in input order.
    #[must_use]
    pub fn expertise(&self) -> &[String] {
        &self.expertise
    }

    /// Portrait URL, when provided.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Clamped rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Number of students taught.
    #[must_use]
    pub const fn total_students(&self) -> u64 {
        self.total_students
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Teacher fields embedded in a populated course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    /// Identifier of the referenced teacher.
    #[serde(rename = "_id")]
    pub id: TeacherId,
    /// Display name.
    pub name: String,
    /// Biography, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Skill tags.
    pub expertise: Vec<String>,
    /// Portrait URL, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Clamped rating.
    #[schema(value_type = f64)]
    pub rating: Rating,
    /// Number of students taught.
    pub total_students: u64,
}

impl From<&Teacher> for TeacherSummary {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name.clone(),
            bio: teacher.bio.clone(),
            expertise: teacher.expertise.clone(),
            image: teacher.image.clone(),
            rating: teacher.rating,
            total_students: teacher.total_students,
        }
    }
}

/// The `teacher` field of a course as it leaves the domain.
///
/// A reference that resolves is populated with the teacher's summary. One
/// that no longer resolves degrades to the bare identifier; consumers must
/// treat it as "teacher name unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TeacherRef {
    /// The referenced teacher exists.
    Populated(TeacherSummary),
    /// The referenced teacher could not be found.
    Unresolved(TeacherId),
}

impl TeacherRef {
    /// Identifier of the referenced teacher in either variant.
    #[must_use]
    pub const fn id(&self) -> TeacherId {
        match self {
            Self::Populated(summary) => summary.id,
            Self::Unresolved(id) => *id,
        }
    }

    /// Teacher name when the reference resolved.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Populated(summary) => Some(summary.name.as_str()),
            Self::Unresolved(_) => None,
        }
    }
}
