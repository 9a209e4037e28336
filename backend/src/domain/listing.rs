//! Sort orders, list queries and the contract limits of the "top" views.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Course, Teacher};

/// Number of teachers returned by the top-teachers view.
pub const TOP_TEACHERS_LIMIT: usize = 4;
/// Number of courses returned by the top-courses view.
pub const TOP_COURSES_LIMIT: usize = 3;

/// Error raised when a sort parameter names an unknown order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order `{0}`; expected `rating` or `newest`")]
pub struct UnknownSortError(pub String);

fn parse_sort(raw: &str) -> Result<SortKey, UnknownSortError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rating" => Ok(SortKey::Rating),
        "newest" => Ok(SortKey::Newest),
        _ => Err(UnknownSortError(raw.to_owned())),
    }
}

#[derive(Clone, Copy)]
enum SortKey {
    Rating,
    Newest,
}

/// Order of the teacher list. Defaults to highest rating first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeacherSort {
    /// Highest rating first; ties broken newest first.
    #[default]
    Rating,
    /// Most recently created first.
    Newest,
}

/// Order of the course list. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseSort {
    /// Most recently created first.
    #[default]
    Newest,
    /// Highest rating first; ties broken newest first.
    Rating,
}

impl FromStr for TeacherSort {
    type Err = UnknownSortError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_sort(raw).map(|key| match key {
            SortKey::Rating => Self::Rating,
            SortKey::Newest => Self::Newest,
        })
    }
}

impl FromStr for CourseSort {
    type Err = UnknownSortError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_sort(raw).map(|key| match key {
            SortKey::Rating => Self::Rating,
            SortKey::Newest => Self::Newest,
        })
    }
}

impl fmt::Display for TeacherSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rating => "rating",
            Self::Newest => "newest",
        })
    }
}

impl fmt::Display for CourseSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rating => "rating",
            Self::Newest => "newest",
        })
    }
}

/// Parameters of a teacher list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeacherListQuery {
    /// Requested order.
    pub sort: TeacherSort,
    /// Maximum number of records; `None` returns all of them.
    pub limit: Option<usize>,
}

/// Parameters of a course list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseListQuery {
    /// Only return courses flagged `isTopCourse`.
    pub top_only: bool,
    /// Requested order.
    pub sort: CourseSort,
    /// Maximum number of records; `None` returns all of them.
    pub limit: Option<usize>,
}

impl TeacherListQuery {
    /// Every teacher in the given order.
    #[must_use]
    pub const fn all(sort: TeacherSort) -> Self {
        Self { sort, limit: None }
    }

    /// The top-rated `limit` teachers.
    #[must_use]
    pub const fn top(limit: usize) -> Self {
        Self {
            sort: TeacherSort::Rating,
            limit: Some(limit),
        }
    }

    /// Ordering applied by in-process adapters.
    #[must_use]
    pub fn compare(&self, a: &Teacher, b: &Teacher) -> Ordering {
        let newest = b.created_at().cmp(&a.created_at());
        match self.sort {
            TeacherSort::Rating => a.rating().cmp_desc(b.rating()).then(newest),
            TeacherSort::Newest => newest,
        }
    }
}

impl CourseListQuery {
    /// Every course in the given order.
    #[must_use]
    pub const fn all(sort: CourseSort) -> Self {
        Self {
            top_only: false,
            sort,
            limit: None,
        }
    }

    /// The `limit` highest-rated featured courses.
    #[must_use]
    pub const fn top(limit: usize) -> Self {
        Self {
            top_only: true,
            sort: CourseSort::Rating,
            limit: Some(limit),
        }
    }

    /// Whether `course` passes the query filter.
    #[must_use]
    pub const fn matches(&self, course: &Course) -> bool {
        !self.top_only || course.is_top_course
    }

    /// Ordering applied by in-process adapters.
    #[must_use]
    pub fn compare(&self, a: &Course, b: &Course) -> Ordering {
        let newest = b.created_at.cmp(&a.created_at);
        match self.sort {
            CourseSort::Rating => a.rating.cmp_desc(b.rating).then(newest),
            CourseSort::Newest => newest,
        }
    }
}
