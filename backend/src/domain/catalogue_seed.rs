//! Catalogue seeding from a JSON seed document.
//!
//! Seeding goes through the driving ports so that the same validation and
//! defaults apply as for HTTP writes. It only runs against an empty teacher
//! store; a populated store is left untouched.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::ports::{CourseCatalogue, TeacherCatalogue, TeacherRepository};
use crate::domain::{Error, NewCourseRequest, NewTeacherRequest, Teacher};

/// Seed document: teachers, then courses that point at teachers by index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDocument {
    /// Teachers to create, in order.
    pub teachers: Vec<SeedTeacher>,
    /// Courses to create once every teacher exists.
    #[serde(default)]
    pub courses: Vec<SeedCourse>,
}

/// Teacher entry of a [`SeedDocument`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedTeacher {
    /// Display name.
    pub name: String,
    /// Biography.
    pub bio: Option<String>,
    /// Skill tags.
    #[serde(default)]
    pub expertise: Vec<String>,
    /// Portrait URL.
    pub image: Option<String>,
    /// Rating.
    pub rating: Option<f64>,
    /// Number of students taught.
    pub total_students: Option<i64>,
}

/// Course entry of a [`SeedDocument`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedCourse {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Cover image URL.
    pub image: Option<String>,
    /// Zero-based index into [`SeedDocument::teachers`].
    pub teacher_index: usize,
    /// Price.
    pub price: f64,
    /// Rating.
    pub rating: Option<f64>,
    /// Lesson titles.
    #[serde(default)]
    pub lessons: Vec<String>,
    /// Featured flag.
    pub is_top_course: Option<bool>,
}

impl SeedDocument {
    /// Parse a seed document from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Check that every course points at an existing teacher entry.
    pub fn validate(&self) -> Result<(), CatalogueSeedingError> {
        let teachers = self.teachers.len();
        match self
            .courses
            .iter()
            .find(|course| course.teacher_index >= teachers)
        {
            Some(course) => Err(CatalogueSeedingError::TeacherIndexOutOfRange {
                title: course.title.clone(),
                index: course.teacher_index,
                teachers,
            }),
            None => Ok(()),
        }
    }
}

impl From<SeedTeacher> for NewTeacherRequest {
    fn from(seed: SeedTeacher) -> Self {
        Self {
            name: Some(seed.name),
            bio: seed.bio,
            expertise: seed.expertise,
            image: seed.image,
            rating: seed.rating,
            total_students: seed.total_students,
        }
    }
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The document was applied to an empty store.
    Applied {
        /// Teachers created.
        teachers: usize,
        /// Courses created.
        courses: usize,
    },
    /// Teachers already existed, so nothing was written.
    Skipped {
        /// Teachers found in the store.
        existing_teachers: u64,
    },
}

/// Errors raised while seeding the catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueSeedingError {
    /// A course names a teacher index past the end of the teacher list.
    #[error("course '{title}' references teacher index {index} but only {teachers} teachers are defined")]
    TeacherIndexOutOfRange {
        /// Title of the offending course.
        title: String,
        /// Index found in the document.
        index: usize,
        /// Number of teachers in the document.
        teachers: usize,
    },
    /// A use-case or store call failed.
    #[error("catalogue seeding failed: {0}")]
    Catalogue(#[from] Error),
}

/// Applies a [`SeedDocument`] through the catalogue driving ports.
#[derive(Clone)]
pub struct CatalogueSeeder {
    teacher_store: Arc<dyn TeacherRepository>,
    teachers: Arc<dyn TeacherCatalogue>,
    courses: Arc<dyn CourseCatalogue>,
}

impl CatalogueSeeder {
    /// Create a seeder; `teacher_store` is only read to test for emptiness.
    pub fn new(
        teacher_store: Arc<dyn TeacherRepository>,
        teachers: Arc<dyn TeacherCatalogue>,
        courses: Arc<dyn CourseCatalogue>,
    ) -> Self {
        Self {
            teacher_store,
            teachers,
            courses,
        }
    }

    /// Seed the catalogue unless teachers already exist.
    ///
    /// The document is validated before any write, so an out-of-range
    /// `teacherIndex` leaves the store untouched.
    pub async fn seed(&self, document: SeedDocument) -> Result<SeedOutcome, CatalogueSeedingError> {
        document.validate()?;

        let existing_teachers = self
            .teacher_store
            .count()
            .await
            .map_err(crate::domain::catalogue_service::map_teacher_repository_error)?;
        if existing_teachers > 0 {
            info!(existing_teachers, "catalogue already populated; seeding skipped");
            return Ok(SeedOutcome::Skipped { existing_teachers });
        }

        let SeedDocument { teachers, courses } = document;
        let mut created: Vec<Teacher> = Vec::with_capacity(teachers.len());
        for seed in teachers {
            created.push(self.teachers.create_teacher(seed.into()).await?);
        }

        let course_count = courses.len();
        for seed in courses {
            let teacher = created.get(seed.teacher_index).ok_or_else(|| {
                CatalogueSeedingError::TeacherIndexOutOfRange {
                    title: seed.title.clone(),
                    index: seed.teacher_index,
                    teachers: created.len(),
                }
            })?;
            self.courses
                .create_course(NewCourseRequest {
                    title: Some(seed.title),
                    description: seed.description,
                    image: seed.image,
                    teacher_id: Some(teacher.id().to_string()),
                    price: Some(seed.price),
                    rating: seed.rating,
                    lessons: seed.lessons,
                    is_top_course: seed.is_top_course,
                })
                .await?;
        }

        info!(
            teachers = created.len(),
            courses = course_count,
            "catalogue seed applied"
        );
        Ok(SeedOutcome::Applied {
            teachers: created.len(),
            courses: course_count,
        })
    }
}
