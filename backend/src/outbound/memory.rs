//! Process-local catalogue store used when no database is configured.
//!
//! One [`InMemoryCatalogueStore`] implements both repository ports so that the
//! course insert can check teacher existence under the same lock that guards
//! the write.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, TeacherRepository, TeacherRepositoryError,
};
use crate::domain::{Course, CourseId, CourseListQuery, Teacher, TeacherId, TeacherListQuery};

#[derive(Default)]
struct Records {
    teachers: HashMap<TeacherId, Teacher>,
    courses: HashMap<CourseId, Course>,
}

/// In-memory teacher and course repository.
///
/// Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryCatalogueStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryCatalogueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

#[async_trait]
impl TeacherRepository for InMemoryCatalogueStore {
    async fn insert(&self, teacher: &Teacher) -> Result<(), TeacherRepositoryError> {
        let mut records = self.records.write().await;
        if records.teachers.contains_key(&teacher.id()) {
            return Err(TeacherRepositoryError::query(format!(
                "duplicate teacher id {}",
                teacher.id()
            )));
        }
        records.teachers.insert(teacher.id(), teacher.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherRepositoryError> {
        Ok(self.records.read().await.teachers.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[TeacherId]) -> Result<Vec<Teacher>, TeacherRepositoryError> {
        let records = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.teachers.get(id).cloned())
            .collect())
    }

    async fn list(&self, query: TeacherListQuery) -> Result<Vec<Teacher>, TeacherRepositoryError> {
        let mut teachers: Vec<Teacher> =
            self.records.read().await.teachers.values().cloned().collect();
        teachers.sort_by(|a, b| query.compare(a, b));
        Ok(truncate(teachers, query.limit))
    }

    async fn count(&self) -> Result<u64, TeacherRepositoryError> {
        Ok(self.records.read().await.teachers.len() as u64)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCatalogueStore {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut records = self.records.write().await;
        if !records.teachers.contains_key(&course.teacher) {
            return Err(CourseRepositoryError::missing_teacher(
                course.teacher.to_string(),
            ));
        }
        if records.courses.contains_key(&course.id) {
            return Err(CourseRepositoryError::query(format!(
                "duplicate course id {}",
                course.id
            )));
        }
        records.courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.records.read().await.courses.get(id).cloned())
    }

    async fn list(&self, query: CourseListQuery) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut courses: Vec<Course> = self
            .records
            .read()
            .await
            .courses
            .values()
            .filter(|course| query.matches(course))
            .cloned()
            .collect();
        courses.sort_by(|a, b| query.compare(a, b));
        Ok(truncate(courses, query.limit))
    }

    async fn count(&self) -> Result<u64, CourseRepositoryError> {
        Ok(self.records.read().await.courses.len() as u64)
    }
}
