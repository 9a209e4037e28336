//! PostgreSQL-backed [`CourseRepository`].
//!
//! Referential integrity is enforced by the `courses.teacher_id` foreign key;
//! a violation surfaces as [`CourseRepositoryError::MissingTeacher`], which
//! closes the gap between the service's existence check and the insert.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseListQuery, CourseSort, Rating, TeacherId};

use super::diesel_error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel implementation of the course repository port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, CourseRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let rating = Rating::new(row.rating)
        .map_err(|_| CourseRepositoryError::query(format!("stored rating invalid for {}", row.id)))?;
    Ok(Course {
        id: CourseId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        image: row.image,
        price: row.price,
        rating,
        teacher: TeacherId::from_uuid(row.teacher_id),
        lessons: row.lessons,
        is_top_course: row.is_top_course,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewCourseRow {
            id: *course.id.as_uuid(),
            title: &course.title,
            description: &course.description,
            image: &course.image,
            price: course.price,
            rating: course.rating.value(),
            teacher_id: *course.teacher.as_uuid(),
            lessons: &course.lessons,
            is_top_course: course.is_top_course,
            created_at: course.created_at,
            updated_at: course.updated_at,
        };

        match diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_foreign_key_violation(&err) => Err(
                CourseRepositoryError::missing_teacher(course.teacher.to_string()),
            ),
            Err(err) => Err(diesel_error(err)),
        }
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(*id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn list(&self, query: CourseListQuery) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut statement = courses::table.select(CourseRow::as_select()).into_boxed();
        if query.top_only {
            statement = statement.filter(courses::is_top_course.eq(true));
        }
        statement = match query.sort {
            CourseSort::Newest => statement.order(courses::created_at.desc()),
            CourseSort::Rating => {
                statement.order((courses::rating.desc(), courses::created_at.desc()))
            }
        };
        if let Some(limit) = query.limit {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            statement = statement.limit(limit);
        }

        let rows: Vec<CourseRow> = statement.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_course).collect()
    }

    async fn count(&self) -> Result<u64, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = courses::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
