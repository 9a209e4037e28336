//! PostgreSQL-backed [`TeacherRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TeacherRepository, TeacherRepositoryError};
use crate::domain::{Rating, Teacher, TeacherId, TeacherListQuery, TeacherSort};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTeacherRow, TeacherRow};
use super::pool::{DbPool, PoolError};
use super::schema::teachers;

/// Diesel implementation of the teacher repository port.
#[derive(Clone)]
pub struct DieselTeacherRepository {
    pool: DbPool,
}

impl DieselTeacherRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TeacherRepositoryError {
    map_pool_error(error, TeacherRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> TeacherRepositoryError {
    map_diesel_error(
        error,
        TeacherRepositoryError::query,
        TeacherRepositoryError::connection,
    )
}

fn row_to_teacher(row: TeacherRow) -> Result<Teacher, TeacherRepositoryError> {
    let rating = Rating::new(row.rating)
        .map_err(|_| TeacherRepositoryError::query(format!("stored rating invalid for {}", row.id)))?;
    let total_students = u64::try_from(row.total_students).map_err(|_| {
        TeacherRepositoryError::query(format!("stored student count negative for {}", row.id))
    })?;
    Ok(Teacher::from_parts(
        TeacherId::from_uuid(row.id),
        row.name,
        row.bio,
        row.expertise,
        row.image,
        rating,
        total_students,
        (row.created_at, row.updated_at),
    ))
}

fn rows_to_teachers(rows: Vec<TeacherRow>) -> Result<Vec<Teacher>, TeacherRepositoryError> {
    rows.into_iter().map(row_to_teacher).collect()
}

#[async_trait]
impl TeacherRepository for DieselTeacherRepository {
    async fn insert(&self, teacher: &Teacher) -> Result<(), TeacherRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total_students = i64::try_from(teacher.total_students())
            .map_err(|_| TeacherRepositoryError::query("student count out of range"))?;

        let row = NewTeacherRow {
            id: *teacher.id().as_uuid(),
            name: teacher.name(),
            bio: teacher.bio(),
            expertise: teacher.expertise(),
            image: teacher.image(),
            rating: teacher.rating().value(),
            total_students,
            created_at: teacher.created_at(),
            updated_at: teacher.updated_at(),
        };

        diesel::insert_into(teachers::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, TeacherRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<TeacherRow> = teachers::table
            .find(*id.as_uuid())
            .select(TeacherRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_teacher).transpose()
    }

    async fn find_by_ids(&self, ids: &[TeacherId]) -> Result<Vec<Teacher>, TeacherRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<TeacherRow> = teachers::table
            .filter(teachers::id.eq_any(uuids))
            .select(TeacherRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_teachers(rows)
    }

    async fn list(&self, query: TeacherListQuery) -> Result<Vec<Teacher>, TeacherRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut statement = teachers::table
            .select(TeacherRow::as_select())
            .into_boxed();
        statement = match query.sort {
            TeacherSort::Rating => {
                statement.order((teachers::rating.desc(), teachers::created_at.desc()))
            }
            TeacherSort::Newest => statement.order(teachers::created_at.desc()),
        };
        if let Some(limit) = query.limit {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            statement = statement.limit(limit);
        }

        let rows: Vec<TeacherRow> = statement.load(&mut conn).await.map_err(diesel_error)?;
        rows_to_teachers(rows)
    }

    async fn count(&self) -> Result<u64, TeacherRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let total: i64 = teachers::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
