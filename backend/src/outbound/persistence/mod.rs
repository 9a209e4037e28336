//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain records.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module, and every database failure is mapped to the port's error
//! type.
//!
//! ```ignore
//! use coursehub::outbound::persistence::{DbPool, DieselTeacherRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coursehub")).await?;
//! let teachers = DieselTeacherRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_teacher_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_teacher_repository::DieselTeacherRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
