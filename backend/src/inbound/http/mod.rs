//! HTTP inbound adapter exposing the catalogue REST endpoints.

pub mod catalogue_dto;
pub mod courses;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
pub mod teachers;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Path prefix of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// The `/api/v1` scope with every handler registered.
///
/// Callers wrap the scope in their session middleware.
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .configure(users::configure)
        .configure(teachers::configure)
        .configure(courses::configure)
}
