//! Request validation shared by the catalogue handlers.

use std::str::FromStr;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UnknownSortError};

/// Maximum accepted JSON body size in bytes.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_owned(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body too large".to_owned()
        }
        JsonPayloadError::Deserialize(inner) => format!("Invalid JSON body: {inner}"),
        _ => "Invalid JSON body".to_owned(),
    };
    Error::invalid_request(message)
        .with_details(json!({"code": "invalid_json"}))
        .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid query string: {err}"))
        .with_details(json!({"code": "invalid_query"}))
        .into()
}

/// JSON extractor configuration that reports body errors in the error
/// envelope as `400 Bad Request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error)
}

/// Query extractor configuration matching [`json_config`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Parse an identifier from a path segment. Anything that does not parse is
/// reported as the entity being absent.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, not_found: &str) -> Result<T, Error> {
    raw.parse().map_err(|_| Error::not_found(not_found))
}

/// Optional `?sort=` query parameter of the list endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// `rating` or `newest`.
    #[param(example = "rating")]
    pub sort: Option<String>,
}

impl SortQuery {
    /// Resolve the requested order, falling back to `S::default()`.
    pub(crate) fn resolve<S>(&self) -> Result<S, Error>
    where
        S: FromStr<Err = UnknownSortError> + Default,
    {
        match self.sort.as_deref() {
            None => Ok(S::default()),
            Some(raw) => raw.parse().map_err(|err: UnknownSortError| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({"field": "sort", "code": "unknown_sort", "value": raw}))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseSort, ErrorCode, TeacherId, TeacherSort};
    use rstest::rstest;

    #[rstest]
    #[case(None, TeacherSort::Rating)]
    #[case(Some("newest"), TeacherSort::Newest)]
    fn sort_query_defaults_and_parses(
        #[case] raw: Option<&str>,
        #[case] expected: TeacherSort,
    ) {
        let query = SortQuery {
            sort: raw.map(str::to_owned),
        };
        assert_eq!(query.resolve::<TeacherSort>(), Ok(expected));
    }

    #[rstest]
    fn unknown_sort_is_invalid_request() {
        let query = SortQuery {
            sort: Some("price".to_owned()),
        };
        let err = query.resolve::<CourseSort>().expect_err("unknown sort");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d.get("value")), Some(&json!("price")));
    }

    #[rstest]
    #[case("not-an-id")]
    #[case("64b7f9e2c1a4d5e6f7a8b9c0")]
    fn malformed_path_ids_are_not_found(#[case] raw: &str) {
        let err = parse_path_id::<TeacherId>(raw, "Teacher not found").expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Teacher not found");
    }
}
