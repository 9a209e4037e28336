//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;

use crate::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};

/// Production session middleware with a fresh key and `Secure` off.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings::ephemeral().middleware()
}

/// The `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// App with the full `/api/v1` scope over `state`, wrapped in the trace and
/// test session middleware.
pub fn api_test_app(
    state: crate::inbound::http::state::HttpState,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    use crate::inbound::http::{api_scope, validation};
    use actix_web::{App, web};

    App::new()
        .app_data(web::Data::new(state))
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .wrap(crate::Trace)
        .service(api_scope().wrap(test_session_middleware()))
}
