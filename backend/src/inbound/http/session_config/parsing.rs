//! Environment toggle parsing shared by the session settings.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean environment toggle and its debug-mode fallback.
pub(super) struct BoolToggle {
    name: &'static str,
    fallback: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }
}

/// Return `fallback()` with a warning when `lenient`, otherwise `error`.
pub(super) fn lenient_or<T>(
    lenient: bool,
    error: SessionConfigError,
    fallback: impl FnOnce() -> T,
) -> Result<T, SessionConfigError> {
    if lenient {
        warn!(%error, "session configuration fallback in use (dev only)");
        Ok(fallback())
    } else {
        Err(error)
    }
}

pub(super) fn read_bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(toggle.name) else {
        let error = SessionConfigError::MissingEnv { name: toggle.name };
        return lenient_or(mode.is_debug(), error, || toggle.fallback);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => {
            let error = SessionConfigError::InvalidEnv {
                name: toggle.name,
                value,
                expected: BOOL_EXPECTED,
            };
            lenient_or(mode.is_debug(), error, || toggle.fallback)
        }
    }
}

pub(super) fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let Some(value) = env.string(SAMESITE_ENV) else {
        let error = SessionConfigError::MissingEnv { name: SAMESITE_ENV };
        return lenient_or(mode.is_debug(), error, || SameSite::Lax);
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => lenient_or(
            mode.is_debug(),
            SessionConfigError::InsecureSameSiteNone,
            || SameSite::None,
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            };
            lenient_or(mode.is_debug(), error, || SameSite::Lax)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
