//! Cookie session configuration.
//!
//! Reads the session toggles from the environment, loads the cookie key and
//! builds the private cookie middleware shared by the server and the
//! behaviour tests. Release builds reject missing or invalid toggles; debug
//! builds fall back to defaults and log a warning.

pub mod fingerprint;
mod parsing;

use std::path::PathBuf;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time};
use mockable::Env;
use zeroize::Zeroize;

use self::parsing::{BoolToggle, lenient_or, read_bool_toggle, read_same_site};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of a session cookie in hours.
pub const SESSION_TTL_HOURS: i64 = 2;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/coursehub/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

/// How strictly the session toggles are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults are tolerated with a warning.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Pick the mode matching the current compilation profile.
    ///
    /// ```
    /// use coursehub::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::current(), expected);
    /// ```
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Key encrypting the private session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// `SameSite` policy of the cookie.
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Settings with a freshly generated key; intended for tests.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    /// Build the private cookie middleware named [`SESSION_COOKIE_NAME`].
    #[must_use]
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        let ttl = time::Duration::hours(SESSION_TTL_HOURS);
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(PersistentSession::default().session_ttl(ttl))
            .build()
    }

    /// Short fingerprint of the key for startup logs.
    #[must_use]
    pub fn key_fingerprint(&self) -> String {
        fingerprint::key_fingerprint(&self.key)
    }
}

/// Invalid or missing session configuration.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Resolve [`SessionSettings`] from `env`.
///
/// # Errors
/// Returns [`SessionConfigError`] when a toggle is missing or invalid in
/// release mode, or when the key file cannot be used.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_bool_toggle(env, mode, BoolToggle::new(COOKIE_SECURE_ENV, true))?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = read_bool_toggle(env, mode, BoolToggle::new(ALLOW_EPHEMERAL_ENV, false))?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(env, mode)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn load_key<E: Env>(env: &E, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let error = SessionConfigError::KeyRead { path, source };
            return lenient_or(mode.is_debug(), error, Key::generate);
        }
    };

    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        let error = SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        };
        return lenient_or(mode.is_debug(), error, Key::generate);
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
