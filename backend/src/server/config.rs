//! Application settings and the HTTP server configuration object.

use std::ffi::OsString;
use std::net::SocketAddr;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use coursehub::inbound::http::session_config::SessionSettings;
use coursehub::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_EMAIL: &str = "admin@coach.io";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Service settings loaded from `COURSEHUB_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSEHUB")]
pub struct AppSettings {
    /// Listen address.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound of the connection pool.
    pub db_max_connections: Option<u32>,
    /// Require a logged-in session for catalogue writes.
    #[ortho_config(default = false)]
    pub require_login_for_writes: bool,
    /// Operator login email.
    pub admin_email: Option<String>,
    /// Operator login password.
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// Command-line arguments are not consulted.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when a value cannot be parsed.
    pub fn load_from_env() -> std::io::Result<Self> {
        Self::load_from_iter([OsString::from("coursehub")])
            .map_err(|err| std::io::Error::other(format!("invalid settings: {err}")))
    }

    /// Parsed listen address.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the address is malformed.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{raw}': {err}"),
            )
        })
    }

    /// Database URL from settings, falling back to plain `DATABASE_URL`.
    pub fn database_url<E: Env>(&self, env: &E) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool size, defaulting to the persistence default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Operator account email.
    pub fn admin_email(&self) -> &str {
        self.admin_email.as_deref().unwrap_or(DEFAULT_ADMIN_EMAIL)
    }

    /// Operator account password.
    pub fn admin_password(&self) -> &str {
        self.admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }
}

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) require_login_for_writes: bool,
    pub(crate) operator: (String, String),
}

impl ServerConfig {
    /// Construct a configuration with open writes and the default operator
    /// account.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            require_login_for_writes: false,
            operator: (
                DEFAULT_ADMIN_EMAIL.to_owned(),
                DEFAULT_ADMIN_PASSWORD.to_owned(),
            ),
        }
    }

    /// Gate catalogue writes behind a login.
    #[must_use]
    pub fn with_login_for_writes(mut self, required: bool) -> Self {
        self.require_login_for_writes = required;
        self
    }

    /// Replace the operator account.
    #[must_use]
    pub fn with_operator(mut self, email: &str, password: &str) -> Self {
        self.operator = (email.to_owned(), password.to_owned());
        self
    }
}
