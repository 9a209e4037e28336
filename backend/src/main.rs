//! Service entry-point: loads settings, prepares the catalogue store, seeds
//! it when asked and serves the REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coursehub::catalogue_seed::{CatalogueSeedSettings, seed_catalogue_on_startup};
use coursehub::inbound::http::health::HealthState;
use coursehub::inbound::http::session_config::{BuildMode, session_settings_from_env};
use coursehub::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, CatalogueStore, ServerConfig, create_server, shutdown_on_signal};

async fn open_store(settings: &AppSettings, env: &DefaultEnv) -> std::io::Result<CatalogueStore> {
    let Some(database_url) = settings.database_url(env) else {
        warn!("no database configured; using the in-memory catalogue store");
        return Ok(CatalogueStore::default());
    };

    run_pending_migrations(&database_url)
        .await
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
    info!("connected to PostgreSQL catalogue store");
    Ok(CatalogueStore::Postgres(pool))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let settings = AppSettings::load_from_env()?;
    let session = session_settings_from_env(&env, BuildMode::current())
        .map_err(|err| std::io::Error::other(format!("session configuration: {err}")))?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let store = open_store(&settings, &env).await?;
    let services = store.services();

    let seed_settings = CatalogueSeedSettings::load_from_env()?;
    seed_catalogue_on_startup(&seed_settings, &services.seeder)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let config = ServerConfig::new(session, settings.bind_addr()?)
        .with_login_for_writes(settings.require_login_for_writes)
        .with_operator(settings.admin_email(), settings.admin_password());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config, &services)?;
    actix_web::rt::spawn(shutdown_on_signal(health_state, server.handle()));
    info!(require_login_for_writes = settings.require_login_for_writes, "server started");
    server.await
}
