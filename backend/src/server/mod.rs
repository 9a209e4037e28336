//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};
pub use state_builders::{CatalogueServices, CatalogueStore};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use coursehub::Trace;
#[cfg(debug_assertions)]
use coursehub::doc::ApiDoc;
use coursehub::inbound::http::api_scope;
use coursehub::inbound::http::health::{HealthState, live, ready};
use coursehub::inbound::http::state::HttpState;
use coursehub::inbound::http::validation;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_http_state;

/// Prometheus middleware serving `/metrics`.
#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("coursehub")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics setup failed: {err}")))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(validation::json_config())
        .app_data(validation::query_config())
        .wrap(Trace)
        .service(api_scope().wrap(session))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind and start the HTTP server over `services`.
///
/// Readiness is marked once the socket is bound. Process signals are left to
/// [`shutdown_on_signal`] so the probes flip before connections drain.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering
/// metrics fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    services: &CatalogueServices,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config, services));
    let server_health_state = health_state.clone();
    let ServerConfig {
        session,
        bind_addr,
        ..
    } = config;
    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(
            server_health_state.clone(),
            http_state.clone(),
            session.middleware(),
        );

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Flip both probes to failing, then stop the server gracefully.
pub async fn drain(health_state: &HealthState, handle: &ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Wait for SIGINT or SIGTERM and drain the server.
pub async fn shutdown_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    if let Err(err) = wait_for_signal().await {
        warn!(error = %err, "signal listener failed; shutdown must be external");
        return;
    }
    info!("shutdown requested; draining");
    drain(&health_state, &handle).await;
}
