//! Real-server harness shared by the catalogue behaviour suites.
//!
//! Each world owns a current-thread Tokio runtime plus a `LocalSet`, because
//! Actix spawns the server with `spawn_local`. The server starts lazily in a
//! `Given` step so scenarios can choose the write-access policy, and
//! `WorldFixture` stops it on drop even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use coursehub::Trace;
use coursehub::domain::ports::{
    FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, LoginService,
};
use coursehub::domain::{CourseService, OperatorLoginService, TRACE_ID_HEADER, TeacherService, UserId};
use coursehub::inbound::http::api_scope;
use coursehub::inbound::http::health::{HealthState, live, ready};
use coursehub::inbound::http::session_config::SessionSettings;
use coursehub::inbound::http::state::{HttpState, WriteAccess};
use coursehub::inbound::http::validation;
use coursehub::outbound::memory::InMemoryCatalogueStore;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub struct CatalogueWorld {
    runtime: Runtime,
    local: LocalSet,
    server: Option<(String, ServerHandle)>,
    pub last_status: Option<u16>,
    pub last_body: Option<Value>,
    pub last_trace_id: Option<String>,
    pub session_cookie: Option<String>,
    pub teacher_id: Option<String>,
}

pub type SharedWorld = Rc<RefCell<CatalogueWorld>>;

pub struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        if let Some((_, server)) = ctx.server.clone() {
            ctx.local.block_on(&ctx.runtime, async move {
                server.stop(true).await;
            });
        }
    }
}

#[fixture]
pub fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    WorldFixture {
        world: Rc::new(RefCell::new(CatalogueWorld {
            runtime,
            local: LocalSet::new(),
            server: None,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            session_cookie: None,
            teacher_id: None,
        })),
    }
}

fn http_state(write_access: WriteAccess) -> HttpState {
    let store = Arc::new(InMemoryCatalogueStore::new());
    let teachers = Arc::new(TeacherService::new(store.clone(), Arc::new(DefaultClock)));
    let courses = Arc::new(CourseService::new(
        store.clone(),
        store,
        Arc::new(DefaultClock),
    ));
    let operator_id = UserId::new(FIXTURE_LOGIN_USER_ID).expect("fixture user id");
    let login: Arc<dyn LoginService> = Arc::new(OperatorLoginService::new(
        FIXTURE_LOGIN_EMAIL,
        FIXTURE_LOGIN_PASSWORD,
        operator_id,
    ));
    HttpState::new(teachers, courses, login).with_write_access(write_access)
}

async fn spawn_server(write_access: WriteAccess) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let state = web::Data::new(http_state(write_access));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let session = SessionSettings::ephemeral();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(health.clone())
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .wrap(Trace)
            .service(api_scope().wrap(session.middleware()))
            .service(ready)
            .service(live)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// Start the server once per scenario.
pub fn start_server(world: &SharedWorld, write_access: WriteAccess) {
    let started = {
        let ctx = world.borrow();
        ctx.local
            .block_on(&ctx.runtime, spawn_server(write_access))
            .expect("server start")
    };
    world.borrow_mut().server = Some(started);
}

/// A JSON request issued against the running server.
pub struct RequestSpec<'a> {
    pub method: Method,
    pub path: &'a str,
    pub payload: Option<Value>,
    pub with_session: bool,
}

/// Send `spec` and record status, trace id, body and any new session cookie.
pub fn send(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        with_session,
    } = spec;
    let cookie = if with_session {
        world.borrow().session_cookie.clone()
    } else {
        None
    };

    let (status, trace_id, set_cookie, body) = {
        let ctx = world.borrow();
        let (base_url, _) = ctx.server.clone().expect("server started");
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, format!("{base_url}{path}"));
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await,
                None => request.send().await,
            }
            .expect("request sent");
            let header_value = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned)
            };
            let trace_id = header_value(TRACE_ID_HEADER);
            let set_cookie = header_value("set-cookie")
                .and_then(|raw| raw.split(';').next().map(str::to_owned));
            let status = response.status().as_u16();
            let bytes = response.body().await.expect("response body");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (status, trace_id, set_cookie, body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
    if set_cookie.is_some() {
        ctx.session_cookie = set_cookie;
    }
}

pub fn last_status(world: &SharedWorld) -> u16 {
    world.borrow().last_status.expect("a response was recorded")
}

pub fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last_body.clone().expect("a body was recorded")
}
