//! Steps shared by the catalogue behaviour suites.

use actix_web::http::Method;
use coursehub::domain::ports::{FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD};
use coursehub::inbound::http::state::WriteAccess;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};

use crate::catalogue_world::{
    RequestSpec, SharedWorld, WorldFixture, last_body, last_status, send, start_server,
};

/// Log in as the operator, keeping the issued session cookie.
pub fn log_in(world: &SharedWorld, password: &str) {
    send(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/login",
            payload: Some(json!({
                "email": FIXTURE_LOGIN_EMAIL,
                "password": password,
            })),
            with_session: false,
        },
    );
}

#[given("an open catalogue server")]
fn an_open_catalogue_server(world: &WorldFixture) {
    start_server(&world.world(), WriteAccess::Open);
}

#[given("a catalogue server requiring login")]
fn a_catalogue_server_requiring_login(world: &WorldFixture) {
    start_server(&world.world(), WriteAccess::RequireSession);
}

#[given("the operator has logged in")]
fn the_operator_has_logged_in(world: &WorldFixture) {
    let world = world.world();
    log_in(&world, FIXTURE_LOGIN_PASSWORD);
    assert_eq!(last_status(&world), 200);
    assert!(world.borrow().session_cookie.is_some());
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(last_status(&world.world()), status);
}

#[then("the error trace id matches the response header")]
fn the_error_trace_id_matches_the_response_header(world: &WorldFixture) {
    let world = world.world();
    let body = last_body(&world);
    let header = world
        .borrow()
        .last_trace_id
        .clone()
        .expect("trace id header");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));
}
