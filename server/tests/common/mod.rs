// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use kastelen::{NotificationSink, Store};
use kastelen_server::{configure_app_routes, AppConfig, AppState};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub const TEST_SECRET: &str = "server-test-secret";

pub fn test_config() -> AppConfig {
  let vars: HashMap<&str, &str> = HashMap::from([
    ("JWT_SECRET", TEST_SECRET),
    // Cheapest Argon2 cost the library accepts.
    ("HASH_MEMORY_KIB", "8"),
    ("HASH_ITERATIONS", "1"),
  ]);
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).expect("test config")
}

/// Fresh in-memory database, mail disabled.
pub async fn test_state() -> AppState {
  setup_tracing();
  let store = Store::open_in_memory().await.expect("in-memory store");
  AppState::build(store, Arc::new(test_config()), NotificationSink::disabled()).expect("app state")
}

pub fn test_app(
  state: AppState,
) -> App<
  impl actix_web::dev::ServiceFactory<
    actix_web::dev::ServiceRequest,
    Config = (),
    Response = ServiceResponse,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new().app_data(web::Data::new(state)).configure(configure_app_routes)
}

// --- Request helpers ---

pub async fn send<S>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
  S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let response = test::call_service(app, request).await;
  let status = response.status();
  let body = test::read_body(response).await;
  let value = if body.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&body).expect("JSON response body")
  };
  (status, value)
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {token}"))
}

pub fn registration(first_name: &str, email: &str) -> Value {
  json!({
    "firstName": first_name,
    "lastName": "Peeters",
    "email": email,
    "phone": "+32 9 123 45 67",
    "password": "gravensteen",
    "newsletter": "on",
  })
}

pub fn booking_payload(castle_slug: &str, date: &str) -> Value {
  json!({
    "castleName": "Gravensteen",
    "castleSlug": castle_slug,
    "date": date,
    "time": "14:00",
    "visitors": "3",
    "visitType": "guided",
    "language": "nl",
    "name": "Wout Peeters",
    "email": "wout@example.be",
    "phone": "+32 9 123 45 67",
    "message": "Graag een rondleiding in het Nederlands.",
  })
}

/// Registers and logs in; returns `(token, user_id)`.
pub async fn sign_up<S>(app: &S, first_name: &str, email: &str) -> (String, i64)
where
  S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
  let (status, _) = send(
    app,
    test::TestRequest::post()
      .uri("/api/auth/register")
      .set_json(registration(first_name, email))
      .to_request(),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) = send(
    app,
    test::TestRequest::post()
      .uri("/api/auth/login")
      .set_json(json!({ "email": email, "password": "gravensteen" }))
      .to_request(),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let token = body["token"].as_str().expect("token").to_string();
  let user_id = body["user"]["id"].as_i64().expect("user id");
  (token, user_id)
}
