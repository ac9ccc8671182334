// kastelen_server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use kastelen::models::NewUser;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, BookingResultExt};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

#[instrument(
    name = "handler::register",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
  let user_id = app_state
    .auth
    .register(req_payload.into_inner())
    .await
    .or_app_error("Error creating user")?;

  info!(user_id, "Registration complete.");
  Ok(HttpResponse::Created().json(json!({
      "message": "User created successfully",
      "userId": user_id,
  })))
}

#[instrument(
    name = "handler::login",
    skip(app_state, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let outcome = app_state
    .auth
    .login(&req_payload.email, &req_payload.password)
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(outcome))
}
