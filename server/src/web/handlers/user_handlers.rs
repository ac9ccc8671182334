// kastelen_server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use kastelen::models::ProfileUpdate;
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, BookingResultExt};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[instrument(name = "handler::get_profile", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let profile = app_state
    .auth
    .profile(auth_user.user_id)
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(profile))
}

#[instrument(
    name = "handler::update_profile",
    skip(app_state, auth_user, req_payload),
    fields(user_id = auth_user.user_id)
)]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
  app_state
    .auth
    .update_profile(auth_user.user_id, req_payload.into_inner())
    .await
    .or_app_error("Error updating profile")?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Profile updated successfully" })))
}
