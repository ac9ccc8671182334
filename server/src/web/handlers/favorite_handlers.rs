// kastelen_server/src/web/handlers/favorite_handlers.rs

use actix_web::{web, HttpResponse};
use kastelen::models::NewFavorite;
use serde_json::json;
use tracing::instrument;

use crate::errors::{AppError, BookingResultExt};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[instrument(
    name = "handler::add_favorite",
    skip(app_state, auth_user, req_payload),
    fields(user_id = auth_user.user_id, castle_slug = %req_payload.castle_slug)
)]
pub async fn add_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<NewFavorite>,
) -> Result<HttpResponse, AppError> {
  app_state
    .favorites
    .add(auth_user.user_id, &req_payload.castle_slug, &req_payload.castle_name)
    .await
    .or_app_error("Error adding favorite")?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Added to favorites" })))
}

#[instrument(name = "handler::remove_favorite", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn remove_favorite_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  app_state
    .favorites
    .remove(auth_user.user_id, &path)
    .await
    .or_app_error("Error removing favorite")?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Removed from favorites" })))
}

#[instrument(name = "handler::list_favorites", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_favorites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let favorites = app_state
    .favorites
    .list(auth_user.user_id)
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(favorites))
}
