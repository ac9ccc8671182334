// kastelen_server/src/web/handlers/admin_handlers.rs

//! Back-office endpoints. Any valid session may call them; there is no
//! administrator role.

use actix_web::{web, HttpResponse};
use kastelen::models::{ReservationId, StatusUpdate};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, BookingResultExt};
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[instrument(name = "handler::admin_list_reservations", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_all_reservations_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let reservations = app_state
    .reservations
    .admin_list()
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(reservations))
}

#[instrument(
    name = "handler::admin_update_status",
    skip(app_state, auth_user, req_payload),
    fields(user_id = auth_user.user_id, status = %req_payload.status)
)]
pub async fn update_status_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<ReservationId>,
  req_payload: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
  let reservation_id = path.into_inner();
  app_state
    .reservations
    .admin_update_status(reservation_id, &req_payload.status)
    .await
    .or_app_error("Error updating reservation")?;

  info!(reservation_id, "Status change applied by back office.");
  Ok(HttpResponse::Ok().json(json!({ "message": "Reservation status updated successfully" })))
}
