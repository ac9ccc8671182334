// kastelen_server/src/web/handlers/reservation_handlers.rs

use actix_web::{web, HttpResponse};
use kastelen::models::{NewReservation, ReservationId};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::{AppError, BookingResultExt};
use crate::state::AppState;
use crate::web::auth::{AuthenticatedUser, OptionalUser};

/// Open to anonymous visitors. The owner is taken from the session token, if
/// one verifies, never from the body.
#[instrument(
    name = "handler::create_reservation",
    skip(app_state, session, req_payload),
    fields(owner = ?session.user_id(), castle_slug = ?req_payload.castle_slug)
)]
pub async fn create_reservation_handler(
  app_state: web::Data<AppState>,
  session: OptionalUser,
  req_payload: web::Json<NewReservation>,
) -> Result<HttpResponse, AppError> {
  let reservation_id = app_state
    .reservations
    .create(req_payload.into_inner(), session.user_id())
    .await
    .or_app_error("Error creating reservation")?;

  info!(reservation_id, "Reservation accepted.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Reservation created successfully",
      "reservationId": reservation_id,
  })))
}

#[instrument(name = "handler::list_user_reservations", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_user_reservations_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let reservations = app_state
    .reservations
    .list_for_user(auth_user.user_id)
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(reservations))
}

#[instrument(name = "handler::get_reservation", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_reservation_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<ReservationId>,
) -> Result<HttpResponse, AppError> {
  let reservation = app_state
    .reservations
    .get(path.into_inner(), auth_user.user_id)
    .await
    .or_app_error("Database error")?;
  Ok(HttpResponse::Ok().json(reservation))
}

#[instrument(name = "handler::cancel_reservation", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn cancel_reservation_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<ReservationId>,
) -> Result<HttpResponse, AppError> {
  app_state
    .reservations
    .cancel(path.into_inner(), auth_user.user_id)
    .await
    .or_app_error("Error cancelling reservation")?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Reservation cancelled successfully" })))
}
