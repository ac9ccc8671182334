// kastelen_server/src/web/routes.rs

use actix_web::{
  error::{JsonPayloadError, PathError},
  web, HttpRequest, HttpResponse,
};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{admin_handlers, auth_handlers, favorite_handlers, reservation_handlers, user_handlers};

/// Reports the process as up, and says whether the store answers.
async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match app_state.store.ping().await {
    Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
    Err(e) => {
      tracing::error!(error = %e, "Health check could not reach the store.");
      HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "degraded" }))
    }
  }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  debug!(error = %err, "Rejected request body.");
  AppError::Validation("Invalid request body".to_string()).into()
}

// The only numeric path segments are reservation ids.
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  debug!(error = %err, "Rejected path parameter.");
  AppError::NotFound("Reservation not found".to_string()).into()
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(path_error_handler)
}

/// JSON body settings shared by every route.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .app_data(json_config())
      .app_data(path_config())
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler)),
      )
      .service(
        web::resource("/user/profile")
          .route(web::get().to(user_handlers::get_profile_handler))
          .route(web::put().to(user_handlers::update_profile_handler)),
      )
      .service(
        web::scope("/reservations")
          .route("", web::post().to(reservation_handlers::create_reservation_handler))
          // Registered before `/{id}` so "user" is never parsed as an id.
          .route("/user", web::get().to(reservation_handlers::list_user_reservations_handler))
          .route("/{id}", web::get().to(reservation_handlers::get_reservation_handler))
          .route("/{id}/cancel", web::post().to(reservation_handlers::cancel_reservation_handler)),
      )
      .service(
        web::scope("/admin/reservations")
          .route("", web::get().to(admin_handlers::list_all_reservations_handler))
          .route("/{id}/status", web::put().to(admin_handlers::update_status_handler)),
      )
      .service(
        web::scope("/favorites")
          .route("", web::get().to(favorite_handlers::list_favorites_handler))
          .route("", web::post().to(favorite_handlers::add_favorite_handler))
          .route("/{castle_slug}", web::delete().to(favorite_handlers::remove_favorite_handler)),
      ),
  );
}
