// kastelen_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use kastelen::BookingError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  /// Duplicate registration. Reported as 400 to stay compatible with
  /// existing clients.
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Invalid credentials")]
  InvalidCredentials,

  /// No bearer token on a protected route.
  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  /// Bearer token present but not valid.
  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Store or crypto failure. `message` is the fixed text sent to the client;
  /// `source` is only logged.
  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source: BookingError,
  },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Maps a service failure, using `message` for anything the caller did not
  /// cause.
  pub fn from_booking(err: BookingError, message: &'static str) -> Self {
    match err {
      BookingError::Validation(m) => AppError::Validation(m),
      BookingError::Conflict(m) => AppError::Conflict(m),
      BookingError::InvalidCredentials => AppError::InvalidCredentials,
      BookingError::NotFound(m) => AppError::NotFound(m),
      BookingError::Unauthorized(m) => AppError::Unauthorized(m),
      BookingError::Forbidden(m) => AppError::Forbidden(m),
      internal => AppError::Store {
        message,
        source: internal,
      },
    }
  }

  fn client_message(&self) -> String {
    match self {
      AppError::Validation(m)
      | AppError::Conflict(m)
      | AppError::Unauthorized(m)
      | AppError::Forbidden(m)
      | AppError::NotFound(m) => m.clone(),
      AppError::InvalidCredentials => "Invalid credentials".to_string(),
      AppError::Store { message, .. } => (*message).to_string(),
      AppError::Config(_) | AppError::Internal(_) => "Something went wrong!".to_string(),
    }
  }
}

/// Shorthand for handlers: `service.call().await.or_app_error("Database error")?`.
pub trait BookingResultExt<T> {
  fn or_app_error(self, message: &'static str) -> Result<T>;
}

impl<T> BookingResultExt<T> for std::result::Result<T, BookingError> {
  fn or_app_error(self, message: &'static str) -> Result<T> {
    self.map_err(|e| AppError::from_booking(e, message))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::Conflict(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
      AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Store { .. } | AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "message": self.client_message() }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
