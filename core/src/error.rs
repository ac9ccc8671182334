// kastelen/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Store error: {0}")]
  Persistence(#[from] sqlx::Error),

  #[error("Password hashing failed: {0}")]
  Hashing(String),

  #[error("Session token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),
}

impl BookingError {
  /// True for failures caused by the store or a supporting primitive rather
  /// than by the caller's input. These are reported with a generic message.
  pub fn is_internal(&self) -> bool {
    matches!(
      self,
      BookingError::Persistence(_) | BookingError::Hashing(_) | BookingError::Token(_)
    )
  }
}

pub type BookingResult<T, E = BookingError> = std::result::Result<T, E>;
