// kastelen_server/src/web/auth.rs

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use kastelen::models::UserId;
use kastelen::SessionClaims;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// The second space-separated part of `Authorization`, normally the token
/// after `Bearer`.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(AUTHORIZATION)?
    .to_str()
    .ok()?
    .split(' ')
    .nth(1)
    .filter(|token| !token.is_empty())
}

fn verify(req: &HttpRequest, token: &str) -> Result<SessionClaims, AppError> {
  let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
    warn!("AppState is not registered; cannot verify session tokens.");
    AppError::Internal("application state missing".to_string())
  })?;
  state
    .tokens
    .verify(token)
    .map_err(|e| AppError::from_booking(e, "Invalid or expired token"))
}

/// A request carrying a valid session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
  pub email: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(token) = bearer_token(req) else {
      debug!("Request without bearer token on a protected route.");
      return ready(Err(AppError::Unauthorized("Access token required".to_string())));
    };
    ready(verify(req, token).map(|claims| AuthenticatedUser {
      user_id: claims.user_id,
      email: claims.email,
    }))
  }
}

/// Session for routes open to anonymous visitors. A missing or rejected token
/// yields `None` rather than an error.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
  pub fn user_id(&self) -> Option<UserId> {
    self.0.as_ref().map(|user| user.user_id)
  }
}

impl FromRequest for OptionalUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let user = bearer_token(req).and_then(|token| match verify(req, token) {
      Ok(claims) => Some(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
      }),
      Err(e) => {
        debug!(error = %e, "Ignoring unusable session token; treating request as anonymous.");
        None
      }
    });
    ready(Ok(OptionalUser(user)))
  }
}
