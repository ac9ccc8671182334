// kastelen/src/token.rs

//! Signed, time-limited session tokens.
//!
//! Tokens are HS256 JWTs carrying the user id and email. There is no
//! server-side session table: a token that verifies is the whole authority,
//! which also means tokens cannot be revoked before they expire.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{BookingError, BookingResult};
use crate::models::UserId;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
  pub user_id: UserId,
  pub email: String,
  /// Issued-at, seconds since the epoch.
  pub iat: i64,
  /// Expiry, seconds since the epoch.
  pub exp: i64,
}

#[derive(Clone)]
pub struct TokenKeys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  validation: Validation,
  ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TokenKeys")
      .field("secret", &"[REDACTED]")
      .field("ttl", &self.ttl)
      .finish()
  }
}

impl TokenKeys {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  pub fn issue(&self, user_id: UserId, email: &str) -> BookingResult<String> {
    self.issue_at(user_id, email, Utc::now())
  }

  #[instrument(name = "token::issue", skip(self, email), err(Display))]
  pub fn issue_at(&self, user_id: UserId, email: &str, issued_at: DateTime<Utc>) -> BookingResult<String> {
    let claims = SessionClaims {
      user_id,
      email: email.to_string(),
      iat: issued_at.timestamp(),
      exp: (issued_at + self.ttl).timestamp(),
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
    debug!(exp = claims.exp, "Session token issued.");
    Ok(token)
  }

  /// Checks signature and expiry. Every failure is reported the same way so a
  /// caller cannot tell a forged token from an expired one.
  pub fn verify(&self, token: &str) -> BookingResult<SessionClaims> {
    decode::<SessionClaims>(token, &self.decoding, &self.validation)
      .map(|data| data.claims)
      .map_err(|e| {
        debug!(error = %e, "Session token rejected.");
        BookingError::Forbidden("Invalid or expired token".to_string())
      })
  }
}
