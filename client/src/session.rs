// kastelen_client/src/session.rs

//! Reading the stored session token on the client.
//!
//! Nothing here checks the signature. The decoded id only decorates the
//! booking payload; the server derives ownership from the token itself.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPayload {
  user_id: i64,
}

/// The `userId` claim of a JWT, or `None` when the token cannot be read.
pub fn decode_user_id(token: &str) -> Option<i64> {
  let segment = token.split('.').nth(1)?;
  let bytes = match URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')) {
    Ok(bytes) => bytes,
    Err(e) => {
      debug!(error = %e, "Session token payload is not base64.");
      return None;
    }
  };
  match serde_json::from_slice::<TokenPayload>(&bytes) {
    Ok(payload) => Some(payload.user_id),
    Err(e) => {
      debug!(error = %e, "Session token payload has no usable userId.");
      None
    }
  }
}
