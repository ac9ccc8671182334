// kastelen_client/src/api.rs

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ClientError {
  /// The request never produced a readable response.
  #[error("Transport error: {0}")]
  Transport(String),

  /// The server answered with a non-success status.
  #[error("Server responded {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
  Server { status: u16, message: Option<String> },
}

impl From<reqwest::Error> for ClientError {
  fn from(err: reqwest::Error) -> Self {
    ClientError::Transport(err.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
  pub message: String,
  pub reservation_id: i64,
}

/// The part of the account profile used to pre-fill the form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  #[serde(default)]
  pub phone: Option<String>,
}

#[async_trait]
pub trait ReservationApi: Send + Sync {
  /// Posts the form payload. `token` is sent as a bearer credential so the
  /// booking is attached to the account.
  async fn submit_reservation(&self, payload: &Map<String, Value>, token: Option<&str>) -> Result<SubmitReceipt, ClientError>;

  async fn fetch_profile(&self, token: &str) -> Result<Profile, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

/// A success status whose body does not match the expected shape is still a
/// server answer, not a transport failure.
fn decode_success<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ClientError> {
  serde_json::from_slice(body).map_err(|e| {
    debug!(status, error = %e, "Success response body could not be decoded.");
    ClientError::Server { status, message: None }
  })
}

/// [`ReservationApi`] over HTTP against the booking server.
#[derive(Debug, Clone)]
pub struct HttpReservationApi {
  client: reqwest::Client,
  base_url: String,
}

impl HttpReservationApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(reqwest::Client::new(), base_url)
  }

  pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn rejection(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
      Ok(body) => body.message,
      Err(e) => {
        debug!(error = %e, "Error response carried no JSON message.");
        None
      }
    };
    ClientError::Server {
      status: status.as_u16(),
      message,
    }
  }
}

#[async_trait]
impl ReservationApi for HttpReservationApi {
  #[instrument(name = "client::submit_reservation", skip_all, err(Display))]
  async fn submit_reservation(&self, payload: &Map<String, Value>, token: Option<&str>) -> Result<SubmitReceipt, ClientError> {
    let mut request = self.client.post(self.url("/api/reservations")).json(payload);
    if let Some(token) = token {
      request = request.bearer_auth(token);
    }
    let response = request.send().await?;
    if !response.status().is_success() {
      return Err(Self::rejection(response).await);
    }
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    decode_success(status, &body)
  }

  #[instrument(name = "client::fetch_profile", skip_all, err(Display))]
  async fn fetch_profile(&self, token: &str) -> Result<Profile, ClientError> {
    let response = self
      .client
      .get(self.url("/api/user/profile"))
      .bearer_auth(token)
      .send()
      .await?;
    if !response.status().is_success() {
      return Err(Self::rejection(response).await);
    }
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    decode_success(status, &body)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_url_trailing_slash_is_ignored() {
    let api = HttpReservationApi::new("https://kastelenbelgie.be/");
    assert_eq!(api.url("/api/reservations"), "https://kastelenbelgie.be/api/reservations");
  }

  #[test]
  fn server_errors_display_their_message() {
    let err = ClientError::Server {
      status: 500,
      message: Some("Error creating reservation".to_string()),
    };
    assert_eq!(err.to_string(), "Server responded 500: Error creating reservation");
  }

  #[test]
  fn receipts_and_profiles_read_camel_case() {
    let receipt: SubmitReceipt =
      serde_json::from_str(r#"{"message":"Reservation created successfully","reservationId":9}"#).unwrap();
    assert_eq!(receipt.reservation_id, 9);

    let profile: Profile = serde_json::from_str(
      r#"{"id":1,"firstName":"Lien","lastName":"Janssens","email":"lien@example.be","phone":null,"newsletter":true}"#,
    )
    .unwrap();
    assert_eq!(profile.first_name, "Lien");
    assert_eq!(profile.phone, None);
  }

  #[test]
  fn undecodable_success_body_is_a_server_error() {
    let result = decode_success::<SubmitReceipt>(200, b"<html>ok</html>");
    assert!(matches!(result, Err(ClientError::Server { status: 200, message: None })));

    let result = decode_success::<SubmitReceipt>(201, br#"{"message":"Reservation created successfully"}"#);
    assert!(matches!(result, Err(ClientError::Server { status: 201, message: None })));

    let receipt = decode_success::<SubmitReceipt>(201, br#"{"message":"ok","reservationId":4}"#).unwrap();
    assert_eq!(receipt.reservation_id, 4);
  }
}
