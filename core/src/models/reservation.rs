// kastelen/src/models/reservation.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;
use super::user::UserId;

pub type ReservationId = i64;

/// Status written on creation.
pub const STATUS_PENDING: &str = "pending";
/// Status an administrator sets once the visit is arranged.
pub const STATUS_CONFIRMED: &str = "confirmed";
/// Status written by a user-scoped cancel.
pub const STATUS_CANCELLED: &str = "cancelled";

/// A stored reservation.
///
/// `status` is free text: the named constants above are the values the
/// application itself writes, but administrators may set any string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
  pub id: ReservationId,
  pub user_id: Option<UserId>,
  pub castle_name: String,
  pub castle_slug: String,
  pub date: String,
  pub time: Option<String>,
  pub visitors: i64,
  pub visit_type: String,
  pub language: String,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub message: Option<String>,
  pub status: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl Reservation {
  pub fn is_cancelled(&self) -> bool {
    self.status == STATUS_CANCELLED
  }
}

/// Admin listing row: the reservation plus its owner's name, when it has one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservation {
  #[serde(flatten)]
  #[sqlx(flatten)]
  pub reservation: Reservation,
  pub first_name: Option<String>,
  pub last_name: Option<String>,
}

/// Booking form submission.
///
/// Every column is optional here: the store's NOT NULL constraints are the only
/// server-side gate on what a booking must contain. `user_id` is whatever the
/// browser decoded from its own token and is never written as the owner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
  #[serde(default)]
  pub castle_name: Option<String>,
  #[serde(default)]
  pub castle_slug: Option<String>,
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub time: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub visitors: Option<i64>,
  #[serde(default)]
  pub visit_type: Option<String>,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default, deserialize_with = "lenient::optional_i64")]
  pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
  pub status: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn form_payload_accepts_string_numbers_and_blank_optionals() {
    let payload: NewReservation = serde_json::from_value(serde_json::json!({
      "castleName": "Kasteel van Gaasbeek",
      "castleSlug": "kasteel-van-gaasbeek",
      "date": "2026-11-02",
      "time": "",
      "visitors": "3",
      "visitType": "guided",
      "language": "nl",
      "name": "Els Peeters",
      "email": "els@example.be",
      "userId": "7"
    }))
    .unwrap();

    assert_eq!(payload.visitors, Some(3));
    assert_eq!(payload.user_id, Some(7));
    assert_eq!(payload.time.as_deref(), Some(""));
    assert!(payload.message.is_none());
  }
}
