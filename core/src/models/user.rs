// kastelen/src/models/user.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: Option<String>,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub newsletter: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  #[serde(default)]
  pub phone: Option<String>,
  pub password: String,
  #[serde(default, deserialize_with = "lenient::flag")]
  pub newsletter: bool,
}

/// What a successful login hands back next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
  pub id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
}

impl From<&User> for PublicUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      first_name: user.first_name.clone(),
      last_name: user.last_name.clone(),
      email: user.email.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: UserId,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: Option<String>,
  pub newsletter: bool,
}

/// Editable subset of a profile. Email and password cannot change here.
///
/// Names are optional on the wire so that a missing value reaches the store and
/// fails its NOT NULL constraint, the same as every other write.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
  #[serde(default)]
  pub first_name: Option<String>,
  #[serde(default)]
  pub last_name: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default, deserialize_with = "lenient::flag")]
  pub newsletter: bool,
}
