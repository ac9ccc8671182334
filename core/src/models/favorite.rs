// kastelen/src/models/favorite.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
  pub id: i64,
  pub user_id: UserId,
  pub castle_slug: String,
  pub castle_name: String,
  pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
  pub castle_slug: String,
  pub castle_name: String,
}
