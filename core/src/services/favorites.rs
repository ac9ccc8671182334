// kastelen/src/services/favorites.rs

use tracing::{debug, instrument};

use crate::error::BookingResult;
use crate::models::{Favorite, UserId};
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct FavoriteService {
  store: Store,
}

impl FavoriteService {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// Saving the same castle twice keeps the first entry.
  #[instrument(name = "favorites::add", skip(self, castle_name), err(Display))]
  pub async fn add(&self, user_id: UserId, castle_slug: &str, castle_name: &str) -> BookingResult<()> {
    let result = sqlx::query("INSERT OR IGNORE INTO favorites (user_id, castle_slug, castle_name) VALUES (?, ?, ?)")
      .bind(user_id)
      .bind(castle_slug)
      .bind(castle_name)
      .execute(self.store.pool())
      .await?;
    debug!(inserted = result.rows_affected() > 0, "Favorite added.");
    Ok(())
  }

  /// Succeeds whether or not the favorite existed.
  #[instrument(name = "favorites::remove", skip(self), err(Display))]
  pub async fn remove(&self, user_id: UserId, castle_slug: &str) -> BookingResult<()> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND castle_slug = ?")
      .bind(user_id)
      .bind(castle_slug)
      .execute(self.store.pool())
      .await?;
    debug!(removed = result.rows_affected(), "Favorite removed.");
    Ok(())
  }

  #[instrument(name = "favorites::list", skip(self), err(Display))]
  pub async fn list(&self, user_id: UserId) -> BookingResult<Vec<Favorite>> {
    let favorites = sqlx::query_as::<_, Favorite>(
      "SELECT * FROM favorites WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(self.store.pool())
    .await?;
    Ok(favorites)
  }
}
