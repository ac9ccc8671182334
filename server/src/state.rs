// kastelen_server/src/state.rs
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use chrono::Duration;
use kastelen::{AuthService, FavoriteService, NotificationSink, PasswordHasher, ReservationService, Store, TokenKeys};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Store,
  pub tokens: TokenKeys,
  pub auth: AuthService,
  pub reservations: ReservationService,
  pub favorites: FavoriteService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the services over an opened store. Notifications go to `sink`.
  pub fn build(store: Store, config: Arc<AppConfig>, sink: NotificationSink) -> Result<Self> {
    let hasher = match (config.hash_memory_kib, config.hash_iterations) {
      (None, None) => PasswordHasher::default(),
      (memory, iterations) => PasswordHasher::new(memory.unwrap_or(19 * 1024), iterations.unwrap_or(2))
        .map_err(|e| AppError::Config(e.to_string()))?,
    };
    let tokens = TokenKeys::new(config.jwt_secret.as_bytes(), Duration::hours(config.token_ttl_hours));

    Ok(Self {
      auth: AuthService::new(store.clone(), hasher, tokens.clone(), sink.clone()),
      reservations: ReservationService::new(store.clone(), sink),
      favorites: FavoriteService::new(store.clone()),
      tokens,
      store,
      config,
    })
  }
}
