// kastelen/src/services/auth.rs

//! Account registration, login and profile maintenance, plus the password
//! hashing they rely on.

use argon2::password_hash::{
  rand_core::OsRng, // For generating random salts
  PasswordHash,
  PasswordHasher as _,
  PasswordVerifier as _,
  SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{BookingError, BookingResult};
use crate::models::{NewUser, ProfileUpdate, PublicUser, User, UserId, UserProfile};
use crate::notify::{Notification, NotificationSink};
use crate::store::Store;
use crate::token::TokenKeys;

/// Argon2id with tunable cost. The defaults are the argon2 crate's
/// recommended parameters.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
  params: Params,
}

impl PasswordHasher {
  pub fn new(memory_kib: u32, iterations: u32) -> BookingResult<Self> {
    let params = Params::new(memory_kib, iterations, 1, None)
      .map_err(|e| BookingError::Hashing(format!("invalid Argon2 parameters: {e}")))?;
    Ok(Self { params })
  }

  fn argon2(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }

  /// Hashes a plain-text password with a fresh random salt.
  #[instrument(name = "auth::hash_password", skip_all, err(Display))]
  pub fn hash(&self, password: &str) -> BookingResult<String> {
    if password.is_empty() {
      return Err(BookingError::Validation("Password cannot be empty.".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    match self.argon2().hash_password(password.as_bytes(), &salt) {
      Ok(hash) => {
        debug!("Password hashed successfully.");
        Ok(hash.to_string())
      }
      Err(argon_err) => {
        error!(error = %argon_err, "Argon2 password hashing failed.");
        Err(BookingError::Hashing(argon_err.to_string()))
      }
    }
  }

  /// Returns `Ok(false)` on a mismatch. Errors mean the stored hash itself is
  /// unusable.
  #[instrument(name = "auth::verify_password", skip_all, err(Display), fields(hash_len = stored_hash.len()))]
  pub fn verify(&self, stored_hash: &str, provided_password: &str) -> BookingResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|parse_err| {
      error!(error = %parse_err, "Failed to parse stored password hash string.");
      BookingError::Hashing(format!("invalid stored password hash: {parse_err}"))
    })?;

    // Cost parameters are read from the stored hash, so hashes created under
    // older settings keep verifying.
    match self.argon2().verify_password(provided_password.as_bytes(), &parsed_hash) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => {
        debug!("Password verification failed: Passwords do not match.");
        Ok(false)
      }
      Err(other) => {
        error!(error = %other, "Argon2 password verification process encountered an error.");
        Err(BookingError::Hashing(other.to_string()))
      }
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
  pub token: String,
  pub user: PublicUser,
}

#[derive(Debug, Clone)]
pub struct AuthService {
  store: Store,
  hasher: PasswordHasher,
  tokens: TokenKeys,
  notifications: NotificationSink,
}

impl AuthService {
  pub fn new(store: Store, hasher: PasswordHasher, tokens: TokenKeys, notifications: NotificationSink) -> Self {
    Self {
      store,
      hasher,
      tokens,
      notifications,
    }
  }

  pub fn tokens(&self) -> &TokenKeys {
    &self.tokens
  }

  #[instrument(name = "auth::register", skip(self, new_user), fields(email = %new_user.email), err(Display))]
  pub async fn register(&self, new_user: NewUser) -> BookingResult<UserId> {
    let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
      .bind(&new_user.email)
      .fetch_one(self.store.pool())
      .await?;
    if taken > 0 {
      warn!("Registration attempted with an email that is already registered.");
      return Err(BookingError::Conflict("Email already registered".to_string()));
    }

    // Argon2 is deliberately slow; keep it off the async workers.
    let hasher = self.hasher.clone();
    let password = new_user.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
      .await
      .map_err(|join_err| BookingError::Hashing(format!("hashing task failed: {join_err}")))??;

    let inserted = sqlx::query(
      "INSERT INTO users (first_name, last_name, email, phone, password_hash, newsletter) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.email)
    .bind(&new_user.phone)
    .bind(&password_hash)
    .bind(new_user.newsletter)
    .execute(self.store.pool())
    .await;

    let user_id = match inserted {
      Ok(result) => result.last_insert_rowid(),
      // Lost a race with a concurrent registration for the same address.
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
        warn!("Concurrent registration for the same email.");
        return Err(BookingError::Conflict("Email already registered".to_string()));
      }
      Err(e) => return Err(e.into()),
    };

    info!(user_id, "User registered.");
    self.notifications.dispatch(Notification::Welcome {
      to: new_user.email,
      first_name: new_user.first_name,
    });
    Ok(user_id)
  }

  /// Unknown email and wrong password produce the same error.
  #[instrument(name = "auth::login", skip(self, password), err(Display))]
  pub async fn login(&self, email: &str, password: &str) -> BookingResult<LoginOutcome> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
      .bind(email)
      .fetch_optional(self.store.pool())
      .await?;

    let Some(user) = user else {
      debug!("Login for unknown email.");
      return Err(BookingError::InvalidCredentials);
    };

    let hasher = self.hasher.clone();
    let stored_hash = user.password_hash.clone();
    let provided = password.to_string();
    let matches = tokio::task::spawn_blocking(move || hasher.verify(&stored_hash, &provided))
      .await
      .map_err(|join_err| BookingError::Hashing(format!("verification task failed: {join_err}")))??;
    if !matches {
      return Err(BookingError::InvalidCredentials);
    }

    let token = self.tokens.issue(user.id, &user.email)?;
    info!(user_id = user.id, "User logged in.");
    Ok(LoginOutcome {
      token,
      user: PublicUser::from(&user),
    })
  }

  #[instrument(name = "auth::profile", skip(self), err(Display))]
  pub async fn profile(&self, user_id: UserId) -> BookingResult<UserProfile> {
    sqlx::query_as::<_, UserProfile>("SELECT id, first_name, last_name, email, phone, newsletter FROM users WHERE id = ?")
      .bind(user_id)
      .fetch_optional(self.store.pool())
      .await?
      .ok_or_else(|| BookingError::NotFound("User not found".to_string()))
  }

  #[instrument(name = "auth::update_profile", skip(self, update), err(Display))]
  pub async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> BookingResult<()> {
    let result = sqlx::query(
      "UPDATE users SET first_name = ?, last_name = ?, phone = ?, newsletter = ?, updated_at = CURRENT_TIMESTAMP \
       WHERE id = ?",
    )
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.phone)
    .bind(update.newsletter)
    .bind(user_id)
    .execute(self.store.pool())
    .await?;
    debug!(rows = result.rows_affected(), "Profile updated.");
    Ok(())
  }
}
