// kastelen/src/store/mod.rs

//! Connection handling and schema setup for the relational store.
//!
//! A `Store` is opened once at process start, handed to every service, and
//! closed at shutdown. Services clone it freely; clones share one pool.

mod schema;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use crate::error::BookingResult;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://kastelenbelgie.db";

#[derive(Debug, Clone)]
pub struct StoreOptions {
  pub url: String,
  pub max_connections: u32,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: 5,
    }
  }
}

impl StoreOptions {
  pub fn new(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      ..Self::default()
    }
  }

  /// A private, process-local database. Used by tests and throwaway runs.
  pub fn in_memory() -> Self {
    Self::new("sqlite::memory:")
  }

  fn is_in_memory(&self) -> bool {
    self.url.contains(":memory:") || self.url.contains("mode=memory")
  }
}

#[derive(Debug, Clone)]
pub struct Store {
  pool: SqlitePool,
}

impl Store {
  #[instrument(name = "store::open", skip(options), fields(url = %options.url), err(Display))]
  pub async fn open(options: StoreOptions) -> BookingResult<Self> {
    let connect = SqliteConnectOptions::from_str(&options.url)?
      .create_if_missing(true)
      .foreign_keys(true);

    // Every connection to an in-memory database sees its own empty database,
    // so those are pinned to a single connection that is never recycled.
    let pool_options = if options.is_in_memory() {
      SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
    } else {
      SqlitePoolOptions::new().max_connections(options.max_connections.max(1))
    };

    let pool = pool_options.connect_with(connect).await?;
    info!("Store opened.");
    Ok(Self { pool })
  }

  /// Opens a fresh in-memory store with the schema applied.
  pub async fn open_in_memory() -> BookingResult<Self> {
    let store = Self::open(StoreOptions::in_memory()).await?;
    store.migrate().await?;
    Ok(store)
  }

  #[instrument(name = "store::migrate", skip(self), err(Display))]
  pub async fn migrate(&self) -> BookingResult<()> {
    for statement in schema::STATEMENTS {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    debug!(statements = schema::STATEMENTS.len(), "Schema applied.");
    Ok(())
  }

  pub async fn ping(&self) -> BookingResult<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  pub async fn close(&self) {
    self.pool.close().await;
    info!("Store closed.");
  }
}
