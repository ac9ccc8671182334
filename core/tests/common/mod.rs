// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as TokenTtl;
use kastelen::models::{NewReservation, NewUser};
use kastelen::notify::{Mailer, OutgoingMail};
use kastelen::{
  AuthService, FavoriteService, Mailroom, NotificationSink, PasswordHasher, ReservationService, Store, TokenKeys,
};
use once_cell::sync::Lazy;
use tokio::sync::mpsc;
use tracing::Level;

// --- Tracing (once per test binary) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Mailers ---

/// Forwards every delivered message to the test.
pub struct RecordingMailer {
  tx: mpsc::UnboundedSender<OutgoingMail>,
}

#[async_trait]
impl Mailer for RecordingMailer {
  async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
    self.tx.send(mail.clone()).ok();
    Ok(())
  }
}

/// Always fails, to prove delivery errors never reach the caller.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
  async fn send(&self, _mail: &OutgoingMail) -> anyhow::Result<()> {
    anyhow::bail!("relay refused connection")
  }
}

pub struct Outbox {
  rx: mpsc::UnboundedReceiver<OutgoingMail>,
}

impl Outbox {
  pub async fn next(&mut self) -> OutgoingMail {
    tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
      .await
      .expect("no mail delivered within 2s")
      .expect("mail channel closed")
  }
}

// --- Service harness ---

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

pub struct Harness {
  pub store: Store,
  pub tokens: TokenKeys,
  pub auth: AuthService,
  pub reservations: ReservationService,
  pub favorites: FavoriteService,
  pub mailroom: Mailroom,
}

fn fast_hasher() -> PasswordHasher {
  PasswordHasher::new(8, 1).expect("valid test parameters")
}

pub fn test_tokens() -> TokenKeys {
  TokenKeys::new(TEST_SECRET, TokenTtl::hours(24))
}

pub async fn harness_with_mailer(mailer: Arc<dyn Mailer>) -> Harness {
  setup_tracing();
  let store = Store::open_in_memory().await.expect("in-memory store");
  let (sink, mailroom) = Mailroom::start(mailer, "http://localhost:3000");
  build(store, sink, mailroom)
}

pub async fn harness() -> (Harness, Outbox) {
  let (tx, rx) = mpsc::unbounded_channel();
  let harness = harness_with_mailer(Arc::new(RecordingMailer { tx })).await;
  (harness, Outbox { rx })
}

fn build(store: Store, sink: NotificationSink, mailroom: Mailroom) -> Harness {
  let tokens = test_tokens();
  Harness {
    auth: AuthService::new(store.clone(), fast_hasher(), tokens.clone(), sink.clone()),
    reservations: ReservationService::new(store.clone(), sink),
    favorites: FavoriteService::new(store.clone()),
    tokens,
    store,
    mailroom,
  }
}

// --- Fixtures ---

pub fn new_user(first_name: &str, email: &str) -> NewUser {
  NewUser {
    first_name: first_name.to_string(),
    last_name: "Janssens".to_string(),
    email: email.to_string(),
    phone: Some("+32 470 12 34 56".to_string()),
    password: "kasteel-wachtwoord".to_string(),
    newsletter: false,
  }
}

pub fn booking(castle_slug: &str, date: &str) -> NewReservation {
  NewReservation {
    castle_name: Some(format!("Kasteel {castle_slug}")),
    castle_slug: Some(castle_slug.to_string()),
    date: Some(date.to_string()),
    time: Some("10:30".to_string()),
    visitors: Some(2),
    visit_type: Some("guided".to_string()),
    language: Some("nl".to_string()),
    name: Some("Lien Janssens".to_string()),
    email: Some("lien@example.be".to_string()),
    phone: None,
    message: None,
    user_id: None,
  }
}

pub async fn count(store: &Store, table: &str) -> i64 {
  sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
    .fetch_one(store.pool())
    .await
    .expect("count query")
}
