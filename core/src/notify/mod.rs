// kastelen/src/notify/mod.rs

//! Best-effort email notifications.
//!
//! Services hand a [`Notification`] to a [`NotificationSink`] and move on. A
//! single background worker started by [`Mailroom::start`] renders and delivers
//! queued messages. Delivery failures are logged and dropped: there is no
//! retry and no feedback to the request that caused the message.

mod console;
mod smtp;

pub use console::ConsoleMailer;
pub use smtp::{SmtpMailer, SmtpSettings};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::ReservationId;

/// A rendered message, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
  pub to: String,
  pub subject: String,
  pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
  Welcome {
    to: String,
    first_name: String,
  },
  ReservationReceived {
    to: String,
    name: String,
    reservation_id: ReservationId,
    castle_name: String,
    date: String,
    time: Option<String>,
    visitors: i64,
    visit_type: String,
    language: String,
  },
}

impl Notification {
  pub fn recipient(&self) -> &str {
    match self {
      Notification::Welcome { to, .. } | Notification::ReservationReceived { to, .. } => to,
    }
  }

  /// Renders the Dutch-language templates used by the site.
  pub fn render(&self, base_url: &str) -> OutgoingMail {
    match self {
      Notification::Welcome { to, first_name } => OutgoingMail {
        to: to.clone(),
        subject: "Welkom bij kastelenbelgie.be!".to_string(),
        html_body: format!(
          "<h2>Welkom {name}!</h2>\n\
           <p>Bedankt voor het aanmaken van uw account bij kastelenbelgie.be.</p>\n\
           <p>U kunt nu kastelen reserveren en uw bezoeken beheren via uw dashboard.</p>\n\
           <p><a href=\"{base}/dashboard.html\">Ga naar uw dashboard</a></p>",
          name = escape_html(first_name),
          base = base_url.trim_end_matches('/'),
        ),
      },
      Notification::ReservationReceived {
        to,
        name,
        reservation_id,
        castle_name,
        date,
        time,
        visitors,
        visit_type,
        language,
      } => {
        let time = time.as_deref().filter(|t| !t.trim().is_empty()).unwrap_or("Hele dag");
        OutgoingMail {
          to: to.clone(),
          subject: format!("Reservering bevestiging - {castle_name}"),
          html_body: format!(
            "<h2>Reservering ontvangen</h2>\n\
             <p>Beste {name},</p>\n\
             <p>We hebben uw reservering voor <strong>{castle}</strong> ontvangen.</p>\n\
             <h3>Details:</h3>\n\
             <ul>\n\
             <li><strong>Datum:</strong> {date}</li>\n\
             <li><strong>Tijd:</strong> {time}</li>\n\
             <li><strong>Aantal bezoekers:</strong> {visitors}</li>\n\
             <li><strong>Type bezoek:</strong> {visit_type}</li>\n\
             <li><strong>Taal:</strong> {language}</li>\n\
             </ul>\n\
             <p>We nemen binnen 24 uur contact met u op voor bevestiging.</p>\n\
             <p>Reserveringsnummer: #{reservation_id}</p>",
            name = escape_html(name),
            castle = escape_html(castle_name),
            date = escape_html(date),
            time = escape_html(time),
            visit_type = escape_html(visit_type),
            language = escape_html(language),
          ),
        }
      }
    }
  }
}

fn escape_html(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// Handle the services use to enqueue notifications. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct NotificationSink {
  tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl NotificationSink {
  /// A sink with no outbound channel: every message is dropped.
  pub fn disabled() -> Self {
    Self { tx: None }
  }

  pub fn is_enabled(&self) -> bool {
    self.tx.is_some()
  }

  /// Enqueues without waiting. Never fails from the caller's point of view.
  pub fn dispatch(&self, notification: Notification) {
    let Some(tx) = &self.tx else {
      debug!(to = %notification.recipient(), "No mail channel configured, notification dropped.");
      return;
    };
    if let Err(e) = tx.send(notification) {
      warn!(to = %e.0.recipient(), "Mail worker has stopped, notification dropped.");
    }
  }
}

/// Owns the delivery worker.
pub struct Mailroom {
  worker: JoinHandle<()>,
}

impl Mailroom {
  /// Spawns the delivery worker on the current tokio runtime.
  pub fn start(mailer: Arc<dyn Mailer>, base_url: impl Into<String>) -> (NotificationSink, Mailroom) {
    let (tx, rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(deliver_all(rx, mailer, base_url.into()));
    info!("Mail worker started.");
    (NotificationSink { tx: Some(tx) }, Mailroom { worker })
  }

  /// Waits for the queue to drain. The queue only closes once every sink has
  /// been dropped, so the wait is bounded by `grace`.
  pub async fn shutdown(self, grace: Duration) {
    match tokio::time::timeout(grace, self.worker).await {
      Ok(Ok(())) => info!("Mail worker drained and stopped."),
      Ok(Err(join_err)) => warn!(error = %join_err, "Mail worker ended abnormally."),
      Err(_) => warn!(grace_ms = grace.as_millis() as u64, "Mail worker still busy at shutdown, abandoning queue."),
    }
  }
}

async fn deliver_all(mut rx: mpsc::UnboundedReceiver<Notification>, mailer: Arc<dyn Mailer>, base_url: String) {
  while let Some(notification) = rx.recv().await {
    let mail = notification.render(&base_url);
    match mailer.send(&mail).await {
      Ok(()) => info!(to = %mail.to, subject = %mail.subject, "Notification delivered."),
      Err(e) => warn!(to = %mail.to, subject = %mail.subject, error = %e, "Notification delivery failed."),
    }
  }
}
