// kastelen/src/notify/console.rs
use async_trait::async_trait;
use tracing::info;

use super::{Mailer, OutgoingMail};

/// Writes mail to the log instead of sending it. For local development.
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
  from: String,
}

impl ConsoleMailer {
  pub fn new(from: impl Into<String>) -> Self {
    Self { from: from.into() }
  }
}

#[async_trait]
impl Mailer for ConsoleMailer {
  async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
    let body_preview = mail.html_body.chars().take(80).collect::<String>() + "...";
    info!(
      from = %self.from,
      to = %mail.to,
      subject = %mail.subject,
      body_preview = %body_preview,
      "Console mail."
    );
    Ok(())
  }
}
