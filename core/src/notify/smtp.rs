// kastelen/src/notify/smtp.rs

//! SMTP delivery through lettre.

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Mailer, OutgoingMail};

/// Port that expects TLS from the first byte. Anything else negotiates STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpSettings {
  pub host: String,
  pub port: u16,
  pub username: String,
  pub password: String,
  pub from: String,
}

impl std::fmt::Debug for SmtpSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SmtpSettings")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &"[REDACTED]")
      .field("from", &self.from)
      .finish()
  }
}

#[derive(Clone)]
pub struct SmtpMailer {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  from: Mailbox,
}

impl SmtpMailer {
  pub fn new(settings: SmtpSettings) -> anyhow::Result<Self> {
    let builder = if settings.port == IMPLICIT_TLS_PORT {
      AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
    }
    .with_context(|| format!("invalid SMTP relay host '{}'", settings.host))?;

    let transport = builder
      .port(settings.port)
      .credentials(Credentials::new(settings.username, settings.password))
      .build();
    let from = settings
      .from
      .parse::<Mailbox>()
      .with_context(|| format!("invalid sender address '{}'", settings.from))?;

    Ok(Self { transport, from })
  }
}

#[async_trait]
impl Mailer for SmtpMailer {
  async fn send(&self, mail: &OutgoingMail) -> anyhow::Result<()> {
    let to = mail
      .to
      .parse::<Mailbox>()
      .with_context(|| format!("invalid recipient address '{}'", mail.to))?;
    let message = Message::builder()
      .from(self.from.clone())
      .to(to)
      .subject(mail.subject.clone())
      .header(ContentType::TEXT_HTML)
      .body(mail.html_body.clone())
      .context("failed to build message")?;

    self.transport.send(message).await.context("SMTP delivery failed")?;
    Ok(())
  }
}
