// kastelen_server/src/main.rs

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use kastelen::notify::{ConsoleMailer, SmtpMailer};
use kastelen::{Mailer, Mailroom, NotificationSink, Store, StoreOptions};
use kastelen_server::{configure_app_routes, AppConfig, AppState};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

/// How long queued mail may take to go out once the server has stopped.
const MAIL_DRAIN_GRACE: Duration = Duration::from_secs(10);

fn start_mailroom(config: &AppConfig) -> anyhow::Result<(NotificationSink, Option<Mailroom>)> {
  let mailer: Arc<dyn Mailer> = if let Some(smtp) = config.smtp.clone() {
    tracing::info!(host = %smtp.host, port = smtp.port, "Sending mail through SMTP.");
    Arc::new(SmtpMailer::new(smtp).context("building SMTP transport")?)
  } else if config.mail_console {
    tracing::info!("Mail is written to the log instead of being sent.");
    Arc::new(ConsoleMailer::new(config.mail_from.clone()))
  } else {
    tracing::info!("No mail transport configured; notifications are disabled.");
    return Ok((NotificationSink::disabled(), None));
  };
  let (sink, mailroom) = Mailroom::start(mailer, config.app_base_url.clone());
  Ok((sink, Some(mailroom)))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting kastelen booking server...");

  let app_config = Arc::new(AppConfig::from_env().context("loading configuration")?);

  let store = Store::open(StoreOptions {
    url: app_config.database_url.clone(),
    max_connections: app_config.db_max_connections,
  })
  .await
  .context("opening the database")?;
  store.migrate().await.context("creating the schema")?;
  tracing::info!(url = %app_config.database_url, "Database ready.");

  let (sink, mailroom) = start_mailroom(&app_config)?;
  let app_state = AppState::build(store.clone(), app_config.clone(), sink)?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  let served = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("binding {server_address}"))?
  .run()
  .await;

  // The app factory held the last notification sinks; with the server gone
  // the mailroom can drain.
  store.close().await;
  if let Some(mailroom) = mailroom {
    mailroom.shutdown(MAIL_DRAIN_GRACE).await;
  }
  tracing::info!("Server stopped.");

  served.context("running the HTTP server")
}
