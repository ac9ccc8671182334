// kastelen_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use kastelen::notify::SmtpSettings;
use kastelen::store::DEFAULT_DATABASE_URL;
use kastelen::token::DEFAULT_TOKEN_TTL_HOURS;
use std::env;

/// Development fallback. A warning is logged whenever it is in use.
pub const FALLBACK_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Ten years. Longer lifetimes are rejected as configuration errors.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub app_base_url: String,

  pub jwt_secret: String,
  pub token_ttl_hours: i64,

  // Argon2 cost. `None` keeps the library defaults.
  pub hash_memory_kib: Option<u32>,
  pub hash_iterations: Option<u32>,

  // Outbound mail. SMTP is used when a username is configured; otherwise mail
  // is logged when `mail_console` is set, and dropped when it is not.
  pub smtp: Option<SmtpSettings>,
  pub mail_console: bool,
  pub mail_from: String,
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url)
      .field("db_max_connections", &self.db_max_connections)
      .field("app_base_url", &self.app_base_url)
      .field("jwt_secret", &"[REDACTED]")
      .field("token_ttl_hours", &self.token_ttl_hours)
      .field("hash_memory_kib", &self.hash_memory_kib)
      .field("hash_iterations", &self.hash_iterations)
      .field("smtp", &self.smtp)
      .field("mail_console", &self.mail_console)
      .field("mail_from", &self.mail_from)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the configuration from any variable source. `lookup` returns
  /// `None` for unset variables.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());
    let parse_env = |var_name: &str| -> Result<Option<u64>> {
      get_env(var_name)
        .map(|raw| {
          raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e)))
        })
        .transpose()
    };
    let parse_u32 = |var_name: &str| -> Result<Option<u32>> {
      parse_env(var_name)?
        .map(|raw| u32::try_from(raw).map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))))
        .transpose()
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = match parse_env("SERVER_PORT")? {
      Some(port) => u16::try_from(port).map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      None => 3000,
    };
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    let db_max_connections = parse_u32("DB_MAX_CONNECTIONS")?.unwrap_or(5);
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|| format!("http://localhost:{}", server_port));

    let jwt_secret = match get_env("JWT_SECRET") {
      Some(secret) => secret,
      None => {
        tracing::warn!("JWT_SECRET is not set; using the insecure development secret.");
        FALLBACK_JWT_SECRET.to_string()
      }
    };
    let token_ttl_hours = match parse_env("TOKEN_TTL_HOURS")? {
      Some(hours) => i64::try_from(hours)
        .ok()
        .filter(|h| (1..=MAX_TOKEN_TTL_HOURS).contains(h))
        .ok_or_else(|| {
          AppError::Config(format!("TOKEN_TTL_HOURS must be between 1 and {}", MAX_TOKEN_TTL_HOURS))
        })?,
      None => DEFAULT_TOKEN_TTL_HOURS,
    };

    let hash_memory_kib = parse_u32("HASH_MEMORY_KIB")?;
    let hash_iterations = parse_u32("HASH_ITERATIONS")?;

    let smtp_user = get_env("SMTP_USER");
    let mail_from = get_env("MAIL_FROM")
      .or_else(|| smtp_user.clone())
      .unwrap_or_else(|| "noreply@kastelenbelgie.be".to_string());
    let smtp = match smtp_user {
      Some(username) => {
        let port = match parse_env("SMTP_PORT")? {
          Some(port) => u16::try_from(port).map_err(|e| AppError::Config(format!("Invalid SMTP_PORT: {}", e)))?,
          None => 587,
        };
        Some(SmtpSettings {
          host: get_env("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
          port,
          username,
          password: get_env("SMTP_PASS").unwrap_or_default(),
          from: mail_from.clone(),
        })
      }
      None => None,
    };
    let mail_console = match get_env("MAIL_CONSOLE") {
      Some(raw) => raw
        .trim()
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid MAIL_CONSOLE value: {}", e)))?,
      None => false,
    };

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      app_base_url,
      jwt_secret,
      token_ttl_hours,
      hash_memory_kib,
      hash_iterations,
      smtp,
      mail_console,
      mail_from,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
