// kastelen_server/src/lib.rs

//! HTTP surface of the kastelenbelgie.be booking backend.

pub mod config;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
pub use crate::web::configure_app_routes;
