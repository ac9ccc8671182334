// kastelen/src/lib.rs

//! Kastelen: the booking backend behind kastelenbelgie.be.
//!
//! Visitors book castle visits, optionally with an account; account holders
//! can list and cancel their bookings and keep a list of favorite castles.
//! This crate holds everything below the HTTP layer:
//!  - `store`: the SQLite-backed [`Store`] and its schema.
//!  - `services`: registration/login/profile, reservations and favorites,
//!    each a thin wrapper over single parameterized statements.
//!  - `token`: signed, expiring session tokens.
//!  - `notify`: best-effort email notifications on a background worker.

pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod store;
pub mod token;

pub use crate::error::{BookingError, BookingResult};
pub use crate::notify::{Mailer, Mailroom, Notification, NotificationSink};
pub use crate::services::{AuthService, FavoriteService, LoginOutcome, PasswordHasher, ReservationService};
pub use crate::store::{Store, StoreOptions};
pub use crate::token::{SessionClaims, TokenKeys};
