// kastelen/src/services/mod.rs

pub mod auth;
pub mod favorites;
pub mod reservations;

pub use auth::{AuthService, LoginOutcome, PasswordHasher};
pub use favorites::FavoriteService;
pub use reservations::ReservationService;
