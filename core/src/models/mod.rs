// kastelen/src/models/mod.rs

//! Rows and payloads for the three stored entities.

pub mod favorite;
pub mod lenient;
pub mod reservation;
pub mod user;

pub use favorite::{Favorite, NewFavorite};
pub use reservation::{
  AdminReservation, NewReservation, Reservation, ReservationId, StatusUpdate, STATUS_CANCELLED, STATUS_CONFIRMED,
  STATUS_PENDING,
};
pub use user::{NewUser, ProfileUpdate, PublicUser, User, UserId, UserProfile};
