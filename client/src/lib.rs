// kastelen_client/src/lib.rs

//! The booking form on castle pages, minus the DOM.
//!
//! [`BookingController`] owns the form behavior: field validation on blur and
//! submit, stamping the castle and session onto the payload, the busy/idle
//! submit button, result banners, and profile pre-fill. The page itself is
//! reached through [`BookingView`] and the backend through [`ReservationApi`],
//! so the whole flow runs the same against a browser binding or a test fake.

pub mod api;
pub mod controller;
pub mod page;
pub mod session;
pub mod validation;
pub mod view;

pub use crate::api::{ClientError, HttpReservationApi, Profile, ReservationApi, SubmitReceipt};
pub use crate::controller::{BookingController, SubmitOutcome};
pub use crate::page::PageContext;
pub use crate::validation::{FieldError, FieldKind, FieldSpec};
pub use crate::view::{Banner, BannerKind, BookingView};
