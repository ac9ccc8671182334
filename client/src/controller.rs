// kastelen_client/src/controller.rs

use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::api::{ClientError, ReservationApi};
use crate::page::PageContext;
use crate::session;
use crate::validation::{date_bounds, validate_field, FieldKind, FieldSpec};
use crate::view::{Banner, BannerKind, BookingView};

pub const BUSY_LABEL: &str = "Versturen...";
pub const SUCCESS_MESSAGE: &str = "Reservering succesvol verzonden! We nemen binnen 24 uur contact met u op.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Er is een fout opgetreden bij het verzenden van uw reservering.";
pub const NETWORK_ERROR_MESSAGE: &str = "Er is een netwerkfout opgetreden. Probeer het later opnieuw.";

pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(5);
pub const DASHBOARD_OFFER_DELAY: Duration = Duration::from_secs(2);

/// What a submit attempt ended in. The view has already been updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// At least one field failed validation; nothing was sent.
  Invalid,
  Submitted { reservation_id: i64 },
  /// The server refused the booking; `message` is what the visitor saw.
  Rejected { message: String },
  NetworkError,
}

pub struct BookingController<A> {
  api: A,
  page: PageContext,
  today: NaiveDate,
}

impl<A: ReservationApi> BookingController<A> {
  /// `today` anchors the date rules; use [`BookingController::for_today`] for
  /// the local calendar date.
  pub fn new(api: A, page: PageContext, today: NaiveDate) -> Self {
    Self { api, page, today }
  }

  pub fn for_today(api: A, page: PageContext) -> Self {
    Self::new(api, page, Local::now().date_naive())
  }

  pub fn page(&self) -> &PageContext {
    &self.page
  }

  fn check<V: BookingView>(&self, view: &mut V, field: &FieldSpec) -> bool {
    match validate_field(field, &view.value(&field.name), self.today) {
      Ok(()) => {
        view.clear_field_error(&field.name);
        true
      }
      Err(e) => {
        view.show_field_error(&field.name, &e.to_string());
        false
      }
    }
  }

  /// Page setup: date limits, then profile pre-fill for signed-in visitors or
  /// the login prompt for everyone else.
  #[instrument(name = "booking::on_load", skip_all, fields(castle_slug = %self.page.castle_slug))]
  pub async fn on_load<V: BookingView>(&self, view: &mut V) {
    let (min, max) = date_bounds(self.today);
    for field in view.fields().iter().filter(|f| f.kind == FieldKind::Date) {
      view.set_date_bounds(&field.name, min, max);
    }

    let Some(token) = view.session_token() else {
      view.insert_login_prompt();
      return;
    };

    let profile = match self.api.fetch_profile(&token).await {
      Ok(profile) => profile,
      Err(e) => {
        debug!(error = %e, "Profile unavailable; form left as is.");
        return;
      }
    };

    let full_name = format!("{} {}", profile.first_name, profile.last_name);
    let candidates = [
      ("name", Some(full_name.as_str())),
      ("email", Some(profile.email.as_str())),
      ("phone", profile.phone.as_deref().filter(|p| !p.is_empty())),
    ];
    let present: Vec<String> = view.fields().into_iter().map(|f| f.name).collect();
    for (name, value) in candidates {
      if let Some(value) = value {
        if present.iter().any(|p| p == name) && view.value(name).is_empty() {
          view.set_value(name, value);
        }
      }
    }
  }

  /// Validates one field when it loses focus.
  pub fn on_blur<V: BookingView>(&self, view: &mut V, name: &str) -> bool {
    match view.fields().into_iter().find(|f| f.name == name) {
      Some(field) => self.check(view, &field),
      None => true,
    }
  }

  /// Typing into a field clears its error until the next check.
  pub fn on_input<V: BookingView>(&self, view: &mut V, name: &str) {
    view.clear_field_error(name);
  }

  /// Form values plus the castle and, when a session exists, the decoded user id.
  fn payload<V: BookingView>(&self, view: &V, token: Option<&str>) -> Map<String, Value> {
    let mut payload: Map<String, Value> = view
      .fields()
      .into_iter()
      .map(|f| {
        let value = view.value(&f.name);
        (f.name, Value::String(value))
      })
      .collect();
    payload.insert("castleName".to_string(), Value::String(self.page.castle_name.clone()));
    payload.insert("castleSlug".to_string(), Value::String(self.page.castle_slug.clone()));
    if let Some(user_id) = token.and_then(session::decode_user_id) {
      payload.insert("userId".to_string(), Value::from(user_id));
    }
    payload
  }

  #[instrument(name = "booking::on_submit", skip_all, fields(castle_slug = %self.page.castle_slug))]
  pub async fn on_submit<V: BookingView>(&self, view: &mut V) -> SubmitOutcome {
    // Check every field so all errors show at once.
    let mut valid = true;
    for field in view.fields() {
      valid &= self.check(view, &field);
    }
    if !valid {
      debug!("Submit blocked by field validation.");
      return SubmitOutcome::Invalid;
    }

    let token = view.session_token();
    let payload = self.payload(view, token.as_deref());

    let idle_label = view.submit_label();
    view.set_submit(BUSY_LABEL, false);
    let result = self.api.submit_reservation(&payload, token.as_deref()).await;

    let outcome = match result {
      Ok(receipt) => {
        info!(reservation_id = receipt.reservation_id, "Booking submitted.");
        view.show_banner(Banner {
          kind: BannerKind::Success,
          message: SUCCESS_MESSAGE.to_string(),
          auto_dismiss: Some(SUCCESS_BANNER_TTL),
        });
        view.reset_form();
        if token.is_some() {
          view.offer_dashboard(DASHBOARD_OFFER_DELAY);
        }
        SubmitOutcome::Submitted {
          reservation_id: receipt.reservation_id,
        }
      }
      Err(ClientError::Server { status, message }) => {
        let message = message
          .filter(|m| !m.is_empty())
          .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        warn!(status, %message, "Booking rejected by the server.");
        view.show_banner(error_banner(&message));
        SubmitOutcome::Rejected { message }
      }
      Err(ClientError::Transport(e)) => {
        warn!(error = %e, "Booking could not be sent.");
        view.show_banner(error_banner(NETWORK_ERROR_MESSAGE));
        SubmitOutcome::NetworkError
      }
    };

    view.set_submit(&idle_label, true);
    outcome
  }
}

fn error_banner(message: &str) -> Banner {
  Banner {
    kind: BannerKind::Error,
    message: message.to_string(),
    auto_dismiss: None,
  }
}
