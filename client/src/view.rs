// kastelen_client/src/view.rs

use std::time::Duration;

use chrono::NaiveDate;

use crate::validation::FieldSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
  Success,
  Error,
}

/// A message shown above the form. Only one banner is visible at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
  pub kind: BannerKind,
  pub message: String,
  /// Remove the banner after this long. `None` keeps it until replaced.
  pub auto_dismiss: Option<Duration>,
}

/// The page surface the booking controller drives.
///
/// Implementations bind this to a real document; fields are addressed by their
/// form `name`.
pub trait BookingView {
  /// Every control of the booking form, in document order.
  fn fields(&self) -> Vec<FieldSpec>;
  fn value(&self, name: &str) -> String;
  fn set_value(&mut self, name: &str, value: &str);

  /// Renders `message` under the control, replacing any previous one.
  fn show_field_error(&mut self, name: &str, message: &str);
  fn clear_field_error(&mut self, name: &str);

  fn set_date_bounds(&mut self, name: &str, min: NaiveDate, max: NaiveDate);

  fn submit_label(&self) -> String;
  fn set_submit(&mut self, label: &str, enabled: bool);

  /// Replaces whatever banner is currently shown.
  fn show_banner(&mut self, banner: Banner);
  fn reset_form(&mut self);

  /// Ask the visitor, after `delay`, whether to open their dashboard.
  fn offer_dashboard(&mut self, delay: Duration);
  fn insert_login_prompt(&mut self);

  /// Token persisted by the login page, if the visitor has one.
  fn session_token(&self) -> Option<String>;
}
