// kastelen_client/src/validation.rs

//! Field rules for the booking form. Messages are shown to visitors as-is.

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{8,}$").expect("valid phone pattern"));

/// Input type of a form control, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Email,
  Tel,
  Date,
  Number,
  Select,
  TextArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: String,
  pub kind: FieldKind,
  pub required: bool,
}

impl FieldSpec {
  pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
    Self {
      name: name.into(),
      kind,
      required,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("Dit veld is verplicht")]
  Required,
  #[error("Voer een geldig e-mailadres in")]
  InvalidEmail,
  #[error("Voer een geldig telefoonnummer in")]
  InvalidPhone,
  #[error("Selecteer een datum in de toekomst")]
  DateInPast,
}

/// Checks one value. Surrounding whitespace is ignored; format rules only apply
/// to non-empty values, so optional fields may stay blank.
pub fn validate_field(field: &FieldSpec, raw_value: &str, today: NaiveDate) -> Result<(), FieldError> {
  let value = raw_value.trim();
  if value.is_empty() {
    return if field.required { Err(FieldError::Required) } else { Ok(()) };
  }

  match field.kind {
    FieldKind::Email if !EMAIL_PATTERN.is_match(value) => Err(FieldError::InvalidEmail),
    FieldKind::Tel if !PHONE_PATTERN.is_match(value) => Err(FieldError::InvalidPhone),
    // Unparsable dates are left to the browser's own date control.
    FieldKind::Date => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
      Ok(date) if date < today => Err(FieldError::DateInPast),
      _ => Ok(()),
    },
    _ => Ok(()),
  }
}

/// Selectable range for date inputs: today through the same day next year.
pub fn date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
  let max = today.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
  (today, max)
}
