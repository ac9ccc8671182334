// kastelen/src/models/lenient.rs

//! Serde helpers for form-shaped JSON.
//!
//! Booking forms are posted as raw `FormData` entries, so numbers and
//! checkboxes often arrive as strings ("2", "on"). These helpers accept both
//! shapes instead of rejecting the request before it reaches the store.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
  Int(i64),
  Float(f64),
  Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
  Bool(bool),
  Int(i64),
  Text(String),
}

/// Accepts `2`, `2.0` or `"2"`. Blank or unparsable text becomes `None`, which
/// the store then rejects for NOT NULL columns.
pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<NumberOrText>::deserialize(deserializer)?;
  Ok(match raw {
    None => None,
    Some(NumberOrText::Int(n)) => Some(n),
    Some(NumberOrText::Float(f)) if f.fract() == 0.0 => Some(f as i64),
    Some(NumberOrText::Float(_)) => None,
    Some(NumberOrText::Text(s)) => s.trim().parse::<i64>().ok(),
  })
}

/// Checkbox semantics: `true`, non-zero numbers, `"on"`, `"true"` and `"1"` are
/// set; anything else, including absence, is unset.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<Flag>::deserialize(deserializer)?;
  Ok(match raw {
    None => false,
    Some(Flag::Bool(b)) => b,
    Some(Flag::Int(n)) => n != 0,
    Some(Flag::Text(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "on" | "true" | "1" | "yes"),
  })
}
