// tests/form_tests.rs
mod common;

use chrono::NaiveDate;
use common::*;
use kastelen_client::Profile;

fn profile(phone: Option<&str>) -> Profile {
  Profile {
    first_name: "Lien".to_string(),
    last_name: "Janssens".to_string(),
    email: "lien@example.be".to_string(),
    phone: phone.map(str::to_string),
  }
}

#[tokio::test]
async fn load_sets_date_limits() {
  let controller = controller(FakeApi::default());
  let mut view = FakeView::booking_form();

  controller.on_load(&mut view).await;

  assert_eq!(
    view.bounds.get("date"),
    Some(&(today(), NaiveDate::from_ymd_opt(2027, 10, 19).unwrap()))
  );
  assert_eq!(view.bounds.len(), 1);
}

#[tokio::test]
async fn anonymous_visitors_get_the_login_prompt() {
  let api = FakeApi::default();
  let controller = controller(api.clone());
  let mut view = FakeView::booking_form();

  controller.on_load(&mut view).await;

  assert!(view.login_prompt);
  assert!(api.profile_requests().is_empty());
}

#[tokio::test]
async fn profile_fills_only_empty_fields() {
  let api = FakeApi::default().with_profile(profile(Some("+32 470 00 00 00")));
  let controller = controller(api.clone());
  let token = session_token(5);
  let mut view = FakeView::booking_form().with_token(token.clone());
  view.fill("email", "werk@example.be");

  controller.on_load(&mut view).await;

  assert!(!view.login_prompt);
  assert_eq!(api.profile_requests(), vec![token]);
  assert_eq!(view.values["name"], "Lien Janssens");
  assert_eq!(view.values["email"], "werk@example.be");
  assert_eq!(view.values["phone"], "+32 470 00 00 00");
}

#[tokio::test]
async fn missing_phone_is_not_filled() {
  let controller = controller(FakeApi::default().with_profile(profile(None)));
  let mut view = FakeView::booking_form().with_token(session_token(5));
  controller.on_load(&mut view).await;
  assert_eq!(view.values["phone"], "");
}

#[tokio::test]
async fn rejected_session_leaves_the_form_untouched() {
  // No profile scripted: the fake answers 403.
  let controller = controller(FakeApi::default());
  let mut view = FakeView::booking_form().with_token(session_token(5));

  controller.on_load(&mut view).await;

  assert!(view.values.values().all(String::is_empty));
  assert!(!view.login_prompt);
}

#[test]
fn blur_validates_and_input_clears() {
  let controller = controller(FakeApi::default());
  let mut view = FakeView::booking_form();
  view.fill("email", "lien@");

  assert!(!controller.on_blur(&mut view, "email"));
  assert_eq!(view.errors["email"], "Voer een geldig e-mailadres in");

  controller.on_input(&mut view, "email");
  assert!(view.errors.is_empty());

  view.fill("email", "lien@example.be");
  assert!(controller.on_blur(&mut view, "email"));
  assert!(view.errors.is_empty());
}

#[test]
fn blur_on_optional_blank_field_passes() {
  let controller = controller(FakeApi::default());
  let mut view = FakeView::booking_form();
  assert!(controller.on_blur(&mut view, "phone"));
  assert!(controller.on_blur(&mut view, "unknown-field"));
  assert!(!controller.on_blur(&mut view, "name"));
}
