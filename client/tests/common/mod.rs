// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::NaiveDate;
use kastelen_client::{
  Banner, BookingController, BookingView, ClientError, FieldKind, FieldSpec, PageContext, Profile, ReservationApi,
  SubmitReceipt,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};

pub fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn setup_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// An unsigned token whose payload carries `user_id`.
pub fn session_token(user_id: i64) -> String {
  let payload = format!(r#"{{"userId":{user_id},"email":"lien@example.be","iat":0,"exp":1}}"#);
  format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
}

// --- Fake page ---

pub struct FakeView {
  pub specs: Vec<FieldSpec>,
  pub values: HashMap<String, String>,
  pub errors: HashMap<String, String>,
  pub bounds: HashMap<String, (NaiveDate, NaiveDate)>,
  pub label: String,
  pub enabled: bool,
  /// Every `set_submit` call, in order.
  pub submit_history: Vec<(String, bool)>,
  pub banner: Option<Banner>,
  pub resets: usize,
  pub dashboard_offers: Vec<Duration>,
  pub login_prompt: bool,
  pub token: Option<String>,
}

impl FakeView {
  /// The castle page booking form.
  pub fn booking_form() -> Self {
    let specs = vec![
      FieldSpec::new("name", FieldKind::Text, true),
      FieldSpec::new("email", FieldKind::Email, true),
      FieldSpec::new("phone", FieldKind::Tel, false),
      FieldSpec::new("date", FieldKind::Date, true),
      FieldSpec::new("time", FieldKind::Select, false),
      FieldSpec::new("visitors", FieldKind::Number, true),
      FieldSpec::new("visitType", FieldKind::Select, true),
      FieldSpec::new("language", FieldKind::Select, true),
      FieldSpec::new("message", FieldKind::TextArea, false),
    ];
    let values = specs.iter().map(|s| (s.name.clone(), String::new())).collect();
    Self {
      specs,
      values,
      errors: HashMap::new(),
      bounds: HashMap::new(),
      label: "Reserveer nu".to_string(),
      enabled: true,
      submit_history: Vec::new(),
      banner: None,
      resets: 0,
      dashboard_offers: Vec::new(),
      login_prompt: false,
      token: None,
    }
  }

  pub fn filled() -> Self {
    let mut view = Self::booking_form();
    for (name, value) in [
      ("name", "Lien Janssens"),
      ("email", "lien@example.be"),
      ("phone", "+32 470 12 34 56"),
      ("date", "2026-11-02"),
      ("time", "14:00"),
      ("visitors", "2"),
      ("visitType", "guided"),
      ("language", "nl"),
    ] {
      view.values.insert(name.to_string(), value.to_string());
    }
    view
  }

  pub fn with_token(mut self, token: String) -> Self {
    self.token = Some(token);
    self
  }

  pub fn fill(&mut self, name: &str, value: &str) {
    self.values.insert(name.to_string(), value.to_string());
  }
}

impl BookingView for FakeView {
  fn fields(&self) -> Vec<FieldSpec> {
    self.specs.clone()
  }

  fn value(&self, name: &str) -> String {
    self.values.get(name).cloned().unwrap_or_default()
  }

  fn set_value(&mut self, name: &str, value: &str) {
    self.values.insert(name.to_string(), value.to_string());
  }

  fn show_field_error(&mut self, name: &str, message: &str) {
    self.errors.insert(name.to_string(), message.to_string());
  }

  fn clear_field_error(&mut self, name: &str) {
    self.errors.remove(name);
  }

  fn set_date_bounds(&mut self, name: &str, min: NaiveDate, max: NaiveDate) {
    self.bounds.insert(name.to_string(), (min, max));
  }

  fn submit_label(&self) -> String {
    self.label.clone()
  }

  fn set_submit(&mut self, label: &str, enabled: bool) {
    self.label = label.to_string();
    self.enabled = enabled;
    self.submit_history.push((label.to_string(), enabled));
  }

  fn show_banner(&mut self, banner: Banner) {
    self.banner = Some(banner);
  }

  fn reset_form(&mut self) {
    self.resets += 1;
    for value in self.values.values_mut() {
      value.clear();
    }
  }

  fn offer_dashboard(&mut self, delay: Duration) {
    self.dashboard_offers.push(delay);
  }

  fn insert_login_prompt(&mut self) {
    self.login_prompt = true;
  }

  fn session_token(&self) -> Option<String> {
    self.token.clone()
  }
}

// --- Fake backend ---

#[derive(Debug, Clone)]
pub enum Script {
  Accept(i64),
  Reject(u16, Option<String>),
  Offline,
}

#[derive(Default)]
struct FakeApiState {
  script: Option<Script>,
  profile: Option<Profile>,
  submissions: Vec<(Map<String, Value>, Option<String>)>,
  profile_requests: Vec<String>,
}

/// Scripted backend. Clones share state so tests can inspect calls after the
/// controller has taken ownership.
#[derive(Clone, Default)]
pub struct FakeApi {
  state: Arc<Mutex<FakeApiState>>,
}

impl FakeApi {
  pub fn answering(script: Script) -> Self {
    let api = Self::default();
    api.state.lock().script = Some(script);
    api
  }

  pub fn with_profile(self, profile: Profile) -> Self {
    self.state.lock().profile = Some(profile);
    self
  }

  pub fn submissions(&self) -> Vec<(Map<String, Value>, Option<String>)> {
    self.state.lock().submissions.clone()
  }

  pub fn profile_requests(&self) -> Vec<String> {
    self.state.lock().profile_requests.clone()
  }
}

#[async_trait]
impl ReservationApi for FakeApi {
  async fn submit_reservation(&self, payload: &Map<String, Value>, token: Option<&str>) -> Result<SubmitReceipt, ClientError> {
    let mut state = self.state.lock();
    state.submissions.push((payload.clone(), token.map(str::to_string)));
    match state.script.clone().unwrap_or(Script::Offline) {
      Script::Accept(reservation_id) => Ok(SubmitReceipt {
        message: "Reservation created successfully".to_string(),
        reservation_id,
      }),
      Script::Reject(status, message) => Err(ClientError::Server { status, message }),
      Script::Offline => Err(ClientError::Transport("connection refused".to_string())),
    }
  }

  async fn fetch_profile(&self, token: &str) -> Result<Profile, ClientError> {
    let mut state = self.state.lock();
    state.profile_requests.push(token.to_string());
    state.profile.clone().ok_or(ClientError::Server {
      status: 403,
      message: Some("Invalid or expired token".to_string()),
    })
  }
}

pub fn gravensteen() -> PageContext {
  PageContext::from_page(Some("Gravensteen"), "Gravensteen | Kastelen", "/kastelen/gravensteen.html")
}

pub fn controller(api: FakeApi) -> BookingController<FakeApi> {
  setup_tracing();
  BookingController::new(api, gravensteen(), today())
}
