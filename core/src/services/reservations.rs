// kastelen/src/services/reservations.rs

use tracing::{debug, info, instrument, warn};

use crate::error::{BookingError, BookingResult};
use crate::models::{
  AdminReservation, NewReservation, Reservation, ReservationId, UserId, STATUS_CANCELLED, STATUS_PENDING,
};
use crate::notify::{Notification, NotificationSink};
use crate::store::Store;

fn not_found() -> BookingError {
  BookingError::NotFound("Reservation not found".to_string())
}

#[derive(Debug, Clone)]
pub struct ReservationService {
  store: Store,
  notifications: NotificationSink,
}

impl ReservationService {
  pub fn new(store: Store, notifications: NotificationSink) -> Self {
    Self { store, notifications }
  }

  /// Stores a booking request with status `pending`.
  ///
  /// `owner` must come from a verified session. The `user_id` carried in the
  /// payload is only compared against it for diagnostics and never stored.
  /// Required columns are enforced by the store alone.
  #[instrument(
    name = "reservations::create",
    skip(self, booking),
    fields(castle_slug = ?booking.castle_slug),
    err(Display)
  )]
  pub async fn create(&self, booking: NewReservation, owner: Option<UserId>) -> BookingResult<ReservationId> {
    if let Some(claimed) = booking.user_id {
      if owner != Some(claimed) {
        warn!(claimed, "Ignoring client-supplied userId that does not match the session.");
      }
    }

    let result = sqlx::query(
      "INSERT INTO reservations \
       (user_id, castle_name, castle_slug, date, time, visitors, visit_type, language, name, email, phone, message, status) \
       VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(owner)
    .bind(&booking.castle_name)
    .bind(&booking.castle_slug)
    .bind(&booking.date)
    .bind(&booking.time)
    .bind(booking.visitors)
    .bind(&booking.visit_type)
    .bind(&booking.language)
    .bind(&booking.name)
    .bind(&booking.email)
    .bind(&booking.phone)
    .bind(&booking.message)
    .bind(STATUS_PENDING)
    .execute(self.store.pool())
    .await?;

    let reservation_id = result.last_insert_rowid();
    info!(reservation_id, "Reservation created.");

    // Every NOT NULL column was accepted by the insert, so these are present.
    if let (Some(to), Some(castle_name), Some(date), Some(visitors)) = (
      booking.email.clone(),
      booking.castle_name.clone(),
      booking.date.clone(),
      booking.visitors,
    ) {
      self.notifications.dispatch(Notification::ReservationReceived {
        to,
        name: booking.name.unwrap_or_default(),
        reservation_id,
        castle_name,
        date,
        time: booking.time,
        visitors,
        visit_type: booking.visit_type.unwrap_or_default(),
        language: booking.language.unwrap_or_default(),
      });
    }

    Ok(reservation_id)
  }

  #[instrument(name = "reservations::list_for_user", skip(self), err(Display))]
  pub async fn list_for_user(&self, user_id: UserId) -> BookingResult<Vec<Reservation>> {
    let reservations: Vec<Reservation> =
      sqlx::query_as("SELECT * FROM reservations WHERE user_id = ? ORDER BY date DESC, id DESC")
        .bind(user_id)
        .fetch_all(self.store.pool())
        .await?;
    debug!(count = reservations.len(), "Fetched reservations for user.");
    Ok(reservations)
  }

  /// Returns the reservation only to its owner. Anyone else gets NotFound, so
  /// the existence of other people's bookings is never confirmed.
  #[instrument(name = "reservations::get", skip(self), err(Display))]
  pub async fn get(&self, id: ReservationId, user_id: UserId) -> BookingResult<Reservation> {
    sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ? AND user_id = ?")
      .bind(id)
      .bind(user_id)
      .fetch_optional(self.store.pool())
      .await?
      .ok_or_else(not_found)
  }

  /// Cancelling an already cancelled reservation succeeds again.
  #[instrument(name = "reservations::cancel", skip(self), err(Display))]
  pub async fn cancel(&self, id: ReservationId, user_id: UserId) -> BookingResult<()> {
    let result = sqlx::query(
      "UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND user_id = ?",
    )
    .bind(STATUS_CANCELLED)
    .bind(id)
    .bind(user_id)
    .execute(self.store.pool())
    .await?;

    if result.rows_affected() == 0 {
      return Err(not_found());
    }
    info!("Reservation cancelled.");
    Ok(())
  }

  /// Every reservation with its owner's name. Callers only need a valid
  /// session; there is no administrator role.
  #[instrument(name = "reservations::admin_list", skip(self), err(Display))]
  pub async fn admin_list(&self) -> BookingResult<Vec<AdminReservation>> {
    let rows: Vec<AdminReservation> = sqlx::query_as(
      "SELECT r.*, u.first_name, u.last_name FROM reservations r \
       LEFT JOIN users u ON r.user_id = u.id \
       ORDER BY r.created_at DESC, r.id DESC",
    )
    .fetch_all(self.store.pool())
    .await?;
    debug!(count = rows.len(), "Fetched all reservations.");
    Ok(rows)
  }

  /// Writes any status string to any reservation. Succeeds even when `id`
  /// matches nothing.
  #[instrument(name = "reservations::admin_update_status", skip(self), err(Display))]
  pub async fn admin_update_status(&self, id: ReservationId, status: &str) -> BookingResult<()> {
    let result = sqlx::query("UPDATE reservations SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
      .bind(status)
      .bind(id)
      .execute(self.store.pool())
      .await?;
    if result.rows_affected() == 0 {
      debug!("Status update matched no reservation.");
    } else {
      info!("Reservation status updated.");
    }
    Ok(())
  }
}
