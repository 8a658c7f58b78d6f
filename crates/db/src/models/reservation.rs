//! Reservation entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use venia_core::types::{DbId, Money, Timestamp};

/// Reservation lifecycle.
///
/// Creation writes `Confirmed` directly; `Pending` is kept in the model (and
/// excluded from availability alongside `Confirmed`) for forward
/// compatibility with an approval workflow that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Contact details for a reservation made without an account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Who is booking: a registered user or a guest with contact details.
/// The two are mutually exclusive by construction.
#[derive(Debug, Clone)]
pub enum BookingParty {
    Registered(DbId),
    Guest(GuestContact),
}

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub space_id: DbId,
    pub user_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub total_price: Money,
    pub status: ReservationStatus,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub created_at: Timestamp,
}

/// Validated input for the transactional creation path. The price has
/// already been computed by the availability engine.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub space_id: DbId,
    pub party: BookingParty,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub total_price: Money,
}

/// Reservation summary for the booking user's own list: denormalizes the
/// space's name, address and cover image so clients can render cards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReservationSummary {
    pub id: DbId,
    pub space_id: DbId,
    pub space_name: String,
    pub space_address: Option<String>,
    pub space_image_url: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: ReservationStatus,
    pub total_price: Money,
    pub base_price: Option<Money>,
    pub pricing_unit: String,
}

/// Reservation summary for the space owner: requester name and email fall
/// back to the guest contact fields when no user is attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OwnerReservationSummary {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: ReservationStatus,
    pub total_price: Money,
}
