//! Space (venue listing) entity model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use venia_core::booking::{BookingPolicy, PricingUnit};
use venia_core::types::{DbId, Money, Timestamp};

/// Publication lifecycle of a listing.
///
/// `Deleted` is a logical tombstone kept for forward compatibility; the
/// delete endpoint removes rows outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    Draft,
    Published,
    Paused,
    Deleted,
}

/// When a deposit is collected, if the space requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    Upfront,
    OnSite,
}

/// Whether clients pick a continuous range or independent days.
/// Stored configuration only; the server does not branch on it beyond the
/// unit-based minimum-stay checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    ByRange,
    ByDay,
}

/// How much of the address non-owners get to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AddressVisibility {
    Exact,
    Approximate,
}

/// A row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub max_capacity: Option<i32>,
    pub base_price: Option<Money>,
    /// Free-form unit text; parsed leniently via [`Space::unit`].
    pub pricing_unit: String,
    pub status: SpaceStatus,
    pub amenities: Option<String>,
    pub rules: Option<String>,
    pub owner_id: DbId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: Option<String>,
    pub location_hint: Option<String>,
    /// Carried in the model but never read by pricing (see DESIGN.md).
    pub weekend_price: Option<Money>,
    pub cleaning_fee: Option<Money>,
    pub deposit_amount: Option<Money>,
    pub deposit_policy: Option<DepositPolicy>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub prep_minutes: Option<i32>,
    pub min_notice_hours: Option<i32>,
    pub max_lead_months: Option<i32>,
    pub min_stay: Option<i32>,
    pub blocked_weekdays: Option<Vec<String>>,
    pub booking_mode: Option<BookingMode>,
    pub cancellation_policy: Option<String>,
    pub address_visibility: Option<AddressVisibility>,
    pub allows_guest_booking: Option<bool>,
    pub allows_overnight: Option<bool>,
    pub created_at: Timestamp,
}

impl Space {
    /// Parsed pricing unit; `None` for unknown unit text.
    pub fn unit(&self) -> Option<PricingUnit> {
        PricingUnit::parse(&self.pricing_unit)
    }

    /// The policy fields the availability engine validates against.
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            min_notice_hours: self.min_notice_hours,
            min_stay: self.min_stay,
            max_lead_months: self.max_lead_months,
        }
    }
}

/// DTO for creating a new space. Carried as the `data` JSON part of the
/// multipart request; `image_order` names the uploaded files in gallery order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpace {
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub max_capacity: Option<i32>,
    pub base_price: Option<Money>,
    /// Defaults to `hour` if omitted.
    pub pricing_unit: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<SpaceStatus>,
    pub amenities: Option<String>,
    pub rules: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: Option<String>,
    pub location_hint: Option<String>,
    pub weekend_price: Option<Money>,
    pub cleaning_fee: Option<Money>,
    pub deposit_amount: Option<Money>,
    pub deposit_policy: Option<DepositPolicy>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub prep_minutes: Option<i32>,
    pub min_notice_hours: Option<i32>,
    pub max_lead_months: Option<i32>,
    pub min_stay: Option<i32>,
    pub blocked_weekdays: Option<Vec<String>>,
    pub booking_mode: Option<BookingMode>,
    pub cancellation_policy: Option<String>,
    pub address_visibility: Option<AddressVisibility>,
    pub allows_guest_booking: Option<bool>,
    pub allows_overnight: Option<bool>,
    /// Uploaded file names in the desired gallery order.
    #[serde(default)]
    pub image_order: Option<Vec<String>>,
}

/// DTO for updating an existing space. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSpace {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub address: Option<String>,
    pub max_capacity: Option<i32>,
    pub base_price: Option<Money>,
    pub pricing_unit: Option<String>,
    pub status: Option<SpaceStatus>,
    pub amenities: Option<String>,
    pub rules: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_ref: Option<String>,
    pub location_hint: Option<String>,
    pub weekend_price: Option<Money>,
    pub cleaning_fee: Option<Money>,
    pub deposit_amount: Option<Money>,
    pub deposit_policy: Option<DepositPolicy>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub prep_minutes: Option<i32>,
    pub min_notice_hours: Option<i32>,
    pub max_lead_months: Option<i32>,
    pub min_stay: Option<i32>,
    pub blocked_weekdays: Option<Vec<String>>,
    pub booking_mode: Option<BookingMode>,
    pub cancellation_policy: Option<String>,
    pub address_visibility: Option<AddressVisibility>,
    pub allows_guest_booking: Option<bool>,
    pub allows_overnight: Option<bool>,
    /// Existing image URLs and/or new-upload file names in the desired
    /// gallery order. When present the gallery is rebuilt from scratch and
    /// images missing from the list are dropped.
    #[serde(default)]
    pub image_order: Option<Vec<String>>,
}

/// Conjunctive search filters for the public catalog.
#[derive(Debug, Clone, Default)]
pub struct SpaceSearch {
    /// When set, returns this owner's spaces regardless of state.
    pub owner_id: Option<DbId>,
    /// Excludes the browsing user's own listings from public results.
    pub browsing_user_id: Option<DbId>,
    /// Free-text match over name and description.
    pub text: Option<String>,
    pub kind: Option<String>,
    pub amenity: Option<String>,
    pub min_capacity: Option<i32>,
}
