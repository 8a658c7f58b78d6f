//! Repository for the `spaces` table.

use sqlx::PgPool;
use venia_core::types::DbId;

use crate::models::space::{CreateSpace, Space, SpaceSearch, SpaceStatus, UpdateSpace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, kind, address, max_capacity, base_price, \
     pricing_unit, status, amenities, rules, owner_id, latitude, longitude, place_ref, \
     location_hint, weekend_price, cleaning_fee, deposit_amount, deposit_policy, \
     check_in_time, check_out_time, prep_minutes, min_notice_hours, max_lead_months, \
     min_stay, blocked_weekdays, booking_mode, cancellation_policy, address_visibility, \
     allows_guest_booking, allows_overnight, created_at";

/// Shared WHERE clause for [`SpaceRepo::search`] and [`SpaceRepo::count`].
///
/// When an owner filter is given ($1), returns that owner's spaces in any
/// state; otherwise only published spaces, excluding the browsing user's own
/// listings ($2). Remaining filters compose conjunctively.
const SEARCH_WHERE: &str = "\
     (CASE WHEN $1::bigint IS NOT NULL THEN owner_id = $1
           ELSE status = 'published' AND ($2::bigint IS NULL OR owner_id <> $2)
      END)
     AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%' OR description ILIKE '%' || $3 || '%')
     AND ($4::text IS NULL OR kind LIKE '%' || $4 || '%')
     AND ($5::text IS NULL OR amenities LIKE '%' || $5 || '%')
     AND ($6::int IS NULL OR max_capacity >= $6)";

/// Provides CRUD and search operations for spaces.
pub struct SpaceRepo;

impl SpaceRepo {
    /// Insert a new space owned by `owner_id`, returning the created row.
    ///
    /// Applies the full create mapping: defaults are `hour` pricing and
    /// `draft` status. The gallery is written separately.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateSpace,
    ) -> Result<Space, sqlx::Error> {
        let query = format!(
            "INSERT INTO spaces (name, description, kind, address, max_capacity, base_price,
                pricing_unit, status, amenities, rules, owner_id, latitude, longitude,
                place_ref, location_hint, weekend_price, cleaning_fee, deposit_amount,
                deposit_policy, check_in_time, check_out_time, prep_minutes,
                min_notice_hours, max_lead_months, min_stay, blocked_weekdays,
                booking_mode, cancellation_policy, address_visibility,
                allows_guest_booking, allows_overnight)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'hour'), COALESCE($8, 'draft'),
                $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23,
                $24, $25, $26, $27, $28, $29, $30, $31)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(&input.address)
            .bind(input.max_capacity)
            .bind(input.base_price)
            .bind(&input.pricing_unit)
            .bind(input.status)
            .bind(&input.amenities)
            .bind(&input.rules)
            .bind(owner_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.place_ref)
            .bind(&input.location_hint)
            .bind(input.weekend_price)
            .bind(input.cleaning_fee)
            .bind(input.deposit_amount)
            .bind(input.deposit_policy)
            .bind(input.check_in_time)
            .bind(input.check_out_time)
            .bind(input.prep_minutes)
            .bind(input.min_notice_hours)
            .bind(input.max_lead_months)
            .bind(input.min_stay)
            .bind(&input.blocked_weekdays)
            .bind(input.booking_mode)
            .bind(&input.cancellation_policy)
            .bind(input.address_visibility)
            .bind(input.allows_guest_booking)
            .bind(input.allows_overnight)
            .fetch_one(pool)
            .await
    }

    /// Find a space by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spaces WHERE id = $1");
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a space. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The gallery
    /// reconciliation is handled separately by `SpaceImageRepo`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSpace,
    ) -> Result<Option<Space>, sqlx::Error> {
        let query = format!(
            "UPDATE spaces SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                kind = COALESCE($4, kind),
                address = COALESCE($5, address),
                max_capacity = COALESCE($6, max_capacity),
                base_price = COALESCE($7, base_price),
                pricing_unit = COALESCE($8, pricing_unit),
                status = COALESCE($9, status),
                amenities = COALESCE($10, amenities),
                rules = COALESCE($11, rules),
                latitude = COALESCE($12, latitude),
                longitude = COALESCE($13, longitude),
                place_ref = COALESCE($14, place_ref),
                location_hint = COALESCE($15, location_hint),
                weekend_price = COALESCE($16, weekend_price),
                cleaning_fee = COALESCE($17, cleaning_fee),
                deposit_amount = COALESCE($18, deposit_amount),
                deposit_policy = COALESCE($19, deposit_policy),
                check_in_time = COALESCE($20, check_in_time),
                check_out_time = COALESCE($21, check_out_time),
                prep_minutes = COALESCE($22, prep_minutes),
                min_notice_hours = COALESCE($23, min_notice_hours),
                max_lead_months = COALESCE($24, max_lead_months),
                min_stay = COALESCE($25, min_stay),
                blocked_weekdays = COALESCE($26, blocked_weekdays),
                booking_mode = COALESCE($27, booking_mode),
                cancellation_policy = COALESCE($28, cancellation_policy),
                address_visibility = COALESCE($29, address_visibility),
                allows_guest_booking = COALESCE($30, allows_guest_booking),
                allows_overnight = COALESCE($31, allows_overnight)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(&input.address)
            .bind(input.max_capacity)
            .bind(input.base_price)
            .bind(&input.pricing_unit)
            .bind(input.status)
            .bind(&input.amenities)
            .bind(&input.rules)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.place_ref)
            .bind(&input.location_hint)
            .bind(input.weekend_price)
            .bind(input.cleaning_fee)
            .bind(input.deposit_amount)
            .bind(input.deposit_policy)
            .bind(input.check_in_time)
            .bind(input.check_out_time)
            .bind(input.prep_minutes)
            .bind(input.min_notice_hours)
            .bind(input.max_lead_months)
            .bind(input.min_stay)
            .bind(&input.blocked_weekdays)
            .bind(input.booking_mode)
            .bind(&input.cancellation_policy)
            .bind(input.address_visibility)
            .bind(input.allows_guest_booking)
            .bind(input.allows_overnight)
            .fetch_optional(pool)
            .await
    }

    /// Set the publication status, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: SpaceStatus,
    ) -> Result<Option<Space>, sqlx::Error> {
        let query = format!("UPDATE spaces SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Space>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a space by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search the catalog with conjunctive filters and pagination.
    pub async fn search(
        pool: &PgPool,
        filters: &SpaceSearch,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Space>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM spaces WHERE {SEARCH_WHERE}
             ORDER BY created_at DESC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Space>(&query)
            .bind(filters.owner_id)
            .bind(filters.browsing_user_id)
            .bind(filters.text.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.kind.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.amenity.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.min_capacity.filter(|c| *c > 0))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same filters as [`SpaceRepo::search`].
    pub async fn count(pool: &PgPool, filters: &SpaceSearch) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM spaces WHERE {SEARCH_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filters.owner_id)
            .bind(filters.browsing_user_id)
            .bind(filters.text.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.kind.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.amenity.as_deref().map(str::trim).filter(|t| !t.is_empty()))
            .bind(filters.min_capacity.filter(|c| *c > 0))
            .fetch_one(pool)
            .await
    }
}
