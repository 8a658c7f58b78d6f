//! Repository for the `reservations` table.
//!
//! Creation is transactional: a per-space advisory lock serializes the
//! overlap check against concurrent inserts for the same space, so two
//! requests for overlapping windows can never both commit.

use sqlx::PgPool;
use venia_core::types::{DbId, Timestamp};

use crate::models::ledger::{LedgerEntryType, LedgerStatus, NewLedgerEntry};
use crate::models::reservation::{
    BookingParty, NewReservation, OwnerReservationSummary, Reservation, UserReservationSummary,
};
use crate::repositories::LedgerRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, space_id, user_id, starts_at, ends_at, total_price, status, \
     guest_name, guest_email, guest_phone, created_at";

/// Provides reservation persistence, including the race-free creation path.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Atomically create a confirmed reservation if the window is free.
    ///
    /// Takes `pg_advisory_xact_lock` keyed by the space ID, re-checks the
    /// half-open overlap condition against pending and confirmed rows, then
    /// inserts. For registered users a charge ledger entry is written in the
    /// same transaction. Returns `Ok(None)` when the window is already taken.
    pub async fn create_confirmed(
        pool: &PgPool,
        input: &NewReservation,
        space_name: &str,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.space_id)
            .execute(&mut *tx)
            .await?;

        let conflicts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reservations
             WHERE space_id = $1
               AND status IN ('pending', 'confirmed')
               AND starts_at < $3
               AND ends_at > $2",
        )
        .bind(input.space_id)
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&mut *tx)
        .await?;

        if conflicts > 0 {
            // Rolls back on drop; nothing was written.
            return Ok(None);
        }

        let (user_id, guest_name, guest_email, guest_phone) = match &input.party {
            BookingParty::Registered(user_id) => (Some(*user_id), None, None, None),
            BookingParty::Guest(contact) => (
                None,
                Some(contact.name.as_str()),
                Some(contact.email.as_str()),
                contact.phone.as_deref(),
            ),
        };

        let insert = format!(
            "INSERT INTO reservations
                (space_id, user_id, starts_at, ends_at, total_price, status,
                 guest_name, guest_email, guest_phone)
             VALUES ($1, $2, $3, $4, $5, 'confirmed', $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&insert)
            .bind(input.space_id)
            .bind(user_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.total_price)
            .bind(guest_name)
            .bind(guest_email)
            .bind(guest_phone)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(user_id) = user_id {
            LedgerRepo::insert(
                &mut *tx,
                &NewLedgerEntry {
                    user_id,
                    reservation_id: Some(reservation.id),
                    amount: reservation.total_price,
                    concept: format!("Reservation - {space_name}"),
                    method: "Simulated (account balance)".to_string(),
                    status: LedgerStatus::Approved,
                    entry_type: LedgerEntryType::Charge,
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(Some(reservation))
    }

    /// Find a reservation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a reservation cancelled. Returns `false` if it was already
    /// cancelled (or does not exist).
    pub async fn set_cancelled(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'cancelled'
             WHERE id = $1 AND status <> 'cancelled'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A registered user's reservations, newest stay first, with space
    /// details denormalized for rendering.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserReservationSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserReservationSummary>(
            "SELECT r.id, r.space_id, s.name AS space_name, s.address AS space_address,
                (SELECT i.url FROM space_images i
                  WHERE i.space_id = s.id ORDER BY i.position LIMIT 1) AS space_image_url,
                r.starts_at, r.ends_at, r.status, r.total_price,
                s.base_price, s.pricing_unit
             FROM reservations r
             JOIN spaces s ON s.id = r.space_id
             WHERE r.user_id = $1
             ORDER BY r.starts_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All reservations for a space, earliest first. Requester contact falls
    /// back to the guest columns when no user is attached.
    pub async fn list_for_space(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Vec<OwnerReservationSummary>, sqlx::Error> {
        sqlx::query_as::<_, OwnerReservationSummary>(
            "SELECT r.id, r.user_id,
                COALESCE(u.first_name || ' ' || u.last_name, r.guest_name) AS requester_name,
                COALESCE(u.email, r.guest_email) AS requester_email,
                r.starts_at, r.ends_at, r.status, r.total_price
             FROM reservations r
             LEFT JOIN users u ON u.id = r.user_id
             WHERE r.space_id = $1
             ORDER BY r.starts_at ASC",
        )
        .bind(space_id)
        .fetch_all(pool)
        .await
    }

    /// Start/end pairs of every non-cancelled reservation for a space, used
    /// to expand the occupied-dates calendar.
    pub async fn active_intervals(
        pool: &PgPool,
        space_id: DbId,
    ) -> Result<Vec<(Timestamp, Timestamp)>, sqlx::Error> {
        sqlx::query_as::<_, (Timestamp, Timestamp)>(
            "SELECT starts_at, ends_at FROM reservations
             WHERE space_id = $1 AND status <> 'cancelled'",
        )
        .bind(space_id)
        .fetch_all(pool)
        .await
    }
}
