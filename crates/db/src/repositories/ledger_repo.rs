//! Repository for the `ledger_entries` table.

use sqlx::{PgExecutor, PgPool};
use venia_core::types::DbId;

use crate::models::ledger::{LedgerEntry, NewLedgerEntry};

const COLUMNS: &str =
    "id, user_id, reservation_id, amount, concept, method, status, entry_type, created_at";

/// Write and read payment-stub entries.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Insert a ledger entry. Takes any executor so it can participate in
    /// the reservation-creation transaction.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewLedgerEntry,
    ) -> Result<LedgerEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO ledger_entries
                (user_id, reservation_id, amount, concept, method, status, entry_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(input.user_id)
            .bind(input.reservation_id)
            .bind(input.amount)
            .bind(&input.concept)
            .bind(&input.method)
            .bind(input.status)
            .bind(input.entry_type)
            .fetch_one(executor)
            .await
    }

    /// List a user's entries, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LedgerEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ledger_entries WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
