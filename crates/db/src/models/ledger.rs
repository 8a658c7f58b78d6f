//! Ledger entry (payment stub) model.
//!
//! Entries simulate charges and refunds for a user's history; no real money
//! moves. One CHARGE/APPROVED entry is written per registered-user
//! reservation; guest reservations produce none.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use venia_core::types::{DbId, Money, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    Approved,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryType {
    Charge,
    Refund,
}

/// A row from the `ledger_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub reservation_id: Option<DbId>,
    pub amount: Money,
    pub concept: String,
    pub method: String,
    pub status: LedgerStatus,
    pub entry_type: LedgerEntryType,
    pub created_at: Timestamp,
}

/// Input for inserting a ledger entry.
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub user_id: DbId,
    pub reservation_id: Option<DbId>,
    pub amount: Money,
    pub concept: String,
    pub method: String,
    pub status: LedgerStatus,
    pub entry_type: LedgerEntryType,
}
