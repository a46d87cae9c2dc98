//! Schema creation and one-time seeding.
//!
//! [`ensure_ready`] is the readiness check: it creates the `campaigns` table
//! if it is missing and inserts [`SEED_CAMPAIGNS`] when the table is empty.
//! The server runs it once before binding its listener and again, cheaply,
//! at the start of every request.

use rusqlite::{params, Connection, Transaction, TransactionBehavior};

use crate::error::StoreError;

const CAMPAIGNS_SQL: &str = include_str!("sql/campaigns.sql");

/// A seed row: `(id, name, status, clicks, cost, impressions)`.
pub type SeedCampaign = (i64, &'static str, &'static str, i64, f64, i64);

/// The fixed dataset inserted into an empty store.
pub const SEED_CAMPAIGNS: &[SeedCampaign] = &[
    (1, "Summer Sale", "Active", 150, 45.99, 1000),
    (2, "Black Friday", "Paused", 320, 89.50, 2500),
    (3, "Spring Launch", "Active", 210, 54.10, 1800),
    (4, "Holiday Blitz", "Active", 540, 132.75, 5000),
    (5, "Clearance", "Paused", 95, 21.40, 900),
    (6, "New Arrivals", "Active", 410, 101.20, 3600),
    (7, "Referral Push", "Active", 88, 19.99, 700),
    (8, "Back to School", "Paused", 275, 73.25, 2400),
    (9, "VIP Upsell", "Active", 160, 62.35, 1200),
    (10, "Reactivation", "Paused", 130, 28.65, 1100),
];

/// Creates the campaigns table if needed and seeds it if it is empty.
///
/// Returns the number of rows inserted: `SEED_CAMPAIGNS.len()` on the first
/// call against a fresh store, `0` afterwards.
///
/// An already seeded store is detected with reads only. Otherwise the table
/// is created and the row count re-checked inside an `IMMEDIATE`
/// transaction, so concurrent callers (including other processes sharing the
/// file) seed exactly once and the rest wait on the busy timeout.
///
/// # Errors
///
/// Returns `StoreError::Database` if the schema cannot be created or the
/// seed transaction fails. A failed seed is rolled back as a whole.
pub fn ensure_ready(conn: &Connection) -> Result<usize, StoreError> {
    if is_seeded(conn)? {
        return Ok(0);
    }

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute_batch(CAMPAIGNS_SQL)?;

    let total: i64 = tx.query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))?;
    if total > 0 {
        tx.commit()?;
        return Ok(0);
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO campaigns (id, name, status, clicks, cost, impressions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (id, name, status, clicks, cost, impressions) in SEED_CAMPAIGNS {
            stmt.execute(params![id, name, status, clicks, cost, impressions])?;
        }
    }
    tx.commit()?;

    tracing::info!(count = SEED_CAMPAIGNS.len(), "seeded campaigns table");
    Ok(SEED_CAMPAIGNS.len())
}

fn is_seeded(conn: &Connection) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'campaigns')",
        [],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(false);
    }

    let seeded: bool =
        conn.query_row("SELECT EXISTS(SELECT 1 FROM campaigns)", [], |row| row.get(0))?;
    Ok(seeded)
}
