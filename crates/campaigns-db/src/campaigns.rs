//! Read queries over the `campaigns` table.
//!
//! Rows are converted through [`CampaignColumns`], which resolves every
//! column position against the prepared statement once and then reads each
//! row by index. A statement that does not expose one of the six columns is
//! rejected before any row is read.

use campaigns_types::{Campaign, CampaignStatus, CampaignSummary};
use rusqlite::{Connection, Row, Statement};

use crate::error::StoreError;

const SELECT_CAMPAIGNS: &str =
    "SELECT id, name, status, clicks, cost, impressions FROM campaigns";

/// Column positions for mapping a result row into a [`Campaign`].
#[derive(Debug, Clone, Copy)]
pub struct CampaignColumns {
    id: usize,
    name: usize,
    status: usize,
    clicks: usize,
    cost: usize,
    impressions: usize,
}

impl CampaignColumns {
    /// Resolves the column positions of a prepared statement.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingColumn` naming the first column the
    /// statement does not produce.
    pub fn resolve(stmt: &Statement<'_>) -> Result<Self, StoreError> {
        let index = |name: &'static str| {
            stmt.column_index(name)
                .map_err(|_| StoreError::MissingColumn(name))
        };

        Ok(Self {
            id: index("id")?,
            name: index("name")?,
            status: index("status")?,
            clicks: index("clicks")?,
            cost: index("cost")?,
            impressions: index("impressions")?,
        })
    }

    /// Converts one result row into a [`Campaign`].
    ///
    /// `cost` is always read as `f64`; integer storage is widened.
    pub fn read(&self, row: &Row<'_>) -> rusqlite::Result<Campaign> {
        Ok(Campaign {
            id: row.get(self.id)?,
            name: row.get(self.name)?,
            status: row.get(self.status)?,
            clicks: row.get(self.clicks)?,
            cost: row.get(self.cost)?,
            impressions: row.get(self.impressions)?,
        })
    }
}

/// Lists campaigns ordered by ascending `id`, optionally filtered by status.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure or
/// `StoreError::MissingColumn` if the result set cannot be mapped.
pub fn list_campaigns(
    conn: &Connection,
    status: Option<CampaignStatus>,
) -> Result<Vec<Campaign>, StoreError> {
    let sql = match status {
        Some(_) => format!("{SELECT_CAMPAIGNS} WHERE status = ?1 ORDER BY id"),
        None => format!("{SELECT_CAMPAIGNS} ORDER BY id"),
    };

    let mut stmt = conn.prepare(&sql)?;
    let columns = CampaignColumns::resolve(&stmt)?;

    let read = |row: &Row<'_>| columns.read(row);
    let rows = match status {
        Some(status) => stmt.query_map([status.as_str()], read)?,
        None => stmt.query_map([], read)?,
    };

    let mut campaigns = Vec::new();
    for row in rows {
        campaigns.push(row?);
    }

    tracing::debug!(
        status = status.map(CampaignStatus::as_str),
        count = campaigns.len(),
        "listed campaigns"
    );

    Ok(campaigns)
}

/// Sums clicks, cost and impressions over the campaigns matching `status`.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn summarize_campaigns(
    conn: &Connection,
    status: Option<CampaignStatus>,
) -> Result<CampaignSummary, StoreError> {
    const TOTALS: &str = "SELECT COUNT(*),
                COALESCE(SUM(clicks), 0),
                COALESCE(SUM(cost), 0.0),
                COALESCE(SUM(impressions), 0)
         FROM campaigns";

    let read = |row: &Row<'_>| -> rusqlite::Result<CampaignSummary> {
        Ok(CampaignSummary {
            status,
            count: row.get(0)?,
            clicks: row.get(1)?,
            cost: row.get(2)?,
            impressions: row.get(3)?,
        })
    };

    let summary = match status {
        Some(s) => conn.query_row(
            &format!("{TOTALS} WHERE status = ?1"),
            [s.as_str()],
            read,
        )?,
        None => conn.query_row(TOTALS, [], read)?,
    };

    Ok(summary)
}
