//! Shared types for the campaign analytics service.
//!
//! This crate holds the record shapes that cross crate boundaries: the
//! [`Campaign`] row as it is stored and served, the [`CampaignStatus`] filter
//! value, and the [`CampaignSummary`] aggregate. Both `campaigns-db` and
//! `campaigns-server` depend on it; it depends on nothing internal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Human-readable name of the service, returned by the health endpoint.
pub const SERVICE_NAME: &str = "Campaign Analytics Mock API";

/// A single advertising campaign.
///
/// Field order matches the JSON shape served by `GET /campaigns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Stable primary key.
    pub id: i64,
    /// Display label.
    pub name: String,
    /// Lifecycle status as stored. Normally `Active` or `Paused`, but the
    /// store does not enforce it.
    pub status: String,
    /// Total clicks.
    pub clicks: i64,
    /// Total spend. Always serialized as a float.
    pub cost: f64,
    /// Total impressions.
    pub impressions: i64,
}

/// The statuses a campaign filter may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    /// The campaign is running.
    Active,
    /// The campaign is suspended.
    Paused,
}

impl CampaignStatus {
    /// Every status, in display order.
    pub const ALL: [CampaignStatus; 2] = [Self::Active, Self::Paused];

    /// Returns the canonical string stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
        }
    }

    /// Parses a user-supplied filter value.
    ///
    /// The first character is uppercased and the rest lowercased before
    /// comparing against the canonical names, so `active`, `ACTIVE` and
    /// `Active` all select [`CampaignStatus::Active`]. Surrounding whitespace
    /// is not trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCampaignStatusError`] if the normalized value is not a
    /// known status.
    pub fn normalize(raw: &str) -> Result<Self, ParseCampaignStatusError> {
        capitalize(raw).parse()
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = ParseCampaignStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseCampaignStatusError(s.to_string()))
    }
}

/// Error returned when a status filter does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status must be {}", expected_statuses())]
pub struct ParseCampaignStatusError(pub String);

fn expected_statuses() -> String {
    CampaignStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Totals over a (possibly filtered) set of campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSummary {
    /// The status filter the totals were computed for, if any.
    pub status: Option<CampaignStatus>,
    /// Number of campaigns included.
    pub count: i64,
    /// Sum of clicks.
    pub clicks: i64,
    /// Sum of cost.
    pub cost: f64,
    /// Sum of impressions.
    pub impressions: i64,
}
