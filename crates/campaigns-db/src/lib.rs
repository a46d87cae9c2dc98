//! Storage layer for the campaign analytics service.
//!
//! Provides SQLite connection pooling (via `r2d2`), the readiness check that
//! creates and seeds the `campaigns` table, and the read queries served over
//! HTTP.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: the store is a single local file; WAL allows
//!   concurrent readers alongside the one-time seeding writer.
//! - **Explicit store path**: the database location is always passed in by
//!   the caller, so tests run against their own temporary file.
//! - **Seed once**: seeding is guarded by a row count and runs inside one
//!   transaction. Nothing in this crate updates or deletes rows.

mod campaigns;
mod error;
mod pool;
mod schema;

pub use campaigns::{list_campaigns, summarize_campaigns, CampaignColumns};
pub use error::StoreError;
pub use pool::{create_pool, DbPool, DbRuntimeSettings};
pub use schema::{ensure_ready, SeedCampaign, SEED_CAMPAIGNS};
