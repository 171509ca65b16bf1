use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use bugline_core::BugReport;

pub mod memory;
pub mod report;

pub use memory::InMemoryReportRepository;
pub use report::SqlReportRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Persistence seam for bug reports.
///
/// `put` is a single unconditional insert keyed by `(user_id, created_at)`:
/// a second write under the same key wins outright, and two submissions at
/// different instants land as two rows. `purge_expired` drops rows whose
/// TTL instant has passed.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn put(&self, report: &BugReport) -> Result<(), RepositoryError>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
