use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use bugline_core::BugReport;

use super::{ReportRepository, RepositoryError};

/// In-memory stand-in for the report store, mirroring the SQL repository's
/// last-writer-wins key semantics.
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<Vec<BugReport>>,
}

impl InMemoryReportRepository {
    pub async fn reports(&self) -> Vec<BugReport> {
        self.reports.read().await.clone()
    }
}

#[async_trait::async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn put(&self, report: &BugReport) -> Result<(), RepositoryError> {
        let mut reports = self.reports.write().await;
        reports.retain(|existing| {
            existing.user_id != report.user_id || existing.created_at != report.created_at
        });
        reports.push(report.clone());
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut reports = self.reports.write().await;
        let before = reports.len();
        reports.retain(|report| report.expires_at > now.timestamp());
        Ok((before - reports.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use bugline_core::BugReport;

    use crate::repositories::{InMemoryReportRepository, ReportRepository};

    fn report_at(created_at: chrono::DateTime<Utc>) -> BugReport {
        BugReport::from_submission("U1", "casey", "crash on boot", "pixel_kit", "", created_at)
    }

    #[tokio::test]
    async fn put_replaces_entries_that_share_the_key() {
        let repository = InMemoryReportRepository::default();
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(now)).await.expect("first put");
        let mut replacement = report_at(now);
        replacement.summary = "updated".to_owned();
        repository.put(&replacement).await.expect("second put");
        repository.put(&report_at(now + Duration::seconds(5))).await.expect("third put");

        let reports = repository.reports().await;
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().any(|report| report.summary == "updated"));
    }

    #[tokio::test]
    async fn purge_drops_reports_past_their_expiry() {
        let repository = InMemoryReportRepository::default();
        let old = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).single().expect("timestamp");
        let fresh = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(old)).await.expect("old put");
        repository.put(&report_at(fresh)).await.expect("fresh put");

        let purged =
            repository.purge_expired(fresh + Duration::hours(1)).await.expect("purge");

        assert_eq!(purged, 1);
        assert_eq!(repository.reports().await.len(), 1);
    }
}
