use chrono::{DateTime, Utc};

use bugline_core::BugReport;

use super::{ReportRepository, RepositoryError};
use crate::DbPool;

pub struct SqlReportRepository {
    pool: DbPool,
}

impl SqlReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReportRepository for SqlReportRepository {
    async fn put(&self, report: &BugReport) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO bug_report \
                 (user_id, user_name, summary, product, details, created_at, updated_at, expires_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&report.user_id)
        .bind(&report.user_name)
        .bind(&report.summary)
        .bind(&report.product)
        .bind(&report.details)
        .bind(report.created_at.to_rfc3339())
        .bind(report.updated_at.to_rfc3339())
        .bind(report.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM bug_report WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use sqlx::Row;

    use bugline_core::BugReport;

    use crate::repositories::{ReportRepository, SqlReportRepository};
    use crate::{connect_with_settings, migrations};

    async fn prepared_pool() -> crate::DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrate");
        pool
    }

    fn report_at(created_at: chrono::DateTime<Utc>) -> BugReport {
        BugReport::from_submission(
            "U1",
            "casey",
            "crash on boot",
            "pixel_kit",
            "",
            created_at,
        )
    }

    #[tokio::test]
    async fn put_persists_every_field() {
        let pool = prepared_pool().await;
        let repository = SqlReportRepository::new(pool.clone());
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(now)).await.expect("put");

        let row = sqlx::query("SELECT * FROM bug_report")
            .fetch_one(&pool)
            .await
            .expect("fetch row");
        assert_eq!(row.get::<String, _>("user_id"), "U1");
        assert_eq!(row.get::<String, _>("user_name"), "casey");
        assert_eq!(row.get::<String, _>("summary"), "crash on boot");
        assert_eq!(row.get::<String, _>("product"), "pixel_kit");
        assert_eq!(row.get::<String, _>("details"), "N/A");
        assert_eq!(row.get::<String, _>("created_at"), row.get::<String, _>("updated_at"));
        assert_eq!(row.get::<i64, _>("expires_at"), now.timestamp() + 7 * 24 * 60 * 60);

        pool.close().await;
    }

    #[tokio::test]
    async fn same_key_write_is_last_writer_wins() {
        let pool = prepared_pool().await;
        let repository = SqlReportRepository::new(pool.clone());
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(now)).await.expect("first put");
        let mut second = report_at(now);
        second.summary = "crash on boot, second attempt".to_owned();
        repository.put(&second).await.expect("second put");

        let rows = sqlx::query("SELECT summary FROM bug_report")
            .fetch_all(&pool)
            .await
            .expect("fetch rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get::<String, _>("summary"), "crash on boot, second attempt");

        pool.close().await;
    }

    #[tokio::test]
    async fn distinct_submission_instants_produce_distinct_rows() {
        let pool = prepared_pool().await;
        let repository = SqlReportRepository::new(pool.clone());
        let first = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(first)).await.expect("first put");
        repository.put(&report_at(first + Duration::seconds(1))).await.expect("second put");

        let count = sqlx::query("SELECT COUNT(*) AS count FROM bug_report")
            .fetch_one(&pool)
            .await
            .expect("count")
            .get::<i64, _>("count");
        assert_eq!(count, 2);

        pool.close().await;
    }

    #[tokio::test]
    async fn purge_removes_only_expired_rows() {
        let pool = prepared_pool().await;
        let repository = SqlReportRepository::new(pool.clone());
        let old = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).single().expect("timestamp");
        let fresh = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("timestamp");

        repository.put(&report_at(old)).await.expect("old put");
        repository.put(&report_at(fresh)).await.expect("fresh put");

        let purged = repository
            .purge_expired(fresh + Duration::hours(1))
            .await
            .expect("purge");
        assert_eq!(purged, 1);

        let remaining = sqlx::query("SELECT created_at FROM bug_report")
            .fetch_all(&pool)
            .await
            .expect("fetch rows");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get::<String, _>("created_at"), fresh.to_rfc3339());

        pool.close().await;
    }
}
