//! Periodic removal of expired report rows, standing in for a store-managed
//! TTL. Failures are logged and the loop keeps running.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use bugline_db::repositories::ReportRepository;

pub fn spawn(reports: Arc<dyn ReportRepository>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            purge_once(reports.as_ref()).await;
        }
    });
}

pub async fn purge_once(reports: &dyn ReportRepository) {
    match reports.purge_expired(Utc::now()).await {
        Ok(0) => {}
        Ok(purged) => info!(
            event_name = "store.ttl.purged",
            purged, "expired reports removed from the store"
        ),
        Err(error) => warn!(
            event_name = "store.ttl.purge_failed",
            error = %error,
            "expired report purge failed; will retry on the next tick"
        ),
    }
}
