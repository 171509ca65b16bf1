use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use bugline_core::config::{AppConfig, ConfigError, LoadOptions};
use bugline_db::repositories::{ReportRepository, SqlReportRepository};
use bugline_db::{connect_with_settings, migrations, DbPool};
use bugline_slack::api::{ChatGateway, HttpChatGateway};

use crate::jira::{IssueTracker, JiraTracker};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub reports: Arc<dyn ReportRepository>,
    pub chat: Arc<dyn ChatGateway>,
    pub tracker: Arc<dyn IssueTracker>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let reports: Arc<dyn ReportRepository> = Arc::new(SqlReportRepository::new(db_pool.clone()));
    let chat: Arc<dyn ChatGateway> =
        Arc::new(HttpChatGateway::new(config.slack.access_token.clone()));
    let tracker: Arc<dyn IssueTracker> = Arc::new(JiraTracker::new(&config.jira));

    Ok(Application { config, db_pool, reports, chat, tracker })
}
