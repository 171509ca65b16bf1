//! Jira issue filing for submitted bug reports.
//!
//! Issues land in a fixed project with a fixed type, label, and priority;
//! only summary and description vary per report. The tracker is a trait seam
//! so the interactive handler can be exercised without network access.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use bugline_core::config::JiraConfig;
use bugline_core::BugReport;

pub const JIRA_PROJECT_KEY: &str = "IQ";
const ISSUE_TYPE: &str = "Bug";
const ISSUE_LABEL: &str = "slack";
const ISSUE_PRIORITY: &str = "Not Yet Prioritized";

/// The variable part of an issue-creation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIssue {
    pub summary: String,
    pub description: String,
}

impl NewIssue {
    pub fn from_report(report: &BugReport) -> Self {
        Self {
            summary: report.summary.clone(),
            description: format!(
                "Product: {}\nReporter: {}\n\n{}",
                report.product_name(),
                report.user_name,
                report.details
            ),
        }
    }
}

/// Identifiers assigned by the tracker on creation. Held only long enough to
/// compose the confirmation message.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("tracker credentials are not configured")]
    Unconfigured,
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError>;
    fn browse_url(&self, key: &str) -> String;
}

/// reqwest-backed tracker, basic-authenticated against the Jira REST API.
pub struct JiraTracker {
    http: Client,
    host: String,
    user: String,
    api_token: SecretString,
}

impl JiraTracker {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            http: Client::new(),
            host: config.host.clone(),
            user: config.user.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn issue_endpoint(&self) -> String {
        format!("https://{}/rest/api/2/issue/", self.host)
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        if self.host.trim().is_empty() {
            return Err(TrackerError::Unconfigured);
        }

        let fields = json!({
            "fields": {
                "project": { "key": JIRA_PROJECT_KEY },
                "summary": issue.summary,
                "description": issue.description,
                "issuetype": { "name": ISSUE_TYPE },
                "labels": [ISSUE_LABEL],
                "priority": { "name": ISSUE_PRIORITY },
            }
        });

        let created = self
            .http
            .post(self.issue_endpoint())
            .basic_auth(&self.user, Some(self.api_token.expose_secret()))
            .json(&fields)
            .send()
            .await?
            .json::<CreatedIssue>()
            .await?;

        Ok(created)
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://{}/projects/{}/issues/{}", self.host, JIRA_PROJECT_KEY, key)
    }
}
