//! The dialog-submission webhook: validate the shared secret, persist a
//! report, then run the post-acknowledgement finalization (file a tracker
//! issue and confirm back into the originating conversation).
//!
//! The acknowledgement is decided before any side effect runs. Persistence
//! and finalization failures are logged and swallowed; they can never change
//! the response, and finalization completes before the request does.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use secrecy::SecretString;
use tracing::{info, warn};
use uuid::Uuid;

use bugline_core::BugReport;
use bugline_db::repositories::ReportRepository;
use bugline_slack::api::ChatGateway;
use bugline_slack::dialog::REPORT_BUG_CALLBACK_ID;
use bugline_slack::payloads::{parse_dialog_submission, verify_token, DialogSubmission};

use crate::jira::{CreatedIssue, IssueTracker, NewIssue};
use crate::respond::{bad_request, empty_json_ack, WebhookError};

#[derive(Clone)]
pub struct InteractiveState {
    pub verification_token: SecretString,
    pub reports: Arc<dyn ReportRepository>,
    pub chat: Arc<dyn ChatGateway>,
    pub tracker: Arc<dyn IssueTracker>,
}

pub fn router(state: InteractiveState) -> Router {
    Router::new().route("/slack/interactive", post(dialog_submission)).with_state(state)
}

async fn dialog_submission(
    State(state): State<InteractiveState>,
    body: String,
) -> Result<Response, (StatusCode, Json<WebhookError>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    let submission = parse_dialog_submission(&body).map_err(|error| {
        warn!(
            event_name = "ingress.slack.submission_rejected",
            correlation_id = %correlation_id,
            error = %error,
            "dialog submission failed to parse"
        );
        bad_request(format!("invalid dialog submission body: {error}"))
    })?;

    if !verify_token(&submission.token, &state.verification_token) {
        warn!(
            event_name = "ingress.slack.submission_rejected",
            correlation_id = %correlation_id,
            user_id = %submission.user.id,
            callback_id = %submission.callback_id,
            "verification token mismatch"
        );
        return Err(bad_request("invalid verification token"));
    }

    if submission.callback_id != REPORT_BUG_CALLBACK_ID {
        warn!(
            event_name = "ingress.slack.submission_unexpected_callback",
            correlation_id = %correlation_id,
            callback_id = %submission.callback_id,
            "submission carries an unexpected callback id; processing anyway"
        );
    }

    let report = BugReport::from_submission(
        submission.user.id.clone(),
        submission.user.name.clone(),
        submission.submission.summary.clone(),
        submission.submission.product.clone(),
        submission.submission.details_or_empty(),
        Utc::now(),
    );

    info!(
        event_name = "ingress.slack.submission_received",
        correlation_id = %correlation_id,
        user_id = %report.user_id,
        product = %report.product,
        summary = %report.summary,
        "dialog submission accepted"
    );

    // The acknowledgement is fixed from here on.
    let ack = empty_json_ack();

    if let Err(error) = state.reports.put(&report).await {
        warn!(
            event_name = "store.report.put_failed",
            correlation_id = %correlation_id,
            user_id = %report.user_id,
            error = %error,
            "report write failed; acknowledging anyway"
        );
    }

    finalize_submission(&state, &submission, &report, &correlation_id).await;

    Ok(ack)
}

/// Best-effort finalization, run synchronously after the acknowledgement is
/// decided: file the tracker issue, then confirm into the channel via the
/// submission's response URL. Any failure ends the chain.
async fn finalize_submission(
    state: &InteractiveState,
    submission: &DialogSubmission,
    report: &BugReport,
    correlation_id: &str,
) {
    let issue = NewIssue::from_report(report);
    let created = match state.tracker.create_issue(&issue).await {
        Ok(created) => created,
        Err(error) => {
            warn!(
                event_name = "egress.tracker.issue_create_failed",
                correlation_id = %correlation_id,
                summary = %issue.summary,
                error = %error,
                "issue creation failed; skipping confirmation"
            );
            return;
        }
    };

    info!(
        event_name = "egress.tracker.issue_created",
        correlation_id = %correlation_id,
        issue_id = %created.id,
        issue_key = %created.key,
        "tracker issue created"
    );

    let text = confirmation_text(&created, &state.tracker.browse_url(&created.key));
    if let Err(error) = state.chat.post_response(&submission.response_url, &text).await {
        warn!(
            event_name = "egress.slack.confirmation_failed",
            correlation_id = %correlation_id,
            issue_key = %created.key,
            error = %error,
            "confirmation post failed"
        );
    }
}

fn confirmation_text(issue: &CreatedIssue, link: &str) -> String {
    format!("Bug submitted - ID: {}, Key: {}, Issue Link: {}", issue.id, issue.key, link)
}
