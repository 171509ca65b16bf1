//! The slash-command webhook: validate the shared secret, then open the
//! bug-report dialog for the invoking user.
//!
//! The acknowledgement is decided as soon as the token validates; the
//! dialog-open call's outcome is observed in the logs only.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use tracing::{info, warn};
use uuid::Uuid;

use bugline_slack::api::ChatGateway;
use bugline_slack::dialog::{bug_report_dialog, DialogOpenRequest};
use bugline_slack::payloads::{parse_slash_command, verify_token};

use crate::respond::{bad_request, empty_json_ack, WebhookError};

#[derive(Clone)]
pub struct CommandState {
    pub verification_token: SecretString,
    pub chat: Arc<dyn ChatGateway>,
}

pub fn router(state: CommandState) -> Router {
    Router::new().route("/slack/command", post(slash_command)).with_state(state)
}

async fn slash_command(
    State(state): State<CommandState>,
    body: String,
) -> Result<Response, (StatusCode, Json<WebhookError>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();

    let request = parse_slash_command(&body).map_err(|error| {
        warn!(
            event_name = "ingress.slack.command_rejected",
            correlation_id = %correlation_id,
            error = %error,
            "slash command body failed to parse"
        );
        bad_request(format!("invalid slash command body: {error}"))
    })?;

    if !verify_token(&request.token, &state.verification_token) {
        warn!(
            event_name = "ingress.slack.command_rejected",
            correlation_id = %correlation_id,
            user_id = %request.user_id,
            channel_id = %request.channel_id,
            "verification token mismatch"
        );
        return Err(bad_request("invalid verification token"));
    }

    info!(
        event_name = "ingress.slack.command_received",
        correlation_id = %correlation_id,
        user_id = %request.user_id,
        channel_id = %request.channel_id,
        trigger_id = %request.trigger_id,
        text = %request.text,
        "slash command accepted"
    );

    let open = DialogOpenRequest {
        trigger_id: request.trigger_id.clone(),
        dialog: bug_report_dialog(&request.text),
    };

    match state.chat.open_dialog(&open).await {
        Ok(()) => info!(
            event_name = "egress.slack.dialog_opened",
            correlation_id = %correlation_id,
            trigger_id = %request.trigger_id,
            "bug-report dialog opened"
        ),
        Err(error) => warn!(
            event_name = "egress.slack.dialog_open_failed",
            correlation_id = %correlation_id,
            trigger_id = %request.trigger_id,
            error = %error,
            "dialog open failed; acknowledging anyway"
        ),
    }

    Ok(empty_json_ack())
}
