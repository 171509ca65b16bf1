use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// A slash-command invocation, decoded from the URL-form-encoded body Slack
/// posts to the command route.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SlashCommandRequest {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub text: String,
    pub trigger_id: String,
    pub response_url: String,
}

/// A dialog submission, decoded from the JSON carried in the interaction
/// body's single `payload` form field.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DialogSubmission {
    #[serde(rename = "type")]
    pub interaction_type: String,
    pub submission: SubmissionValues,
    pub callback_id: String,
    pub user: SubmissionUser,
    #[serde(default)]
    pub action_ts: String,
    pub token: String,
    pub response_url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SubmissionValues {
    pub summary: String,
    pub product: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl SubmissionValues {
    /// Details as entered, with Slack's `null` for untouched optional fields
    /// flattened to an empty string.
    pub fn details_or_empty(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SubmissionUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed form body: {0}")]
    MalformedForm(#[from] serde_urlencoded::de::Error),
    #[error("malformed submission payload: {0}")]
    MalformedSubmission(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct InteractionForm {
    payload: String,
}

/// Parse a slash-command form body. Missing or undecodable fields are a
/// [`PayloadError`], not a panic.
pub fn parse_slash_command(body: &str) -> Result<SlashCommandRequest, PayloadError> {
    Ok(serde_urlencoded::from_str(body)?)
}

/// Parse an interaction form body: unwrap the `payload` field, then decode
/// the dialog submission JSON inside it.
pub fn parse_dialog_submission(body: &str) -> Result<DialogSubmission, PayloadError> {
    let form: InteractionForm = serde_urlencoded::from_str(body)?;
    Ok(serde_json::from_str(&form.payload)?)
}

/// Check an inbound token against the configured verification secret.
pub fn verify_token(supplied: &str, expected: &SecretString) -> bool {
    supplied == expected.expose_secret()
}
