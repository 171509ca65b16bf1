use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::dialog::DialogOpenRequest;

pub const DIALOG_OPEN_URL: &str = "https://slack.com/api/dialog.open";

#[derive(Debug, Error)]
pub enum ChatApiError {
    #[error("chat transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat api rejected the call: {0}")]
    Api(String),
}

/// Slack Web API envelope: `ok` plus an error code when `ok` is false.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiStatus {
    fn into_result(self) -> Result<(), ChatApiError> {
        if self.ok {
            Ok(())
        } else {
            Err(ChatApiError::Api(self.error.unwrap_or_else(|| "unknown_error".to_owned())))
        }
    }
}

/// Outbound chat calls made by the handlers. A trait seam so tests can
/// observe or script the calls without touching the network.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn open_dialog(&self, request: &DialogOpenRequest) -> Result<(), ChatApiError>;
    async fn post_response(&self, response_url: &str, text: &str) -> Result<(), ChatApiError>;
}

/// reqwest-backed gateway, bearer-authenticated with the configured access
/// token on both the `dialog.open` call and response-URL posts.
pub struct HttpChatGateway {
    http: Client,
    access_token: SecretString,
    dialog_open_url: String,
}

impl HttpChatGateway {
    pub fn new(access_token: SecretString) -> Self {
        Self { http: Client::new(), access_token, dialog_open_url: DIALOG_OPEN_URL.to_owned() }
    }

    pub fn with_dialog_open_url(mut self, url: impl Into<String>) -> Self {
        self.dialog_open_url = url.into();
        self
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn open_dialog(&self, request: &DialogOpenRequest) -> Result<(), ChatApiError> {
        let status: ApiStatus = self
            .http
            .post(&self.dialog_open_url)
            .bearer_auth(self.access_token.expose_secret())
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        debug!(ok = status.ok, error = status.error.as_deref(), "dialog.open response decoded");
        status.into_result()
    }

    async fn post_response(&self, response_url: &str, text: &str) -> Result<(), ChatApiError> {
        let response = self
            .http
            .post(response_url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&json!({ "text": text }))
            .send()
            .await?;

        debug!(status = %response.status(), "response-url post completed");
        Ok(())
    }
}

/// Gateway that accepts every call without doing anything. Wired in when no
/// network access is wanted, e.g. handler tests.
#[derive(Default)]
pub struct NoopChatGateway;

#[async_trait]
impl ChatGateway for NoopChatGateway {
    async fn open_dialog(&self, _request: &DialogOpenRequest) -> Result<(), ChatApiError> {
        Ok(())
    }

    async fn post_response(&self, _response_url: &str, _text: &str) -> Result<(), ChatApiError> {
        Ok(())
    }
}
