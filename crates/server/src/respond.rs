use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body returned with every 400 rejection.
#[derive(Debug, Serialize)]
pub struct WebhookError {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<WebhookError>) {
    (StatusCode::BAD_REQUEST, Json(WebhookError { error: message.into() }))
}

/// The acknowledgement both webhook routes return once the token validates:
/// 200, empty body, JSON content type.
pub fn empty_json_ack() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], String::new()).into_response()
}
