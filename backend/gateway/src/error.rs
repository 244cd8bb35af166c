use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use plchat_core::ChatError;

/// Error surfaced to HTTP clients as `{ "error": "..." }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// No API key configured.
    NotConfigured(String),
    /// Body over the size limit.
    PayloadTooLarge(String),
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotConfigured(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Upstream(msg) => msg,
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::MissingApiKey => ApiError::NotConfigured(err.to_string()),
            ChatError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ChatError::Upstream { message, .. } => ApiError::Upstream(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_mapping() {
        assert_eq!(ApiError::from(ChatError::MissingApiKey).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::from(ChatError::InvalidInput("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        let upstream = ApiError::from(ChatError::upstream("gemini", "overloaded"));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.message(), "overloaded");
        assert_eq!(
            ApiError::PayloadTooLarge("big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
