//! Chat relay endpoint (`POST /api/chat`).

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, instrument};

use plchat_agent::chat_service::INVALID_MESSAGE;
use plchat_core::{ChatError, Message};
use plchat_logging::{ChatEvent, ChatEventLogger};

use crate::error::ApiError;
use crate::server::AppState;

const CHANNEL: &str = "http";

pub const BODY_TOO_LARGE: &str = "The request is too large. Shorten the message and try again.";

/// Raw request body. Fields stay untyped so bad shapes map to our own 400.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub history: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
    pub reply_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continued: Option<bool>,
}

/// Handler for `POST /api/chat`.
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    if !state.service.is_configured() {
        return Err(ChatError::MissingApiKey.into());
    }

    let Json(request) = payload.map_err(|rejection| {
        reject(&rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(BODY_TOO_LARGE.to_string())
        } else {
            ApiError::BadRequest(INVALID_MESSAGE.to_string())
        }
    })?;

    let Some(message) = request.message.as_str() else {
        reject("message is not a string");
        return Err(ApiError::BadRequest(INVALID_MESSAGE.to_string()));
    };
    let history = Message::history_from_wire(&request.history);

    ChatEventLogger::log_event(
        CHANNEL,
        ChatEvent::TurnReceived {
            history_len: history.len(),
            excerpt: message.to_string(),
        },
    );

    let reply = match state.service.reply(message, &history).await {
        Ok(reply) => reply,
        Err(ChatError::InvalidInput(reason)) => {
            reject(&reason);
            return Err(ApiError::BadRequest(reason));
        }
        Err(e) => {
            error!(error = %e, "Gemini API error");
            ChatEventLogger::log_event(
                CHANNEL,
                ChatEvent::UpstreamError {
                    error_msg: e.to_string(),
                },
            );
            return Err(e.into());
        }
    };

    ChatEventLogger::log_event(
        CHANNEL,
        ChatEvent::TurnCompleted {
            model: reply.model.clone(),
            finish_reason: reply.finish_reason.as_ref().map(ToString::to_string),
            continued: reply.continued,
            reply_chars: reply.text.chars().count(),
        },
    );

    let debug = !state.production;
    Ok(Json(ChatResponse {
        reply_html: plchat_markdown::render_html(&reply.text),
        finish_reason: reply
            .finish_reason
            .filter(|_| debug)
            .map(String::from),
        continued: debug.then_some(reply.continued),
        reply: reply.text,
        model: reply.model,
    }))
}

fn reject(reason: &str) {
    ChatEventLogger::log_event(
        CHANNEL,
        ChatEvent::TurnRejected {
            reason: reason.to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::Request,
    };
    use http_body_util::BodyExt;
    use plchat_agent::ChatService;
    use plchat_core::{ChatProvider, FinishReason, ProviderReply, TurnRole};
    use plchat_providers::MockProvider;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::server::build_router;

    fn router_with(mock: Option<Arc<MockProvider>>, production: bool) -> Router {
        let provider = mock.map(|m| m as Arc<dyn ChatProvider>);
        let state = AppState::new(ChatService::new(provider), "public-does-not-exist", production);
        build_router(Arc::new(state))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_success_includes_debug_fields() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("- **Stop** shipment", FinishReason::Stop)),
        );
        let body = json!({
            "message": "What first?",
            "history": [
                {"role": "assistant", "content": "welcome"},
                {"role": "user"},
                {"role": "user", "content": "earlier"},
                {"role": "assistant", "content": "earlier answer"}
            ]
        });
        let (status, json) = post_chat(router_with(Some(mock.clone()), false), &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "- **Stop** shipment");
        assert_eq!(json["model"], "mock-model");
        assert_eq!(json["replyHtml"], "<ul><li><strong>Stop</strong> shipment</li></ul>");
        assert_eq!(json["finishReason"], "STOP");
        assert_eq!(json["continued"], false);

        let requests = mock.requests().await;
        assert_eq!(requests[0].history.len(), 2);
        assert_eq!(requests[0].history[0].role, TurnRole::User);
    }

    #[tokio::test]
    async fn test_production_hides_debug_fields() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (status, json) =
            post_chat(router_with(Some(mock), true), r#"{"message": "hi"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("finishReason").is_none());
        assert!(json.get("continued").is_none());
        assert_eq!(json["reply"], "Mock response");
    }

    #[tokio::test]
    async fn test_empty_message_is_400_without_remote_call() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (status, json) =
            post_chat(router_with(Some(mock.clone()), false), r#"{"message": "   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], INVALID_MESSAGE);
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_string_message_and_bad_json_are_400() {
        let mock = Arc::new(MockProvider::new("mock"));
        let (status, _) =
            post_chat(router_with(Some(mock.clone()), false), r#"{"message": 12}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, json) = post_chat(router_with(Some(mock), false), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_body_is_413_without_remote_call() {
        let mock = Arc::new(MockProvider::new("mock"));
        let body = json!({ "message": "a".repeat(2 * crate::MAX_BODY_BYTES) }).to_string();
        let (status, json) = post_chat(router_with(Some(mock.clone()), false), &body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"], BODY_TOO_LARGE);
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_500() {
        let (status, json) = post_chat(router_with(None, false), r#"{"message": "hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], ChatError::MissingApiKey.to_string());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let mock = Arc::new(MockProvider::new("mock").with_error("model overloaded"));
        let (status, json) =
            post_chat(router_with(Some(mock), false), r#"{"message": "hi"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "model overloaded");
    }

    #[tokio::test]
    async fn test_truncated_reply_is_continued() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("Step 1...", FinishReason::MaxTokens))
                .with_reply(ProviderReply::text(
                    "承知いたしました\nStep 2...\n申し訳ございません",
                    FinishReason::Stop,
                )),
        );
        let (status, json) =
            post_chat(router_with(Some(mock), false), r#"{"message": "recall steps"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "Step 1...\n\nStep 2...");
        assert_eq!(json["continued"], true);
        assert_eq!(json["finishReason"], "MAX_TOKENS");
    }
}
