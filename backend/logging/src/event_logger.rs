//! Chat Event Logger
//!
//! Structured per-turn events emitted on the `chat_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

/// Longest message excerpt kept in an event.
const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    TurnReceived {
        history_len: usize,
        excerpt: String,
    },
    TurnCompleted {
        model: String,
        finish_reason: Option<String>,
        continued: bool,
        reply_chars: usize,
    },
    TurnRejected {
        reason: String,
    },
    UpstreamError {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub channel: String,
    pub timestamp: DateTime<Utc>,
    pub event: ChatEvent,
}

pub struct ChatEventLogger;

impl ChatEventLogger {
    /// Logs a chat event with free text redacted and truncated.
    pub fn log_event(channel: &str, mut event: ChatEvent) {
        match &mut event {
            ChatEvent::TurnReceived { excerpt, .. } => {
                *excerpt = excerpt_of(excerpt);
            }
            ChatEvent::TurnRejected { reason } => {
                *reason = redact_sensitive_data(reason);
            }
            ChatEvent::UpstreamError { error_msg } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            ChatEvent::TurnCompleted { .. } => {}
        }

        let entry = EventLogEntry {
            channel: channel.into(),
            timestamp: Utc::now(),
            event,
        };

        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "chat_events", event = %json, "Chat event");
    }
}

/// Redact, then cut to `EXCERPT_CHARS` characters.
pub fn excerpt_of(text: &str) -> String {
    let clean = redact_sensitive_data(text);
    if clean.chars().count() <= EXCERPT_CHARS {
        return clean;
    }
    let mut cut: String = clean.chars().take(EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
