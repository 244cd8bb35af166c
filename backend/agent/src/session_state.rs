//! Per-session conversation state for interactive clients.
//!
//! Each client owns one `ChatSession`; nothing is shared between sessions and
//! nothing is persisted.

use plchat_core::{ChatError, Message};

use crate::context_window::DEFAULT_MAX_ITEMS;
use crate::continuation::NO_USABLE_RESPONSE;

pub const WELCOME_MESSAGE: &str = "Hello. This assistant helps you organise product safety and PL (product liability) risks and plan your response.\n\
Share the specifics of your situation and it will lay out the relevant legal points, internal processes, and who to contact.\n\
Please leave out confidential or personal information and treat the answers as reference material.";

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    history_limit: usize,
    awaiting_reply: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A fresh session seeded with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
            history_limit: DEFAULT_MAX_ITEMS,
            awaiting_reply: false,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a turn is in flight (the typing indicator is showing).
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Record user input and start a turn. Returns the trimmed text to send.
    pub fn begin_turn(&mut self, input: &str) -> Result<String, ChatError> {
        let value = input.trim();
        if value.is_empty() {
            return Err(ChatError::InvalidInput(
                crate::chat_service::INVALID_MESSAGE.to_string(),
            ));
        }
        self.messages.push(Message::user(value));
        self.awaiting_reply = true;
        Ok(value.to_string())
    }

    /// History to send with the in-flight turn: everything before it, capped.
    pub fn history_for_request(&self) -> &[Message] {
        let prior = match self.messages.split_last() {
            Some((last, rest)) if self.awaiting_reply && last.role == plchat_core::Role::User => {
                rest
            }
            _ => &self.messages[..],
        };
        let start = prior.len().saturating_sub(self.history_limit);
        &prior[start..]
    }

    /// Finish the turn with the assistant's reply.
    pub fn complete_turn(&mut self, reply: &str) -> &Message {
        let content = match reply.trim() {
            "" => NO_USABLE_RESPONSE,
            trimmed => trimmed,
        };
        self.push_assistant(content.to_string())
    }

    /// Finish the turn with an error shown in place of a reply.
    pub fn fail_turn(&mut self, error: &ChatError) -> &Message {
        self.push_assistant(format!("An error occurred: {error}"))
    }

    /// Drop everything and start over with the welcome message.
    pub fn clear(&mut self) {
        *self = Self::new().with_history_limit(self.history_limit);
    }

    fn push_assistant(&mut self, content: String) -> &Message {
        self.awaiting_reply = false;
        self.messages.push(Message::assistant(content));
        &self.messages[self.messages.len() - 1]
    }
}
