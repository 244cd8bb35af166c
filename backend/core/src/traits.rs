use async_trait::async_trait;

use crate::error::ChatError;
use crate::message::Turn;
use crate::types::{FinishReason, GenerationConfig, SafetyRating};

/// Trait for remote generative-language providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier reported back to clients.
    fn model(&self) -> &str;

    /// Submit one user turn with prior history and return the raw reply.
    async fn send_chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ChatError>;
}

/// Request to a chat provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub system_instruction: String,
    /// Normalized window; never starts with a model turn.
    pub history: Vec<Turn>,
    pub user_message: String,
    pub generation: GenerationConfig,
}

/// What the provider returned, before any continuation or fallback handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderReply {
    pub text: String,
    pub finish_reason: Option<FinishReason>,
    /// Prompt-level block reason, when the prompt itself was rejected.
    pub block_reason: Option<FinishReason>,
    pub safety_ratings: Vec<SafetyRating>,
}

impl ProviderReply {
    pub fn text(text: impl Into<String>, finish_reason: FinishReason) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(finish_reason),
            ..Self::default()
        }
    }

    /// Categories whose rating was marked as blocked.
    pub fn blocked_categories(&self) -> Vec<&str> {
        self.safety_ratings
            .iter()
            .filter(|rating| rating.blocked)
            .map(|rating| rating.category.as_str())
            .collect()
    }
}
