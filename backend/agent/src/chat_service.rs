//! One chat turn end to end: validate, window, call, continue, explain.

use std::sync::Arc;

use plchat_core::{
    ChatError, ChatProvider, ChatReply, GenerationConfig, Message, ProviderRequest,
};
use tracing::{debug, info, instrument};

use crate::context_window::{ConversationWindow, DEFAULT_MAX_ITEMS};
use crate::continuation::{CONTINUATION_PROMPT, ContinuationCoordinator};
use crate::fallback::explain_empty_reply;
use crate::system_prompt::PromptBuilder;

pub const INVALID_MESSAGE: &str = "The message field must contain non-empty text.";

/// Stateless per-request turn handler shared by the relay and the terminal client.
pub struct ChatService {
    provider: Option<Arc<dyn ChatProvider>>,
    generation: GenerationConfig,
    history_limit: usize,
    system_instruction: String,
}

impl ChatService {
    /// A service without a provider answers every turn with `MissingApiKey`.
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self {
            provider,
            generation: GenerationConfig::default(),
            history_limit: DEFAULT_MAX_ITEMS,
            system_instruction: PromptBuilder::system_instruction(),
        }
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model())
    }

    /// Answer `message` given the prior `history` (which must not include `message`).
    #[instrument(skip_all, fields(history = history.len()))]
    pub async fn reply(&self, message: &str, history: &[Message]) -> Result<ChatReply, ChatError> {
        let provider = self.provider.as_deref().ok_or(ChatError::MissingApiKey)?;

        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::InvalidInput(INVALID_MESSAGE.to_string()));
        }

        let window = ConversationWindow::build(history, self.history_limit).into_turns();
        debug!(window = window.len(), "Built conversation window");

        let request = ProviderRequest {
            system_instruction: self.system_instruction.clone(),
            history: window,
            user_message: message.to_string(),
            generation: self.generation,
        };
        let initial = provider.send_chat(&request).await?;

        let text = initial.text.trim();
        if text.is_empty() {
            info!(
                finish_reason = ?initial.finish_reason,
                block_reason = ?initial.block_reason,
                "Provider returned no text"
            );
            return Ok(ChatReply {
                text: explain_empty_reply(&initial),
                model: provider.model().to_string(),
                finish_reason: initial.finish_reason.or(initial.block_reason),
                continued: false,
            });
        }

        let completion = ContinuationCoordinator::new()
            .complete(text, initial.finish_reason.as_ref(), || {
                // The truncated exchange joins the history; the window cap still holds.
                let mut prior = history.to_vec();
                prior.push(Message::user(message));
                prior.push(Message::assistant(text));
                let followup = ProviderRequest {
                    history: ConversationWindow::build(&prior, self.history_limit).into_turns(),
                    user_message: CONTINUATION_PROMPT.to_string(),
                    ..request.clone()
                };
                async move { Ok(provider.send_chat(&followup).await?.text) }
            })
            .await;

        Ok(ChatReply {
            text: completion.text,
            model: provider.model().to_string(),
            finish_reason: initial.finish_reason,
            continued: completion.continued,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plchat_core::{FinishReason, ProviderReply, Turn, TurnRole};
    use plchat_providers::MockProvider;

    fn service(mock: &Arc<MockProvider>) -> ChatService {
        ChatService::new(Some(mock.clone() as Arc<dyn ChatProvider>))
    }

    #[tokio::test]
    async fn test_missing_provider_is_reported() {
        let svc = ChatService::new(None);
        let err = svc.reply("hello", &[]).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingApiKey));
        assert!(svc.model().is_none());
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_before_any_call() {
        let mock = Arc::new(MockProvider::new("mock"));
        let err = service(&mock).reply("   \n", &[]).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidInput(_)));
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_plain_reply_makes_one_call_with_window() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("  Recall plan.  ", FinishReason::Stop)),
        );
        let history = vec![
            Message::assistant("welcome"),
            Message::user("first"),
            Message::assistant("first answer"),
        ];
        let reply = service(&mock).reply(" next ", &history).await.unwrap();
        assert_eq!(reply.text, "Recall plan.");
        assert_eq!(reply.model, "mock-model");
        assert!(!reply.continued);

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_message, "next");
        assert_eq!(requests[0].history.len(), 2);
        assert_eq!(requests[0].history[0].role, TurnRole::User);
    }

    #[tokio::test]
    async fn test_truncated_reply_triggers_single_continuation() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("Step 1...", FinishReason::MaxTokens))
                .with_reply(ProviderReply::text(
                    "承知いたしました\nStep 2...\n申し訳ございません",
                    FinishReason::MaxTokens,
                )),
        );
        let reply = service(&mock).reply("How do I run a recall?", &[]).await.unwrap();
        assert_eq!(reply.text, "Step 1...\n\nStep 2...");
        assert!(reply.continued);
        assert_eq!(reply.finish_reason, Some(FinishReason::MaxTokens));

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 2);
        let followup = &requests[1];
        assert_eq!(followup.user_message, CONTINUATION_PROMPT);
        assert_eq!(
            followup.history,
            vec![Turn::user("How do I run a recall?"), Turn::model("Step 1...")]
        );
    }

    #[tokio::test]
    async fn test_continuation_failure_keeps_truncated_reply() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("Step 1...", FinishReason::MaxTokens))
                .with_error("upstream unavailable"),
        );
        let reply = service(&mock).reply("question", &[]).await.unwrap();
        assert_eq!(reply.text, "Step 1...");
        assert!(!reply.continued);
    }

    #[tokio::test]
    async fn test_upstream_failure_on_first_call_propagates() {
        let mock = Arc::new(MockProvider::new("mock").with_error("quota exceeded"));
        let err = service(&mock).reply("question", &[]).await.unwrap_err();
        assert!(err.is_upstream());
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_empty_truncated_reply_is_explained_not_continued() {
        let mock = Arc::new(
            MockProvider::new("mock").with_reply(ProviderReply::text("", FinishReason::MaxTokens)),
        );
        let reply = service(&mock).reply("question", &[]).await.unwrap();
        assert!(reply.text.contains("too long"));
        assert_eq!(mock.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_history_limit_is_applied() {
        let mock = Arc::new(
            MockProvider::new("mock").with_reply(ProviderReply::text("ok", FinishReason::Stop)),
        );
        let history: Vec<Message> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{i}"))
                } else {
                    Message::assistant(format!("a{i}"))
                }
            })
            .collect();
        service(&mock)
            .with_history_limit(4)
            .reply("more", &history)
            .await
            .unwrap();
        let requests = mock.requests().await;
        assert_eq!(requests[0].history.len(), 4);
        assert_eq!(requests[0].history[0].text, "q16");
    }

    #[tokio::test]
    async fn test_continuation_window_stays_within_limit() {
        let mock = Arc::new(
            MockProvider::new("mock")
                .with_reply(ProviderReply::text("Step 1...", FinishReason::MaxTokens))
                .with_reply(ProviderReply::text("Step 2...", FinishReason::Stop)),
        );
        let history: Vec<Message> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{i}"))
                } else {
                    Message::assistant(format!("a{i}"))
                }
            })
            .collect();
        let reply = service(&mock).reply("next", &history).await.unwrap();
        assert!(reply.continued);

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 2);
        let followup = &requests[1].history;
        assert!(followup.len() <= DEFAULT_MAX_ITEMS);
        assert_eq!(followup[0].role, TurnRole::User);
        assert_eq!(followup[followup.len() - 2], Turn::user("next"));
        assert_eq!(followup[followup.len() - 1], Turn::model("Step 1..."));
    }
}
