//! One-shot continuation of replies cut off by the output-token limit.

use std::future::Future;

use plchat_core::{ChatError, FinishReason};
use tracing::{debug, warn};

use crate::boilerplate::clean_continuation;

/// Instruction sent as the follow-up user turn.
pub const CONTINUATION_PROMPT: &str = "Your previous answer was cut off. \
Give only the remaining key points as a short bulleted list. \
Do not repeat apologies, greetings, or acknowledgements. \
前回の回答の続きとして、残りの要点だけを短い箇条書きで示してください。謝罪や挨拶は繰り返さないでください。";

/// Substituted when nothing usable is left after all processing.
pub const NO_USABLE_RESPONSE: &str = "no usable response was obtained.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationState {
    Initial,
    Continuing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Whether cleaned continuation text was appended.
    pub continued: bool,
}

/// Drives a single reply from `Initial` to `Done`, issuing at most one follow-up.
#[derive(Debug)]
pub struct ContinuationCoordinator {
    state: ContinuationState,
}

impl Default for ContinuationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContinuationCoordinator {
    pub fn new() -> Self {
        Self {
            state: ContinuationState::Initial,
        }
    }

    pub fn state(&self) -> ContinuationState {
        self.state
    }

    /// Finish `initial_reply`, calling `send_followup` once if it was truncated.
    ///
    /// Follow-up failures are logged and swallowed; the initial reply is kept.
    /// Once `Done`, later calls never issue another follow-up.
    pub async fn complete<F, Fut>(
        &mut self,
        initial_reply: &str,
        finish_reason: Option<&FinishReason>,
        send_followup: F,
    ) -> Completion
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ChatError>>,
    {
        let initial = initial_reply.trim();
        let truncated = finish_reason.is_some_and(FinishReason::is_truncated);

        let mut text = initial.to_string();
        let mut continued = false;

        if self.state == ContinuationState::Initial && truncated && !initial.is_empty() {
            self.state = ContinuationState::Continuing;
            debug!("Reply hit the output limit, requesting continuation");

            match send_followup().await {
                Ok(raw) => {
                    let cleaned = clean_continuation(&raw);
                    if cleaned.is_empty() {
                        debug!("Continuation was empty after cleaning");
                    } else {
                        text = format!("{initial}\n\n{cleaned}");
                        continued = true;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Continuation request failed, keeping truncated reply");
                }
            }
        }
        self.state = ContinuationState::Done;

        if text.is_empty() {
            text = NO_USABLE_RESPONSE.to_string();
        }

        Completion { text, continued }
    }
}

/// Convenience wrapper running a fresh coordinator.
pub async fn complete<F, Fut>(
    initial_reply: &str,
    finish_reason: Option<&FinishReason>,
    send_followup: F,
) -> Completion
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, ChatError>>,
{
    ContinuationCoordinator::new()
        .complete(initial_reply, finish_reason, send_followup)
        .await
}
