//! Explanations for replies that came back without any text.

use plchat_core::{FinishReason, ProviderReply};

const SAFETY_PREFIX: &str = "Google Gemini blocked the response under its safety policy.";
const SAFETY_SUFFIX: &str =
    "Please rephrase the question without sensitive details and send it again.";
const OTHER_TEXT: &str = "Google Gemini did not generate a response because of a policy or system decision. Please rephrase and try again.";
const MAX_TOKENS_TEXT: &str = "The response became too long and stopped early. Please split the question into more specific parts and try again.";
const RECITATION_TEXT: &str = "The content cannot be returned because of copyright or similar restrictions. Try asking for an overview or the key points instead.";
const GENERIC_TEXT: &str = "No valid response was obtained from the Gemini API. Please wait a moment and retry, or rephrase the question.";

/// Map an empty reply to a user-facing explanation based on why it stopped.
pub fn explain_empty_reply(reply: &ProviderReply) -> String {
    let reason = reply.finish_reason.as_ref().or(reply.block_reason.as_ref());
    match reason {
        Some(FinishReason::Safety) => {
            let categories = reply.blocked_categories();
            if categories.is_empty() {
                format!("{SAFETY_PREFIX} {SAFETY_SUFFIX}")
            } else {
                format!(
                    "{SAFETY_PREFIX} Blocked categories: {}. {SAFETY_SUFFIX}",
                    categories.join(", ")
                )
            }
        }
        Some(FinishReason::Other) => OTHER_TEXT.to_string(),
        Some(FinishReason::MaxTokens) => MAX_TOKENS_TEXT.to_string(),
        Some(FinishReason::Recitation) => RECITATION_TEXT.to_string(),
        _ => GENERIC_TEXT.to_string(),
    }
}
