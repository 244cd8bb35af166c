use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the remote model stopped producing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
    /// Any code this crate does not know about, kept verbatim.
    Unknown(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            FinishReason::Stop => "STOP",
            FinishReason::MaxTokens => "MAX_TOKENS",
            FinishReason::Safety => "SAFETY",
            FinishReason::Recitation => "RECITATION",
            FinishReason::Other => "OTHER",
            FinishReason::Unknown(raw) => raw,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, FinishReason::MaxTokens)
    }
}

impl From<&str> for FinishReason {
    fn from(raw: &str) -> Self {
        match raw {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            "OTHER" => FinishReason::Other,
            other => FinishReason::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FinishReason {
    fn from(raw: String) -> Self {
        FinishReason::from(raw.as_str())
    }
}

impl From<FinishReason> for String {
    fn from(reason: FinishReason) -> Self {
        reason.as_str().to_string()
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling and length parameters sent with every remote call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 1024,
        }
    }
}

/// A content-policy rating attached to a prompt or candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: Option<String>,
    pub blocked: bool,
}

/// Outcome of one chat turn after continuation and fallback handling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<FinishReason>,
    /// Whether a continuation call contributed text to `text`.
    pub continued: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_parsing() {
        assert_eq!(FinishReason::from("MAX_TOKENS"), FinishReason::MaxTokens);
        assert!(FinishReason::from("MAX_TOKENS").is_truncated());
        assert!(!FinishReason::Stop.is_truncated());
        assert_eq!(
            FinishReason::from("BLOCKLIST"),
            FinishReason::Unknown("BLOCKLIST".into())
        );
    }

    #[test]
    fn test_finish_reason_serde_uses_wire_codes() {
        let json = serde_json::to_string(&FinishReason::Recitation).unwrap();
        assert_eq!(json, "\"RECITATION\"");
        let back: FinishReason = serde_json::from_str("\"SPII\"").unwrap();
        assert_eq!(back.as_str(), "SPII");
    }

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 1024);
        let json = serde_json::to_value(config).unwrap();
        assert!(json.get("maxOutputTokens").is_some());
    }
}
