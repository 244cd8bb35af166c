use thiserror::Error;

/// Top-level error type for a chat turn.
///
/// Every variant is terminal for the turn it occurs in; nothing is resubmitted.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Gemini API key is not configured.")]
    MissingApiKey,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{message}")]
    Upstream { provider: String, message: String },
}

impl ChatError {
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from the remote model rather than from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_is_provider_message() {
        let err = ChatError::upstream("gemini", "quota exhausted");
        assert_eq!(err.to_string(), "quota exhausted");
        assert!(err.is_upstream());
    }

    #[test]
    fn test_invalid_input_is_not_upstream() {
        let err = ChatError::InvalidInput("empty".into());
        assert!(!err.is_upstream());
    }
}
