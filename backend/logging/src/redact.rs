//! Log Redaction Layer
//!
//! Scrubs Gemini API keys, key query parameters, and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z\-_]{20,}").unwrap());
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = GOOGLE_KEY_RE.replace_all(input, "[REDACTED_KEY]");
    let redacted = KEY_PARAM_RE.replace_all(&redacted, "${1}[REDACTED_KEY]");
    BEARER_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "calling https://example.test/v1?alt=json&key=abc123 with AIzaSyA1234567890abcdefghijKLMN and Bearer eyJhbGciOi";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("abc123"));
        assert!(!clean.contains("AIzaSyA1234567890"));
        assert!(!clean.contains("eyJhbGciOi"));
        assert!(clean.contains("&key=[REDACTED_KEY]"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let raw = "Recall scope covers lot 42 (PL法 applies).";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
