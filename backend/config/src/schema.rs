use serde::{Deserialize, Serialize};

use plchat_core::GenerationConfig;

use crate::defaults::*;

/// Deployment environment; `Production` hides debug fields from API responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    #[default]
    Development,
    Production,
}

impl RuntimeEnv {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub generation: GenerationConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            generation: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
                top_p: DEFAULT_TOP_P,
                top_k: DEFAULT_TOP_K,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
    /// Directory for daily-rotated NDJSON logs; console only when unset.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            dir: None,
        }
    }
}

/// PL chat runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub history_limit: usize,
    pub public_dir: String,
    pub environment: RuntimeEnv,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            gemini: GeminiConfig::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
            environment: RuntimeEnv::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.generation, GenerationConfig::default());
        assert_eq!(config.history_limit, 12);
        assert!(!config.has_api_key());
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_runtime_env_parse() {
        assert!(RuntimeEnv::parse("Production").is_production());
        assert!(!RuntimeEnv::parse("staging").is_production());
    }
}
