//! Load configuration from environment variables.
//!
//! Empty values count as unset. Values that fail to parse fall back to the default.

use std::collections::HashMap;
use std::str::FromStr;

use crate::schema::{Config, RuntimeEnv};

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND: &str = "PLCHAT_BIND";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_TEMPERATURE: &str = "GEMINI_TEMPERATURE";
pub const ENV_TOP_P: &str = "GEMINI_TOP_P";
pub const ENV_TOP_K: &str = "GEMINI_TOP_K";
pub const ENV_MAX_OUTPUT_TOKENS: &str = "GEMINI_MAX_OUTPUT_TOKENS";
pub const ENV_HISTORY_LIMIT: &str = "PLCHAT_HISTORY_LIMIT";
pub const ENV_PUBLIC_DIR: &str = "PLCHAT_PUBLIC_DIR";
pub const ENV_RUNTIME: &str = "PLCHAT_ENV";
pub const ENV_RUNTIME_FALLBACK: &str = "NODE_ENV";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";
pub const ENV_LOG_JSON: &str = "PLCHAT_LOG_JSON";
pub const ENV_LOG_DIR: &str = "PLCHAT_LOG_DIR";

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(bind) = get(ENV_BIND) {
            config.bind_address = bind;
        }
        config.port = parse_or(get(ENV_PORT), config.port);

        config.gemini.api_key = get(ENV_API_KEY);
        if let Some(model) = get(ENV_MODEL) {
            config.gemini.model = model;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            config.gemini.base_url = url;
        }

        let generation = &mut config.gemini.generation;
        generation.temperature = parse_or(get(ENV_TEMPERATURE), generation.temperature);
        generation.top_p = parse_or(get(ENV_TOP_P), generation.top_p);
        generation.top_k = parse_or(get(ENV_TOP_K), generation.top_k);
        generation.max_output_tokens =
            parse_or(get(ENV_MAX_OUTPUT_TOKENS), generation.max_output_tokens);

        config.history_limit = parse_or(get(ENV_HISTORY_LIMIT), config.history_limit);
        if let Some(dir) = get(ENV_PUBLIC_DIR) {
            config.public_dir = dir;
        }

        if let Some(env) = get(ENV_RUNTIME).or_else(|| get(ENV_RUNTIME_FALLBACK)) {
            config.environment = RuntimeEnv::parse(&env);
        }

        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        config.logging.json = get(ENV_LOG_JSON).is_some_and(|v| parse_flag(&v));
        config.logging.dir = get(ENV_LOG_DIR);

        config
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
