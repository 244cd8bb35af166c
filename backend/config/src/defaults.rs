//! Default values used when a setting is absent or unparseable.

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TOP_P: f32 = 0.8;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Prior messages sent with each request.
pub const DEFAULT_HISTORY_LIMIT: usize = 12;

pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_LOG_LEVEL: &str = "info";
