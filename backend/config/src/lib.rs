//! `plchat-config`: runtime configuration for the PL chat relay.
//!
//! Provides:
//! - Typed config schema (server, Gemini, logging)
//! - Environment loading with defaults
//! - Range validation
//! - Config redaction for safe logging/display

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use redact::redact;
pub use schema::{Config, GeminiConfig, LoggingConfig, RuntimeEnv};
pub use validation::{validate, ConfigValidationError, ValidationReport};

/// Validate the config and log every finding.
pub fn validate_and_log(config: &Config) -> ValidationReport {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    report
}
