//! Config validation: range checks with user-friendly error messages.

use crate::env::ENV_API_KEY;
use crate::schema::Config;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &Config) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_gemini(config, &mut report);
    validate_server(config, &mut report);
    report
}

fn validate_gemini(config: &Config, report: &mut ValidationReport) {
    let gemini = &config.gemini;
    if gemini.api_key.is_none() {
        report.warn(
            "gemini.apiKey",
            format!("{ENV_API_KEY} is not set; requests to the Gemini API will fail"),
        );
    }
    if gemini.model.trim().is_empty() {
        report.error("gemini.model", "Model identifier cannot be empty");
    }
    if !gemini.base_url.starts_with("http://") && !gemini.base_url.starts_with("https://") {
        report.error("gemini.baseUrl", "Base URL must start with http:// or https://");
    }

    let generation = &gemini.generation;
    if !(0.0..=2.0).contains(&generation.temperature) {
        report.error("gemini.generation.temperature", "Temperature must be between 0 and 2");
    }
    if !(0.0..=1.0).contains(&generation.top_p) {
        report.error("gemini.generation.topP", "topP must be between 0 and 1");
    }
    if generation.top_k == 0 {
        report.error("gemini.generation.topK", "topK must be at least 1");
    }
    if generation.max_output_tokens == 0 {
        report.error("gemini.generation.maxOutputTokens", "maxOutputTokens must be at least 1");
    }
}

fn validate_server(config: &Config, report: &mut ValidationReport) {
    if config.history_limit == 0 {
        report.error("historyLimit", "History limit must be at least 1");
    }
    if config.port == 0 {
        report.warn("port", "Port 0 binds a random free port");
    }
}
