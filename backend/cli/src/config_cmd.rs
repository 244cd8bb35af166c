//! CLI Config Command
//!
//! Prints the effective configuration with the API key masked, then the
//! validation findings.

use anyhow::Result;

use plchat_config::Config;

use crate::terminal_output::{note_error, note_success, note_warn};

pub fn run(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&plchat_config::redact(config))?);

    let report = plchat_config::validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success("Configuration is valid");
    }
    Ok(())
}
