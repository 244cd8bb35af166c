//! CLI Status Command
//!
//! Queries a running relay's `/api/health` endpoint.

use anyhow::Result;

use plchat_config::Config;

use crate::terminal_output::{note_error, note_success};

pub async fn run(config: &Config) -> Result<()> {
    let url = health_url(config);
    println!("PL chat status: checking {url}...");

    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body: serde_json::Value = resp.json().await?;
            note_success(&format!(
                "Relay is up (model: {})",
                body["model"].as_str().unwrap_or("not configured")
            ));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Ok(resp) => {
            note_error(&format!("Relay answered with HTTP {}", resp.status()));
        }
        Err(_) => {
            note_error(&format!("PL chat is not running on port {}", config.port));
        }
    }

    Ok(())
}

fn health_url(config: &Config) -> String {
    format!("http://localhost:{}/api/health", config.port)
}
