//! CLI Chat Command
//!
//! Interactive terminal chat that calls Gemini directly, without the relay.
//! The key comes from the environment or is typed in (without echo) and kept in
//! memory only.

use anyhow::{Context, Result};
use dialoguer::Password;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use plchat_agent::ChatSession;
use plchat_config::Config;

use crate::terminal_output::{self, note_error, note_info, note_warn};

/// REPL commands recognised on their own line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Exit,
    Clear,
    Help,
    Say(String),
    Nothing,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "" => Command::Nothing,
        "/exit" | "/quit" => Command::Exit,
        "/clear" => Command::Clear,
        "/help" => Command::Help,
        text => Command::Say(text.to_string()),
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let api_key = match config.gemini.api_key.clone() {
        Some(key) => key,
        None => match prompt_api_key().await? {
            Some(key) => key,
            None => {
                note_error("A Gemini API key is required for terminal chat.");
                return Ok(());
            }
        },
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let service = crate::build_service(config, Some(api_key));
    let mut session = ChatSession::new().with_history_limit(config.history_limit);

    println!();
    for message in session.messages() {
        terminal_output::print_message(message);
    }
    note_info("Type /clear to start over, /exit to quit.");

    loop {
        terminal_output::prompt(&mut std::io::stdout(), "> ")?;
        let Some(line) = input.next_line().await? else {
            break;
        };

        let text = match parse_command(&line) {
            Command::Nothing => continue,
            Command::Exit => break,
            Command::Help => {
                note_info("Commands: /clear (reset the conversation), /exit (quit)");
                continue;
            }
            Command::Clear => {
                session.clear();
                println!();
                for message in session.messages() {
                    terminal_output::print_message(message);
                }
                continue;
            }
            Command::Say(text) => text,
        };

        let sent = match session.begin_turn(&text) {
            Ok(sent) => sent,
            Err(e) => {
                note_warn(&e.to_string());
                continue;
            }
        };
        let history = session.history_for_request().to_vec();
        debug!(history_len = history.len(), "Sending chat turn");

        let message = match service.reply(&sent, &history).await {
            Ok(reply) => {
                if reply.continued {
                    debug!("Reply was continued after truncation");
                }
                session.complete_turn(&reply.text)
            }
            Err(e) => session.fail_turn(&e),
        };
        println!();
        terminal_output::print_message(message);
    }

    note_info("Bye.");
    Ok(())
}

/// Ask for the key on the terminal with echo off. `None` when the user gives nothing.
async fn prompt_api_key() -> Result<Option<String>> {
    note_warn("GEMINI_API_KEY is not set.");
    let raw = tokio::task::spawn_blocking(|| {
        Password::new()
            .with_prompt("Gemini API key (input hidden)")
            .allow_empty_password(true)
            .interact()
    })
    .await
    .context("API key prompt task failed")?
    .context("Failed to read the API key")?;
    Ok(normalize_key(&raw))
}

fn normalize_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    (!key.is_empty()).then(|| key.to_string())
}
