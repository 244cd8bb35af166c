//! Terminal output utilities: ANSI styling, notes, and chat transcript lines.

use std::io::Write;

use plchat_core::{Message, Role};
use plchat_markdown::{IrParser, Renderer};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum NoteKind {
    Info,
    Warn,
    Error,
    Success,
}

impl NoteKind {
    fn glyph(self) -> (&'static str, &'static str) {
        match self {
            NoteKind::Info => (CYAN, "ℹ"),
            NoteKind::Warn => (YELLOW, "⚠"),
            NoteKind::Error => (RED, "✗"),
            NoteKind::Success => (GREEN, "✓"),
        }
    }

    fn label(self) -> &'static str {
        match self {
            NoteKind::Info => "INFO",
            NoteKind::Warn => "WARN",
            NoteKind::Error => "ERROR",
            NoteKind::Success => "OK",
        }
    }
}

fn format_note(kind: NoteKind, msg: &str, color: bool) -> String {
    if color {
        let (tint, glyph) = kind.glyph();
        format!("{tint}{BOLD}{glyph}{RESET} {msg}")
    } else {
        format!("{}: {msg}", kind.label())
    }
}

pub fn note_info(msg: &str) {
    println!("{}", format_note(NoteKind::Info, msg, supports_color()));
}

pub fn note_warn(msg: &str) {
    println!("{}", format_note(NoteKind::Warn, msg, supports_color()));
}

/// Errors go to stderr.
pub fn note_error(msg: &str) {
    eprintln!("{}", format_note(NoteKind::Error, msg, supports_color()));
}

pub fn note_success(msg: &str) {
    println!("{}", format_note(NoteKind::Success, msg, supports_color()));
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Format one transcript entry. Assistant text goes through the markdown renderer.
pub fn format_message(message: &Message, color: bool) -> String {
    let nodes = IrParser::parse(&message.content);
    match (message.role, color) {
        (Role::User, true) => format!("{BOLD}You{RESET} {DIM}›{RESET} {}", message.content),
        (Role::User, false) => format!("You > {}", message.content),
        (Role::Assistant, true) => {
            format!("{CYAN}{BOLD}Assistant{RESET}\n{}", Renderer::to_ansi(&nodes))
        }
        (Role::Assistant, false) => format!("Assistant\n{}", Renderer::to_plain_text(&nodes)),
    }
}

pub fn print_message(message: &Message) {
    println!("{}\n", format_message(message, supports_color()));
}

/// Print the input prompt without a newline.
pub fn prompt(writer: &mut impl Write, label: &str) -> std::io::Result<()> {
    writer.write_all(label.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_assistant_message_renders_bullets() {
        let message = Message::assistant("Check:\n- **labels**\n- recalls");
        let out = format_message(&message, false);
        assert!(out.starts_with("Assistant\n"));
        assert!(out.contains("• labels"));
        assert!(!out.contains("**"));
    }

    #[test]
    fn test_user_message_is_verbatim() {
        let message = Message::user("is **this** risky?");
        assert_eq!(format_message(&message, false), "You > is **this** risky?");
    }

    #[test]
    fn test_note_falls_back_to_labels_without_color() {
        assert_eq!(format_note(NoteKind::Warn, "no key", false), "WARN: no key");
        assert!(format_note(NoteKind::Success, "up", true).contains("✓"));
    }

    #[test]
    fn test_prompt_flushes_label() {
        let mut buf = Vec::new();
        prompt(&mut buf, "> ").unwrap();
        assert_eq!(buf, b"> ");
    }
}
