//! Conversation window: the bounded, role-normalized slice of history sent with each call.

use plchat_core::{Message, Role, Turn};

/// Maximum number of prior messages submitted with a request.
pub const DEFAULT_MAX_ITEMS: usize = 12;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationWindow {
    pub turns: Vec<Turn>,
}

impl ConversationWindow {
    /// Build the window from the full prior history (excluding the message being sent).
    ///
    /// Keeps the last `max_items` usable entries, then drops any leading run of
    /// assistant entries so the transcript opens with a user turn.
    pub fn build(history: &[Message], max_items: usize) -> Self {
        let usable: Vec<&Message> = history
            .iter()
            .filter(|message| !message.content.trim().is_empty())
            .collect();

        let start = usable.len().saturating_sub(max_items);
        let turns = usable[start..]
            .iter()
            .skip_while(|message| message.role == Role::Assistant)
            .map(|message| Turn::from(*message))
            .collect();

        Self { turns }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plchat_core::TurnRole;

    /// Welcome message first, then alternating user/assistant turns.
    fn alternating(count: usize) -> Vec<Message> {
        (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    Message::assistant(format!("assistant {i}"))
                } else {
                    Message::user(format!("user {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_long_history_is_capped() {
        let window = ConversationWindow::build(&alternating(15), DEFAULT_MAX_ITEMS);
        assert_eq!(window.len(), 12);
        assert_eq!(window.turns[0].role, TurnRole::User);
        assert_eq!(window.turns[0].text, "user 3");
        assert_eq!(window.turns[11].text, "assistant 14");
    }

    #[test]
    fn test_leading_assistant_run_is_dropped() {
        let history = vec![
            Message::assistant("welcome"),
            Message::assistant("second greeting"),
            Message::user("question"),
            Message::assistant("answer"),
        ];
        let window = ConversationWindow::build(&history, DEFAULT_MAX_ITEMS);
        assert_eq!(
            window.turns,
            vec![Turn::user("question"), Turn::model("answer")]
        );
    }

    #[test]
    fn test_tail_starting_with_assistant_loses_that_entry() {
        let window = ConversationWindow::build(&alternating(14), DEFAULT_MAX_ITEMS);
        // The retained tail starts at "assistant 2", which cannot open a transcript.
        assert_eq!(window.len(), 11);
        assert_eq!(window.turns[0].text, "user 3");
    }

    #[test]
    fn test_never_starts_with_model_for_any_length() {
        for len in 0..30 {
            for max in 1..15 {
                let window = ConversationWindow::build(&alternating(len), max);
                assert!(window.len() <= max);
                if let Some(first) = window.turns.first() {
                    assert_eq!(first.role, TurnRole::User);
                }
            }
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let history = vec![
            Message::user("one"),
            Message::assistant("two"),
            Message::user("three"),
        ];
        let texts: Vec<_> = ConversationWindow::build(&history, 12)
            .into_turns()
            .into_iter()
            .map(|turn| turn.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        let history = vec![
            Message::user("   "),
            Message::user("real"),
            Message::assistant(""),
        ];
        let window = ConversationWindow::build(&history, 12);
        assert_eq!(window.turns, vec![Turn::user("real")]);
    }

    #[test]
    fn test_only_assistant_history_gives_empty_window() {
        let window = ConversationWindow::build(&[Message::assistant("welcome")], 12);
        assert!(window.is_empty());
    }
}
