//! PL Chat turn handling
//!
//! Conversation windowing, the one-shot continuation protocol, empty-reply
//! explanations, and the per-session client state.

pub mod boilerplate;
pub mod chat_service;
pub mod context_window;
pub mod continuation;
pub mod fallback;
pub mod session_state;
pub mod system_prompt;

pub use boilerplate::clean_continuation;
pub use chat_service::ChatService;
pub use context_window::{ConversationWindow, DEFAULT_MAX_ITEMS};
pub use continuation::{
    CONTINUATION_PROMPT, Completion, ContinuationCoordinator, ContinuationState,
    NO_USABLE_RESPONSE,
};
pub use fallback::explain_empty_reply;
pub use session_state::{ChatSession, WELCOME_MESSAGE};
pub use system_prompt::PromptBuilder;
