//! Telemetry and structured logging components for the PL chat relay.
//!
//! Handles log redaction, JSON output generation, file rotation, and chat event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ChatEvent, ChatEventLogger, EventLogEntry, excerpt_of};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
