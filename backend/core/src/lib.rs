pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::ChatError;
pub use message::{Message, Role, Turn, TurnRole};
pub use traits::{ChatProvider, ProviderReply, ProviderRequest};
pub use types::{ChatReply, FinishReason, GenerationConfig, SafetyRating};
