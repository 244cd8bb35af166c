//! PL chat HTTP relay
//!
//! Serves the chat API and the browser client's static assets.

pub mod chat_api;
pub mod error;
pub mod health_api;
pub mod server;
pub mod static_files;

pub use error::ApiError;
pub use server::{AppState, MAX_BODY_BYTES, build_router, start_server};
