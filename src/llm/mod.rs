pub mod config;
pub mod prompts;
pub mod service;

pub use config::{LlmConfig, LlmProvider};
pub use service::{ChatBackend, ChatMessage, LlmService, LlmServiceError};
