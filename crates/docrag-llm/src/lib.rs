//! LLM provider abstraction and the Anthropic messages API client.

pub mod claude;
pub mod error;
pub mod provider;

pub use claude::ClaudeProvider;
pub use error::{LlmError, Result};
pub use provider::{LlmProvider, Message, Role};
