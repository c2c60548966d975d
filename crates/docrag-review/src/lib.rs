//! Context assembly and AI code review on top of the doc index.

pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod prompt;
pub mod reviewer;

pub use config::ReviewConfig;
pub use context::ContextBuilder;
pub use error::{Result, ReviewError};
pub use git::GitContext;
pub use reviewer::{ReviewAssistant, render_error_report};
