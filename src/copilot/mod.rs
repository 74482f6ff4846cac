//! Copilot module - prompt construction and the text-generation client

mod client;
mod prompt;

pub use client::{CopilotClient, CopilotError};
pub use prompt::build_prompt;
