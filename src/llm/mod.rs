//! Language-model access for price estimates and menu synthesis.

pub mod client;
pub mod prompts;

pub use client::{ChatModel, ChatRequest, LlmError, OpenAiChat};
