//! Text generation: prompt assembly and the chat-completions client.

pub mod client;
pub mod prompt;

pub use client::{OpenAiClient, TextGenerator};
pub use prompt::{GenerationRequest, InputBlock};
