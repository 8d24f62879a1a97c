// src/models/mod.rs

//! Domain models for the bot.
//!
//! Everything here is ephemeral: parsed posts and the wire types of
//! the two external APIs live only for the duration of one run.

mod chat;
mod post;
mod status;

// Re-export all public types
pub use chat::{ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse};
pub use post::Post;
pub use status::{NewStatus, Status};
