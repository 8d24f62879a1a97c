// src/services/mod.rs

//! Service layer for the bot.
//!
//! - Notestock fetching and post filtering (`NotestockClient`)
//! - Digest generation (`Summarizer`)
//! - Status publishing and thread chaining (`MastodonClient`)

pub mod mastodon;
mod notestock;
mod summarizer;

pub use mastodon::{MastodonClient, StatusPoster};
pub use notestock::NotestockClient;
pub use summarizer::Summarizer;
