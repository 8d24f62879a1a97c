// src/lib.rs

//! kyou-no-eai library
//!
//! Fetches one day of an account's posts from notestock, asks a chat
//! model for a digest, and toots the result as a reply chain.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
