// src/pipeline/mod.rs

//! Pipeline entry points.
//!
//! - `run_digest`: Fetch a day of posts, summarize, and publish

pub mod digest;

pub use digest::{run_digest, APOLOGY_MESSAGE, SPOILER_TEXT};
