//! Mastodon status wire types.

use serde::{Deserialize, Serialize};

/// Body of a `POST /api/v1/statuses` request.
///
/// `in_reply_to_id` links the status to its predecessor in a thread
/// and is omitted from the JSON for the head of a chain.
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    pub status: String,
    pub spoiler_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_id: Option<String>,
}

/// The slice of a created status this bot cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Server-assigned identifier, used for reply chaining
    pub id: String,

    /// Public URL of the status, when the server reports one
    #[serde(default)]
    pub url: Option<String>,
}
