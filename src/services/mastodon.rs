// src/services/mastodon.rs

//! Status publishing to Mastodon.
//!
//! The posting seam is the [`StatusPoster`] trait so the thread
//! chaining logic can be exercised without a network. Chaining is
//! strictly sequential: a chunk's `in_reply_to_id` is the id the
//! server assigned to the previous chunk, so no chunk can be submitted
//! before its predecessor's response arrives.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{NewStatus, Status};
use crate::utils::http;

/// A backend that can create one status.
#[async_trait]
pub trait StatusPoster: Send + Sync {
    /// Create a status and return the server's view of it.
    async fn post_status(&self, new_status: &NewStatus) -> Result<Status>;
}

/// Client for the Mastodon statuses API.
pub struct MastodonClient {
    client: reqwest::Client,
    host: String,
    token: String,
}

impl MastodonClient {
    /// Create a new Mastodon client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_client(
            &config.user_agent,
            Some(Duration::from_secs(config.http_timeout_secs)),
        )?;

        Ok(Self {
            client,
            host: config.mastodon_host.clone(),
            token: config.mastodon_token.clone(),
        })
    }

    fn statuses_url(&self) -> String {
        format!("https://{}/api/v1/statuses", self.host)
    }
}

#[async_trait]
impl StatusPoster for MastodonClient {
    async fn post_status(&self, new_status: &NewStatus) -> Result<Status> {
        let response = self
            .client
            .post(self.statuses_url())
            .bearer_auth(&self.token)
            .json(new_status)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::publish(format!(
                "statuses API returned {}: {}",
                status, body
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Post `chunks` as a reply chain, in order.
///
/// Each chunk after the first replies to the previously returned id.
/// There is no rollback: when a post fails mid-chain the earlier
/// chunks stay up, the remaining ones are never attempted, and the
/// error propagates.
pub async fn post_thread(
    poster: &dyn StatusPoster,
    chunks: &[String],
    spoiler_text: &str,
) -> Result<Vec<Status>> {
    let mut posted = Vec::with_capacity(chunks.len());
    let mut in_reply_to_id: Option<String> = None;

    for chunk in chunks {
        let status = poster
            .post_status(&NewStatus {
                status: chunk.clone(),
                spoiler_text: spoiler_text.to_string(),
                in_reply_to_id: in_reply_to_id.clone(),
            })
            .await?;

        log::debug!("Posted status {}", status.id);
        in_reply_to_id = Some(status.id.clone());
        posted.push(status);
    }

    Ok(posted)
}
