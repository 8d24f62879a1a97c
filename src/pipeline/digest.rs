// src/pipeline/digest.rs

//! Daily digest pipeline.

use std::future::Future;

use crate::config::Config;
use crate::error::Result;
use crate::models::Post;
use crate::services::{mastodon, MastodonClient, NotestockClient, Summarizer};
use crate::utils::text::split_graphemes;

/// Content-warning label carried by every posted status.
pub const SPOILER_TEXT: &str = "きょうのえあい";

/// Message posted instead of the digest when generation fails.
pub const APOLOGY_MESSAGE: &str = "きょうのえあいの作成中にエラーがおきました";

/// Run the digest: fetch the day's posts, summarize them, and toot
/// the result as a reply chain.
///
/// A day without digestible posts ends the run before the model is
/// called. A failed or unusable summary is replaced by the apology
/// message rather than aborting the run. With `dry_run` the chunks
/// are printed instead of posted.
pub async fn run_digest(config: &Config, acct: &str, date: &str, dry_run: bool) -> Result<()> {
    log::info!("Fetching posts from notestock for {} on {}...", acct, date);

    let notestock = NotestockClient::new(config)?;
    let posts = notestock.fetch_daily_posts(acct, date).await?;
    log::info!("Fetched {} posts.", posts.len());

    let chunks = digest_day(acct, &posts, config.max_status_length, async {
        Summarizer::new(config)?.summarize(&posts).await
    })
    .await;

    let Some(chunks) = chunks else {
        return Ok(());
    };

    if dry_run {
        log::info!("Dry run; would post {} status(es):", chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            println!("--- status {}/{} ---", index + 1, chunks.len());
            println!("{}", chunk);
        }
        return Ok(());
    }

    let client = MastodonClient::new(config)?;
    let posted = mastodon::post_thread(&client, &chunks, SPOILER_TEXT).await?;

    for status in &posted {
        match &status.url {
            Some(url) => log::info!("Posted status {} ({})", status.id, url),
            None => log::info!("Posted status {}", status.id),
        }
    }
    log::info!("Digest posted as {} status(es).", posted.len());

    Ok(())
}

/// Turn a fetched day into the outgoing status chunks.
///
/// `None` when the day carried no digestible posts; `summarize` is
/// never awaited in that case, so the model is not called. A failed
/// summary becomes the apology message.
async fn digest_day(
    acct: &str,
    posts: &[Post],
    max_graphemes: usize,
    summarize: impl Future<Output = Result<String>>,
) -> Option<Vec<String>> {
    if posts.is_empty() {
        log::info!("Nothing to digest; skipping.");
        return None;
    }

    log::info!("Generating digest...");
    let summary = match summarize.await {
        Ok(summary) => summary,
        Err(error) => {
            log::error!("Digest generation failed: {}", error);
            APOLOGY_MESSAGE.to_string()
        }
    };

    let message = compose_message(acct, &summary);
    Some(split_graphemes(&message, max_graphemes))
}

/// The outgoing message: the account handle, then the summary.
fn compose_message(acct: &str, summary: &str) -> String {
    format!("{} {}", acct, summary).trim().to_string()
}
