// src/services/notestock.rs

//! Notestock archive client.
//!
//! Fetches the public day view for an account and extracts the posts
//! worth digesting. Boosts, mentions, quotes, and link-only posts are
//! filtered out before the texts reach the model.

use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::utils::http;

/// Client for the notestock day-view pages.
pub struct NotestockClient {
    base: String,
    client: reqwest::Client,
}

impl NotestockClient {
    /// Create a new notestock client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_client(
            &config.user_agent,
            Some(Duration::from_secs(config.http_timeout_secs)),
        )?;

        Ok(Self {
            base: config.notestock_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL of the day view for `acct` on `date` (YYYYMMDD).
    pub fn day_url(&self, acct: &str, date: &str) -> String {
        format!("{}/{}/{}/view", self.base, acct, date)
    }

    /// Fetch and extract one day of posts for an account.
    pub async fn fetch_daily_posts(&self, acct: &str, date: &str) -> Result<Vec<Post>> {
        let url = self.day_url(acct, date);
        log::debug!("Fetching {}", url);

        let html = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::extract_posts(&html)
    }

    /// Extract digestible posts from a day-view document.
    fn extract_posts(html: &str) -> Result<Vec<Post>> {
        let document = Html::parse_document(html);

        let note_sel = parse_selector(".note")?;
        let announce_sel = parse_selector("i.announce")?;
        let body_sel = parse_selector(".notebody .content")?;
        let time_sel = parse_selector(".info > a")?;
        let seconds_re = Regex::new(r":\d{2}$")
            .map_err(|e| AppError::selector(r":\d{2}$", e))?;

        let posts = document
            .select(&note_sel)
            // boosts carry an announce marker
            .filter(|note| note.select(&announce_sel).next().is_none())
            .filter_map(|note| {
                Self::parse_note(&note, &body_sel, &time_sel, &seconds_re)
            })
            .filter_map(Self::filter_post)
            .collect();

        Ok(posts)
    }

    /// Parse one `.note` element into a post.
    ///
    /// The body keeps `<br>` line breaks as newlines; the timestamp is
    /// reduced from HH:MM:SS to HHMM. Returns `None` when the note has
    /// no body element.
    fn parse_note(
        note: &ElementRef,
        body_sel: &Selector,
        time_sel: &Selector,
        seconds_re: &Regex,
    ) -> Option<Post> {
        let body_elem = note.select(body_sel).next()?;
        let body = text_with_breaks(&body_elem).trim().to_string();

        let time = note.select(time_sel).next().map(|elem| {
            let raw: String = elem.text().collect();
            seconds_re.replace(raw.trim(), "").replace(':', "")
        });

        Some(Post { time, body })
    }

    /// Apply the digest filter rules to a parsed post.
    ///
    /// Drops empty posts, mentions (`@...`), and quotes (`> ...`). A
    /// multi-line post containing a link is reduced to its final line,
    /// the author's comment; when that line is itself a link the post
    /// carried no comment and is dropped. Single-line posts pass
    /// through unchanged.
    fn filter_post(post: Post) -> Option<Post> {
        if post.body.is_empty() {
            return None;
        }
        if post.body.starts_with('@') || post.body.starts_with("> ") {
            return None;
        }
        if !post.body.contains('\n') || !post.body.contains("http") {
            return Some(post);
        }

        let comment = post.body.lines().next_back()?.to_string();
        if comment.starts_with("http") {
            return None;
        }

        Some(Post {
            time: post.time,
            body: comment,
        })
    }
}

/// Collect an element's text, rendering `<br>` elements as newlines.
///
/// `ElementRef::text` skips line-break elements entirely, which would
/// glue separate lines together.
fn text_with_breaks(element: &ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(elem) if elem.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(info: &str, content: &str) -> String {
        format!(
            r##"<div class="note">
                 <div class="info"><a href="#">{info}</a></div>
                 <div class="notebody"><div class="content">{content}</div></div>
               </div>"##
        )
    }

    fn day_view(notes: &[String]) -> String {
        format!("<html><body>{}</body></html>", notes.concat())
    }

    #[test]
    fn test_extracts_body_and_compact_time() {
        let html = day_view(&[note("23:59:07", "ねむい")]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(
            posts,
            vec![Post {
                time: Some("2359".to_string()),
                body: "ねむい".to_string(),
            }]
        );
    }

    #[test]
    fn test_br_becomes_newline() {
        let html = day_view(&[note("12:00:00", "一行目<br>二行目")]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts[0].body, "一行目\n二行目");
    }

    #[test]
    fn test_time_absent_when_info_missing() {
        let html = day_view(&[r##"<div class="note">
                 <div class="notebody"><div class="content">hello</div></div>
               </div>"##
            .to_string()]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts[0].time, None);
        assert_eq!(posts[0].body, "hello");
    }

    #[test]
    fn test_announce_notes_are_dropped() {
        let boost = r##"<div class="note">
                 <i class="announce"></i>
                 <div class="info"><a href="#">10:00:00</a></div>
                 <div class="notebody"><div class="content">boosted</div></div>
               </div>"##
            .to_string();
        let html = day_view(&[boost, note("11:00:00", "own post")]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, "own post");
    }

    #[test]
    fn test_mentions_quotes_and_empty_posts_are_dropped() {
        let html = day_view(&[
            note("09:00:00", "@someone hi"),
            note("09:01:00", "&gt; quoted text"),
            note("09:02:00", "   "),
            note("09:03:00", "kept"),
        ]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, "kept");
    }

    #[test]
    fn test_link_post_keeps_only_trailing_comment() {
        let html = day_view(&[note("20:00:00", "https://example.com/a<br>良い記事だった")]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, "良い記事だった");
        assert_eq!(posts[0].time, Some("2000".to_string()));
    }

    #[test]
    fn test_link_post_without_comment_is_dropped() {
        let html = day_view(&[note(
            "20:00:00",
            "見て<br>https://example.com/a",
        )]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_single_line_post_with_link_passes_through() {
        let html = day_view(&[note("20:00:00", "https://example.com/a 見て")]);
        let posts = NotestockClient::extract_posts(&html).unwrap();
        assert_eq!(posts[0].body, "https://example.com/a 見て");
    }

    #[test]
    fn test_day_url() {
        let config = test_config();
        let client = NotestockClient::new(&config).unwrap();
        assert_eq!(
            client.day_url("@eai@social.example", "20230101"),
            "https://notestock.osa-p.net/@eai@social.example/20230101/view"
        );
    }

    fn test_config() -> Config {
        let mut config = Config::for_tests();
        config.notestock_base = "https://notestock.osa-p.net/".to_string();
        config
    }
}
