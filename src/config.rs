// src/config.rs

//! Runtime configuration.
//!
//! Everything comes from environment variables (a `.env` file is
//! honored when present) and is validated once at startup. The four
//! account/credential variables are required; every tunable has a
//! default.

use std::env;
use std::str::FromStr;

use url::Url;

use crate::error::{AppError, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key (`OPENAI_API_KEY`)
    pub openai_api_key: String,

    /// Account whose day gets digested, e.g. `@eai@social.example`
    /// (`TARGET_ACCT`)
    pub target_acct: String,

    /// Hostname of the Mastodon server the bot posts to, without a
    /// scheme (`MASTODON_BOT_HOST`)
    pub mastodon_host: String,

    /// Bearer token of the bot account (`MASTODON_BOT_TOKEN`)
    pub mastodon_token: String,

    /// Maximum grapheme count per status (`MAX_STATUS_LENGTH`)
    pub max_status_length: usize,

    /// Chat model name (`OPENAI_MODEL`)
    pub model: String,

    /// Chat completions endpoint (`OPENAI_API_URL`)
    pub completions_url: String,

    /// Base URL of the notestock archive (`NOTESTOCK_BASE_URL`)
    pub notestock_base: String,

    /// Wall-clock budget for one completion request, in seconds
    /// (`COMPLETION_TIMEOUT_SECS`)
    pub completion_timeout_secs: u64,

    /// Attempt bound for the completion call
    /// (`COMPLETION_MAX_ATTEMPTS`)
    pub completion_max_attempts: usize,

    /// Token budget passed to the model (`COMPLETION_MAX_TOKENS`)
    pub completion_max_tokens: u32,

    /// Request timeout for archive and status calls, in seconds
    /// (`HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,

    /// User-Agent header for outbound requests
    pub user_agent: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            target_acct: required("TARGET_ACCT")?,
            mastodon_host: required("MASTODON_BOT_HOST")?,
            mastodon_token: required("MASTODON_BOT_TOKEN")?,
            max_status_length: parsed_or("MAX_STATUS_LENGTH", defaults::max_status_length())?,
            model: var_or("OPENAI_MODEL", defaults::model()),
            completions_url: var_or("OPENAI_API_URL", defaults::completions_url()),
            notestock_base: var_or("NOTESTOCK_BASE_URL", defaults::notestock_base()),
            completion_timeout_secs: parsed_or(
                "COMPLETION_TIMEOUT_SECS",
                defaults::completion_timeout(),
            )?,
            completion_max_attempts: parsed_or(
                "COMPLETION_MAX_ATTEMPTS",
                defaults::completion_attempts(),
            )?,
            completion_max_tokens: parsed_or(
                "COMPLETION_MAX_TOKENS",
                defaults::completion_tokens(),
            )?,
            http_timeout_secs: parsed_or("HTTP_TIMEOUT_SECS", defaults::http_timeout())?,
            user_agent: defaults::user_agent(),
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            return Err(AppError::config("OPENAI_API_KEY is empty"));
        }
        if self.target_acct.trim().is_empty() {
            return Err(AppError::config("TARGET_ACCT is empty"));
        }
        if self.mastodon_token.trim().is_empty() {
            return Err(AppError::config("MASTODON_BOT_TOKEN is empty"));
        }
        if self.mastodon_host.trim().is_empty() {
            return Err(AppError::config("MASTODON_BOT_HOST is empty"));
        }
        if self.mastodon_host.contains("://") {
            return Err(AppError::config(
                "MASTODON_BOT_HOST must be a bare hostname, without a scheme",
            ));
        }
        if self.max_status_length == 0 {
            return Err(AppError::config("MAX_STATUS_LENGTH must be > 0"));
        }
        if self.completion_timeout_secs == 0 {
            return Err(AppError::config("COMPLETION_TIMEOUT_SECS must be > 0"));
        }
        if self.completion_max_attempts == 0 {
            return Err(AppError::config("COMPLETION_MAX_ATTEMPTS must be > 0"));
        }
        if self.http_timeout_secs == 0 {
            return Err(AppError::config("HTTP_TIMEOUT_SECS must be > 0"));
        }
        Url::parse(&self.notestock_base)
            .map_err(|e| AppError::config(format!("NOTESTOCK_BASE_URL is not a URL: {e}")))?;
        Url::parse(&self.completions_url)
            .map_err(|e| AppError::config(format!("OPENAI_API_URL is not a URL: {e}")))?;
        Ok(())
    }
}

/// Read a required environment variable.
fn required(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| AppError::config(format!("environment variable {} is not set", name)))
}

/// Read an optional environment variable, falling back to a default.
fn var_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

/// Read and parse an optional environment variable.
fn parsed_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{} is not a number: '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

mod defaults {
    pub fn max_status_length() -> usize {
        500
    }
    pub fn model() -> String {
        "gpt-4".into()
    }
    pub fn completions_url() -> String {
        "https://api.openai.com/v1/chat/completions".into()
    }
    pub fn notestock_base() -> String {
        "https://notestock.osa-p.net".into()
    }
    pub fn completion_timeout() -> u64 {
        300
    }
    pub fn completion_attempts() -> usize {
        3
    }
    pub fn completion_tokens() -> u32 {
        500
    }
    pub fn http_timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; kyou-no-eai/0.1)".into()
    }
}

#[cfg(test)]
impl Config {
    /// A valid configuration with placeholder secrets, for tests.
    pub(crate) fn for_tests() -> Self {
        Self {
            openai_api_key: "sk-test".to_string(),
            target_acct: "@eai@social.example".to_string(),
            mastodon_host: "bot.example".to_string(),
            mastodon_token: "token".to_string(),
            max_status_length: defaults::max_status_length(),
            model: defaults::model(),
            completions_url: defaults::completions_url(),
            notestock_base: defaults::notestock_base(),
            completion_timeout_secs: defaults::completion_timeout(),
            completion_max_attempts: defaults::completion_attempts(),
            completion_max_tokens: defaults::completion_tokens(),
            http_timeout_secs: defaults::http_timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::for_tests()
    }

    #[test]
    fn validate_sample_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_acct() {
        let mut config = sample();
        config.target_acct = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_host_with_scheme() {
        let mut config = sample();
        config.mastodon_host = "https://bot.example".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_status_length() {
        let mut config = sample();
        config.max_status_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = sample();
        config.completion_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = sample();
        config.notestock_base = "notestock.osa-p.net".to_string();
        assert!(config.validate().is_err());
    }
}
