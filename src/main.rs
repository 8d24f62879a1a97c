//! kyou-no-eai CLI
//!
//! Scheduled entry point: digest yesterday's posts and toot the
//! result. `run --dry-run` prints the statuses instead of posting.

use clap::{Parser, Subcommand};
use kyou_no_eai::{
    config::Config,
    error::Result,
    pipeline,
    utils::{parse_compact_date, yesterday_compact},
};

/// kyou-no-eai - Daily fediverse digest bot
#[derive(Parser, Debug)]
#[command(name = "kyou-no-eai", version, about = "Daily fediverse digest bot")]
struct Cli {
    /// Account to digest, overriding TARGET_ACCT
    #[arg(long)]
    acct: Option<String>,

    /// Day to digest as YYYYMMDD (default: yesterday, local time)
    #[arg(long)]
    date: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, summarize, and post the digest
    Run {
        /// Print the statuses instead of posting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration from the environment
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; the environment may carry everything.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env()?;
    config.validate()?;

    let acct = cli.acct.unwrap_or_else(|| config.target_acct.clone());
    let date = match cli.date {
        Some(raw) => {
            parse_compact_date(&raw)?;
            raw
        }
        None => yesterday_compact(),
    };

    match cli.command {
        Command::Run { dry_run } => {
            pipeline::run_digest(&config, &acct, &date, dry_run).await?;
        }

        Command::Validate => {
            log::info!("Configuration OK");
            log::info!("  target acct: {}", acct);
            log::info!("  mastodon host: {}", config.mastodon_host);
            log::info!("  notestock base: {}", config.notestock_base);
            log::info!("  model: {}", config.model);
            log::info!("  max status length: {}", config.max_status_length);
            log::info!(
                "  completion: {} attempt(s), {}s timeout, {} max tokens",
                config.completion_max_attempts,
                config.completion_timeout_secs,
                config.completion_max_tokens
            );
        }
    }

    log::info!("Done!");

    Ok(())
}
