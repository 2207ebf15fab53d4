//! rednote-feed CLI
//!
//! Builds a user's notes feed and prints it as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rednote_feed::{
    error::Result,
    models::Config,
    pipeline::NoteFeedBuilder,
    storage::MemoryCache,
    utils::http::HttpFetcher,
};

/// rednote-feed - Xiaohongshu notes feed builder
#[derive(Parser, Debug)]
#[command(
    name = "rednote-feed",
    version,
    about = "Builds feeds from Xiaohongshu user notes"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the notes feed for a user
    Notes {
        /// Profile user id (24 characters)
        user_id: String,

        /// "fulltext" or "images"; needs a configured cookie
        #[arg(short, long, default_value = "")]
        mode: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config).with_env_overrides();
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Command::Notes { user_id, mode } => {
            config.validate()?;
            if !mode.is_empty() && config.xiaohongshu.cookie().is_none() {
                log::warn!("No cookie configured; falling back to summary feed");
            }

            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
            let cache = Arc::new(MemoryCache::from_config(&config.cache));
            let builder = NoteFeedBuilder::new(Arc::new(config), fetcher, cache);

            let feed = builder.build(&user_id, &mode).await?;
            log::info!("Built feed with {} items", feed.item.len());
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK (cookie {})",
                if config.xiaohongshu.cookie().is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
    }

    Ok(())
}
