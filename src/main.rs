mod config;
mod content_loader;
mod error;
mod feed;
mod images;
mod markdown;
mod models;
mod slug;
mod state;
mod sync;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, SyncMode};
use crate::sync::sync_feed;

/// Mirror blog posts from an RSS feed into markdown files with front matter.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file (defaults to ./blog-feed-sync.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feed to read posts from
    #[arg(long, value_name = "URL")]
    feed_url: Option<String>,

    /// Directory the markdown posts are written to
    #[arg(long, value_name = "DIR")]
    blog_dir: Option<PathBuf>,

    /// Directory post images are written to, one subdirectory per post
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// Write every entry, even when a post with the same title exists
    #[arg(long)]
    overwrite: bool,

    /// Report what would be written without downloading images or writing files
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config =
            Config::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(feed_url) = self.feed_url {
            config.feed_url = feed_url;
        }
        if let Some(blog_dir) = self.blog_dir {
            config.blog_dir = blog_dir;
        }
        if let Some(images_dir) = self.images_dir {
            config.images_dir = images_dir;
        }
        if self.overwrite {
            config.mode = SyncMode::Overwrite;
        }
        config.dry_run = self.dry_run;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config()?;
    info!(
        feed = %config.feed_url,
        blog_dir = %config.blog_dir.display(),
        mode = ?config.mode,
        "starting sync"
    );

    sync_feed(&config)
        .await
        .with_context(|| format!("Failed to sync posts from {}", config.feed_url))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let args = Args::parse_from([
            "blog-feed-sync",
            "--config",
            "/definitely/missing.toml",
        ]);
        assert!(args.into_config().is_err());

        let args = Args::parse_from([
            "blog-feed-sync",
            "--feed-url",
            "https://example.com/rss",
            "--blog-dir",
            "out/blog",
            "--overwrite",
            "--dry-run",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.feed_url, "https://example.com/rss");
        assert_eq!(config.blog_dir, PathBuf::from("out/blog"));
        assert_eq!(config.mode, SyncMode::Overwrite);
        assert!(config.dry_run);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
