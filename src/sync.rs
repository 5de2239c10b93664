use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{Config, SyncMode};
use crate::content_loader::load_known_titles;
use crate::error::{Result, SyncError};
use crate::feed::FeedClient;
use crate::images::ImageDownloader;
use crate::models::PostDocument;
use crate::slug::slugify;
use crate::state::KnownTitles;

/// What a run did.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
    pub images: usize,
}

pub fn http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Fetch the feed and write every new entry as a post.
///
/// Stops at the first failure; posts written before it stay on disk.
pub async fn sync_feed(config: &Config) -> Result<SyncReport> {
    let client = http_client(config)?;
    let feed = FeedClient::with_client(client.clone());
    let images = ImageDownloader::with_client(client);

    let entries = feed.fetch(&config.feed_url).await?;
    info!("Fetched {} entries from {}", entries.len(), config.feed_url);

    let mut known = match config.mode {
        SyncMode::SkipExisting => load_known_titles(&config.blog_dir).await?,
        SyncMode::Overwrite => KnownTitles::new(),
    };

    if !config.dry_run {
        fs::create_dir_all(&config.blog_dir)
            .await
            .map_err(|e| SyncError::io(&config.blog_dir, e))?;
    }

    let mut report = SyncReport::default();

    for entry in &entries {
        if config.mode == SyncMode::SkipExisting && known.contains(&entry.title) {
            info!("Skipping existing post: {}", entry.title);
            report.skipped.push(entry.title.clone());
            continue;
        }

        let slug = slugify(&entry.title);
        let post_path = config.blog_dir.join(format!("{}.md", slug));

        if config.dry_run {
            info!("Would write {} ({})", post_path.display(), entry.title);
            report.written.push(post_path);
            known.insert(&entry.title);
            continue;
        }

        let image_dir = config.images_dir.join(&slug);
        fs::create_dir_all(&image_dir)
            .await
            .map_err(|e| SyncError::io(&image_dir, e))?;

        // Only an image fetched for this entry may end up in its front matter.
        let image_path = match entry.image_href.as_deref() {
            Some(href) => {
                let file_name = images.download(href, &image_dir).await?;
                report.images += 1;
                Some(config.image_public_path(&slug, &file_name))
            }
            None => {
                debug!("No image for {}", entry.title);
                None
            }
        };

        let document = PostDocument::from_entry(entry, image_path.as_deref());
        fs::write(&post_path, document.render())
            .await
            .map_err(|e| SyncError::io(&post_path, e))?;

        info!("Wrote {}", post_path.display());
        report.written.push(post_path);
        known.insert(&entry.title);
    }

    info!(
        "Sync finished: {} written, {} skipped, {} images",
        report.written.len(),
        report.skipped.len(),
        report.images
    );
    Ok(report)
}
