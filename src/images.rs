use std::path::Path;

use reqwest::{Client, Url};
use tokio::fs;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Local file name for an image: the last non-empty segment of its URL path.
pub fn image_file_name(href: &str) -> Result<String> {
    let url = Url::parse(href).map_err(|_| SyncError::ImageUrl(href.to_string()))?;

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| SyncError::ImageUrl(href.to_string()))
}

pub struct ImageDownloader {
    client: Client,
}

impl ImageDownloader {
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch `href` into `dir`, returning the file name it was saved under.
    pub async fn download(&self, href: &str, dir: &Path) -> Result<String> {
        let file_name = image_file_name(href)?;
        debug!("Downloading image {} into {}", href, dir.display());

        let response = self.client.get(href).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status,
                url: href.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let path = dir.join(&file_name);
        fs::write(&path, &bytes)
            .await
            .map_err(|e| SyncError::io(&path, e))?;

        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_last_path_segment() {
        assert_eq!(
            image_file_name("https://cdn-images-1.medium.com/max/1024/1*lead.png").unwrap(),
            "1*lead.png"
        );
        assert_eq!(
            image_file_name("https://example.com/img/cover.jpg?w=800#top").unwrap(),
            "cover.jpg"
        );
        assert_eq!(image_file_name("https://example.com/img/cover.jpg/").unwrap(), "cover.jpg");
    }

    #[test]
    fn rejects_urls_without_a_file_name() {
        assert!(matches!(image_file_name("https://example.com/"), Err(SyncError::ImageUrl(_))));
        assert!(matches!(image_file_name("not a url"), Err(SyncError::ImageUrl(_))));
    }
}
