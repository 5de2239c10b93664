use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, SyncError};

pub const DEFAULT_CONFIG_FILE: &str = "blog-feed-sync.toml";

const DEFAULT_FEED_URL: &str = "https://medium.com/feed/unlock-protocol";
const DEFAULT_BLOG_DIR: &str = "../../../unlock-protocol-com/blog";
const DEFAULT_IMAGES_DIR: &str = "../../../unlock-protocol-com/public/images/blog";
const DEFAULT_IMAGE_URL_PREFIX: &str = "/images/blog";

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Leave posts whose title is already on disk alone.
    #[default]
    SkipExisting,
    /// Write every entry, replacing files with the same slug.
    Overwrite,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub feed_url: String,
    pub blog_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Public path the site serves `images_dir` under.
    pub image_url_prefix: String,
    pub mode: SyncMode,
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            blog_dir: PathBuf::from(DEFAULT_BLOG_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            image_url_prefix: DEFAULT_IMAGE_URL_PREFIX.to_string(),
            mode: SyncMode::default(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Load `path` if given (it must exist), otherwise the default config file
    /// in the working directory if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Relative directories in the file are taken relative to the file itself.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        let mut config = Self::parse(&text)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.blog_dir = base.join(&config.blog_dir);
            config.images_dir = base.join(&config.images_dir);
        }

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| SyncError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed_url.trim().is_empty() {
            return Err(SyncError::Config("feed_url must not be empty".to_string()));
        }
        if self.blog_dir.as_os_str().is_empty() || self.images_dir.as_os_str().is_empty() {
            return Err(SyncError::Config(
                "blog_dir and images_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Front-matter path of an image saved for the post with `slug`.
    pub fn image_public_path(&self, slug: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.image_url_prefix.trim_end_matches('/'),
            slug,
            file_name
        )
    }
}
