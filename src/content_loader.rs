use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, SyncError};
use crate::state::KnownTitles;

const TITLE_PREFIX: &str = "title: ";
const POST_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

/// Collect the title of every post already present in `blog_dir`.
///
/// A directory that does not exist yet simply has no posts.
pub async fn load_known_titles(blog_dir: &Path) -> Result<KnownTitles> {
    let mut known = KnownTitles::new();

    let mut entries = match fs::read_dir(blog_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, no known posts", blog_dir.display());
            return Ok(known);
        }
        Err(e) => return Err(SyncError::io(blog_dir, e)),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SyncError::io(blog_dir, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| SyncError::io(&path, e))?;
        if !file_type.is_file() || !is_post_file(&path) {
            continue;
        }

        let text = fs::read_to_string(&path)
            .await
            .map_err(|e| SyncError::io(&path, e))?;

        match extract_title(&text) {
            Some(title) => known.insert(&title),
            None => debug!("No title line in {}", path.display()),
        }
    }

    info!("Found {} existing posts in {}", known.len(), blog_dir.display());
    Ok(known)
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| POST_EXTENSIONS.contains(&ext))
}

/// Value of the first `title: ` line, without surrounding whitespace or quotes.
pub fn extract_title(text: &str) -> Option<String> {
    let value = text
        .lines()
        .find_map(|line| line.strip_prefix(TITLE_PREFIX))?
        .trim();

    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    Some(unquoted.to_string())
}
