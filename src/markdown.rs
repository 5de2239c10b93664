use crate::models::{FeedEntry, FrontMatter, PostDocument};

const FRONT_MATTER_DELIMITER: &str = "---";

impl PostDocument {
    /// Build the post for `entry`. `image` is the public path of the image
    /// downloaded for this entry, or `None` when it has none.
    pub fn from_entry(entry: &FeedEntry, image: Option<&str>) -> Self {
        Self {
            front_matter: FrontMatter {
                title: entry.title.clone(),
                subtitle: entry.subtitle.clone().unwrap_or_default(),
                author_name: entry.author_name.clone(),
                publish_date: entry.published.clone(),
                description: entry.summary.clone(),
                image: image.unwrap_or_default().to_string(),
            },
            body: entry.body().to_string(),
        }
    }

    pub fn render(&self) -> String {
        let fm = &self.front_matter;
        let fields = [
            ("title", &fm.title),
            ("subtitle", &fm.subtitle),
            ("authorName", &fm.author_name),
            ("publishDate", &fm.publish_date),
            ("description", &fm.description),
            ("image", &fm.image),
        ];

        let mut out = String::new();
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push('\n');
        for (key, value) in fields {
            out.push_str(&format!("{key}: \"{}\"\n", single_line(value)));
        }
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push_str("\n\n");
        out.push_str(&self.body);
        out
    }
}

/// Replace line breaks with spaces; a raw break would end the key early.
pub fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
