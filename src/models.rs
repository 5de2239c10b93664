use serde::Deserialize;

/// One `<item>` of the syndicated feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub subtitle: Option<String>,
    pub author_name: String,
    pub published: String,
    pub summary: String,
    pub image_href: Option<String>,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBlock {
    pub value: String,
}

impl FeedEntry {
    /// Body of the post: the first content block, or nothing.
    pub fn body(&self) -> &str {
        self.content
            .first()
            .map(|block| block.value.as_str())
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub subtitle: String,
    pub author_name: String,
    pub publish_date: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}
