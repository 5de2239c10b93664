use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use reqwest::Client;
use tracing::debug;

use crate::error::{Result, SyncError};
use crate::models::{ContentBlock, FeedEntry};

/// Fetches the syndication feed the posts come from.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` and parse every item in it.
    pub async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        debug!("Fetching feed from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status,
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let entries = parse_feed(&bytes)?;

        debug!("Parsed {} entries from feed", entries.len());
        Ok(entries)
    }
}

/// Parse RSS 2.0 `<item>`s (or Atom `<entry>`s) from raw XML.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedEntry>> {
    // Text is kept untrimmed so mixed text and CDATA keep their spacing.
    let mut reader = Reader::from_reader(xml);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<EntryBuilder> = None;
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                if is_entry_element(&name) {
                    current = Some(EntryBuilder::default());
                } else if let Some(entry) = current.as_mut() {
                    entry.image_from_attributes(&name, &e);
                }
                path.push(name);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = current.as_mut() {
                    entry.image_from_attributes(&element_name(&e), &e);
                }
            }
            Ok(Event::Text(e)) => {
                if current.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| SyncError::Feed(format!("XML text error: {}", err)))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if current.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                let name = path.pop().unwrap_or_default();
                if is_entry_element(&name) {
                    if let Some(builder) = current.take() {
                        entries.push(builder.build(entries.len())?);
                    }
                } else if let Some(entry) = current.as_mut() {
                    let parent = path.last().map(String::as_str).unwrap_or_default();
                    entry.assign(&name, parent, std::mem::take(&mut text));
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SyncError::Feed(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn is_entry_element(name: &str) -> bool {
    name == "item" || name == "entry"
}

fn attribute(e: &BytesStart, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
        .filter(|v| !v.is_empty())
}

#[derive(Default)]
struct EntryBuilder {
    title: Option<String>,
    subtitle: Option<String>,
    creator: Option<String>,
    author: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    summary: Option<String>,
    image_href: Option<String>,
    content: Vec<ContentBlock>,
}

impl EntryBuilder {
    /// Summary and content keep their text verbatim, every other field is trimmed.
    fn assign(&mut self, name: &str, parent: &str, raw: String) {
        if raw.trim().is_empty() {
            return;
        }

        match (name, parent) {
            ("description" | "summary", _) => {
                self.summary.get_or_insert(raw);
                return;
            }
            ("content:encoded" | "content", _) => {
                self.content.push(ContentBlock { value: raw });
                return;
            }
            _ => {}
        }

        let value = raw.trim().to_string();
        match (name, parent) {
            ("title", "item" | "entry") => self.title = Some(value),
            ("subtitle" | "itunes:subtitle", _) => self.subtitle = Some(value),
            ("dc:creator", _) => self.creator = Some(value),
            ("name", "author") | ("author", _) => {
                self.author.get_or_insert(value);
            }
            ("pubDate" | "published" | "dc:date", _) => {
                self.published.get_or_insert(value);
            }
            ("updated", _) => self.updated = Some(value),
            ("url", "image") => {
                self.image_href.get_or_insert(value);
            }
            _ => {}
        }
    }

    /// Lead images are carried in attributes rather than text.
    fn image_from_attributes(&mut self, name: &str, e: &BytesStart) {
        if self.image_href.is_some() {
            return;
        }

        let href = match name {
            "media:content" => {
                let is_image = match (attribute(e, "medium"), attribute(e, "type")) {
                    (Some(medium), _) => medium == "image",
                    (None, Some(mime)) => mime.starts_with("image/"),
                    (None, None) => true,
                };
                if is_image {
                    attribute(e, "url")
                } else {
                    None
                }
            }
            "media:thumbnail" => attribute(e, "url"),
            "itunes:image" => attribute(e, "href"),
            "enclosure" => attribute(e, "type")
                .filter(|mime| mime.starts_with("image/"))
                .and_then(|_| attribute(e, "url")),
            _ => None,
        };

        self.image_href = href;
    }

    fn build(self, index: usize) -> Result<FeedEntry> {
        let title = self
            .title
            .ok_or_else(|| SyncError::Feed(format!("entry #{} has no title", index + 1)))?;

        Ok(FeedEntry {
            title,
            subtitle: self.subtitle,
            author_name: self.creator.or(self.author).unwrap_or_default(),
            published: self.published.or(self.updated).unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            image_href: self.image_href,
            content: self.content,
        })
    }
}
