use std::collections::HashSet;

use crate::markdown::single_line;

/// Titles already published, either found on disk or written during this run.
#[derive(Debug, Default, Clone)]
pub struct KnownTitles {
    titles: HashSet<String>,
}

impl KnownTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(&normalize(title))
    }

    pub fn insert(&mut self, title: &str) {
        self.titles.insert(normalize(title));
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

// Titles are compared the way they end up in front matter.
fn normalize(title: &str) -> String {
    single_line(title)
}
