/// Turn a post title into the stem used for its markdown file and image folder.
///
/// The title is lowercased, then anything that is not a word character, `-`,
/// `.` or a space becomes `_`, and spaces become `_` as well. Two titles can
/// map to the same slug; nothing here tries to prevent that.
pub fn slugify(title: &str) -> String {
    // Lowercasing can expand a char into several, so it runs before the filter.
    title
        .to_lowercase()
        .chars()
        .map(|c| if is_slug_char(c) { c } else { '_' })
        .collect::<String>()
        .replace(' ', "_")
}

fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ')
}
