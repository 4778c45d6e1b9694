//! GitHub-flavored heading anchors and the index list.

use std::collections::HashMap;

/// Assigns GitHub-style anchors, numbering repeated headings the way GitHub
/// does (`dot`, `dot-1`, `dot-2`).
#[derive(Debug, Default)]
pub struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    pub fn next(&mut self, heading: &str) -> String {
        let slug = github_slug(heading);
        let count = self.seen.entry(slug.clone()).or_insert(0);
        let anchor = if *count == 0 {
            slug
        } else {
            format!("{}-{}", slug, count)
        };
        *count += 1;
        anchor
    }
}

/// Markdown index item linking to an anchor.
pub fn render_toc_item(title: &str, anchor: &str) -> String {
    format!("* [{}](#{})", escape_link_text(title), anchor)
}

/// GitHub heading anchor slug generation:
/// - lowercase
/// - remove all chars that aren't alphanumeric, space, underscore, or hyphen
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
