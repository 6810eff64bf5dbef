//! Summary records for listing pages

use serde::{Deserialize, Serialize};

use super::frontmatter::{FrontMatter, parse_tags, split_header};

/// Listing summary of one post or project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Filename stem, also the routing key
    pub slug: String,
    pub title: String,
    pub description: String,
    /// From the `tech` header field, in file order
    pub tags: Vec<String>,
}

impl ContentRecord {
    /// Build a record from a file's text. Never fails: missing fields fall
    /// back to the slug (title) or empty values, and a malformed tag list is
    /// logged and replaced by an empty one.
    pub fn from_source(slug: &str, source: &str) -> Self {
        let (header, _) = split_header(source);
        Self::from_front_matter(slug, header.map(FrontMatter::parse).unwrap_or_default())
    }

    pub fn from_front_matter(slug: &str, fm: FrontMatter) -> Self {
        let tags = match fm.tech.as_deref() {
            Some(raw) => parse_tags(raw).unwrap_or_else(|e| {
                log::warn!("{}: {}; using no tags", slug, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            slug: slug.to_string(),
            title: fm
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| slug.to_string()),
            description: fm.description.unwrap_or_default(),
            tags,
        }
    }
}

/// A full post/project: summary plus the body after the header block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    #[serde(flatten)]
    pub record: ContentRecord,
    pub body: String,
}

impl ContentEntry {
    pub fn from_source(slug: &str, source: &str) -> Self {
        let (header, body) = split_header(source);
        Self {
            record: ContentRecord::from_front_matter(slug, header.map(FrontMatter::parse).unwrap_or_default()),
            body: body.to_string(),
        }
    }
}
