use feed_rs::parser;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One item of a fetched feed, before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryContent {
    pub id: String,
    pub title: String,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub published: Option<i64>,
}

impl EntryContent {
    /// Builds an entry with a derived id; handy for sources that are not XML.
    pub fn new(title: impl Into<String>, link: Option<String>, snippet: Option<String>) -> Self {
        let title = title.into();
        let id = entry_id(None, link.as_deref(), &title, None);
        Self {
            id,
            title,
            link,
            snippet,
            published: None,
        }
    }
}

/// Parses RSS or Atom bytes into entries, in document order.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<EntryContent>, parser::ParseFeedError> {
    let feed = parser::parse(bytes)?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry.links.first().map(|l| l.href.clone());
            let published = entry.published.or(entry.updated).map(|dt| dt.timestamp());
            let snippet = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());

            let own_id = (!entry.id.is_empty()).then_some(entry.id.as_str());
            let id = entry_id(own_id, link.as_deref(), &title, published);

            EntryContent {
                id,
                title,
                link,
                snippet,
                published,
            }
        })
        .collect())
}

/// The item's own guid when present, else a digest of link, title and date.
fn entry_id(own: Option<&str>, link: Option<&str>, title: &str, published: Option<i64>) -> String {
    if let Some(id) = own.map(str::trim).filter(|id| !id.is_empty()) {
        return id.to_string();
    }

    let input = format!(
        "{}|{}|{}",
        link.unwrap_or(""),
        title,
        published.map(|p| p.to_string()).unwrap_or_default()
    );
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
    <item><guid>a-1</guid><title>First post</title><link>http://example.com/1</link>
        <description>Hello there</description></item>
    <item><title>Second post</title><link>http://example.com/2</link></item>
</channel></rss>"#;

    #[test]
    fn test_parse_rss_items_in_order() {
        let entries = parse_entries(RSS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "a-1");
        assert_eq!(entries[0].title, "First post");
        assert_eq!(entries[0].snippet.as_deref(), Some("Hello there"));
        assert_eq!(entries[1].title, "Second post");
        assert_eq!(entries[1].link.as_deref(), Some("http://example.com/2"));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        assert!(parse_entries(b"<not valid xml").is_err());
    }

    #[test]
    fn test_derived_id_is_stable() {
        let a = EntryContent::new("Title", Some("http://example.com/x".into()), None);
        let b = EntryContent::new("Title", Some("http://example.com/x".into()), None);
        assert_eq!(a.id, b.id);
        assert_eq!(a.id.len(), 64);
    }

    #[test]
    fn test_blank_guid_falls_back_to_digest() {
        let id = entry_id(Some("   "), None, "Title", Some(1));
        assert_eq!(id.len(), 64);
    }
}
