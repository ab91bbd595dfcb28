use std::sync::Arc;

use thiserror::Error;

use crate::feed::EntryContent;
use crate::ui::document::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A feed with no entries; the previous entries stay on screen.
    #[error("feed returned no entries")]
    NoEntries,
}

/// Anything that can display a list of entries with replace-all semantics.
pub trait RenderTarget: Send + Sync {
    /// Swaps in a fully built collection in one step.
    fn replace_entries(&self, entries: Arc<[Entry]>);

    /// Updates the heading shown above the entries.
    fn set_title(&self, _title: &str) {}
}

/// Turns fetched entry content into rendered entries on a target.
#[derive(Clone)]
pub struct EntryRenderer {
    target: Arc<dyn RenderTarget>,
}

impl EntryRenderer {
    pub fn new(target: Arc<dyn RenderTarget>) -> Self {
        Self { target }
    }

    /// Replaces the target's entries with `entries`, preserving order.
    ///
    /// Returns how many entries were rendered.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoEntries`] for an empty list; the target is untouched.
    pub fn render(&self, entries: Vec<EntryContent>) -> Result<usize, RenderError> {
        if entries.is_empty() {
            return Err(RenderError::NoEntries);
        }

        let nodes: Arc<[Entry]> = entries.into_iter().map(Entry::from).collect();
        let count = nodes.len();
        self.target.replace_entries(nodes);
        Ok(count)
    }

    pub(crate) fn set_title(&self, title: &str) {
        self.target.set_title(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::document::Document;

    fn renderer() -> (Arc<Document>, EntryRenderer) {
        let doc = Arc::new(Document::new());
        let renderer = EntryRenderer::new(doc.clone());
        (doc, renderer)
    }

    #[test]
    fn test_render_replaces_not_appends() {
        let (doc, renderer) = renderer();
        renderer
            .render(vec![
                EntryContent::new("a", None, None),
                EntryContent::new("b", None, None),
                EntryContent::new("c", None, None),
            ])
            .unwrap();
        let count = renderer
            .render(vec![EntryContent::new("d", None, None)])
            .unwrap();

        assert_eq!(count, 1);
        let entries = doc.feed.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text(), "d");
    }

    #[test]
    fn test_render_preserves_order_and_text() {
        let (doc, renderer) = renderer();
        renderer
            .render(vec![
                EntryContent::new("first", None, Some("one".into())),
                EntryContent::new("second", None, None),
            ])
            .unwrap();

        let texts: Vec<_> = doc.feed.entries().iter().map(|e| e.text().to_string()).collect();
        assert_eq!(texts, vec!["first\none".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_render_empty_keeps_previous() {
        let (doc, renderer) = renderer();
        renderer
            .render(vec![EntryContent::new("kept", None, None)])
            .unwrap();

        assert_eq!(renderer.render(Vec::new()), Err(RenderError::NoEntries));
        assert_eq!(doc.feed.entries()[0].text(), "kept");
    }
}
