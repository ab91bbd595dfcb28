//! In-memory document the widget renders into.
//!
//! Stands in for the page: a root element carrying class flags (the menu
//! reads `menu-hidden` from it), a header title, and the `.feed` container
//! holding rendered entries.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::feed::EntryContent;
use crate::ui::render::RenderTarget;

/// Class on the root element that hides the menu.
pub const MENU_HIDDEN_CLASS: &str = "menu-hidden";

/// Class flags of the document root element.
#[derive(Debug, Default)]
pub struct RootElement {
    classes: Mutex<BTreeSet<String>>,
}

impl RootElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(class)
    }

    pub fn add_class(&self, class: &str) {
        self.classes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(class.to_string());
    }

    pub fn remove_class(&self, class: &str) {
        self.classes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(class);
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&self, class: &str) -> bool {
        let mut classes = self.classes.lock().unwrap_or_else(PoisonError::into_inner);
        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }
}

/// A rendered `.entry` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: String,
    pub link: Option<String>,
    pub published: Option<i64>,
    text: String,
}

impl Entry {
    /// Text content: the title, then the snippet on its own line if any.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<EntryContent> for Entry {
    fn from(content: EntryContent) -> Self {
        let text = match content.snippet {
            Some(snippet) => format!("{}\n{}", content.title, snippet),
            None => content.title,
        };
        Self {
            id: content.id,
            link: content.link,
            published: content.published,
            text,
        }
    }
}

/// The `.feed` container.
///
/// Holds an immutable snapshot that is swapped in one step, so readers see
/// either the previous collection or the new one, never a mix.
#[derive(Debug)]
pub struct FeedContainer {
    entries: RwLock<Arc<[Entry]>>,
}

impl Default for FeedContainer {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl FeedContainer {
    /// Current entries; the returned snapshot never changes.
    pub fn entries(&self) -> Arc<[Entry]> {
        Arc::clone(&self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Root element, header title and feed container for one widget instance.
#[derive(Debug, Default)]
pub struct Document {
    pub root: RootElement,
    pub feed: FeedContainer,
    header_title: RwLock<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_title(&self) -> String {
        self.header_title
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderTarget for Document {
    fn replace_entries(&self, entries: Arc<[Entry]>) {
        *self.feed.entries.write().unwrap_or_else(PoisonError::into_inner) = entries;
    }

    fn set_title(&self, title: &str) {
        *self.header_title.write().unwrap_or_else(PoisonError::into_inner) = title.to_string();
    }
}
