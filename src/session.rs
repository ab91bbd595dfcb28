//! One widget instance: document, menu, registry and loader wired together.
//!
//! State that a page would keep globally (the `menu-hidden` flag, the single
//! `.feed` container) lives here instead, so several sessions can coexist.

use std::sync::Arc;

use crate::feed::{FeedLoader, FeedRegistry, FeedSource, LoadError, LoadHandle};
use crate::ui::{Document, Entry, EntryRenderer, MenuController, MenuIcon};

pub struct Session<S> {
    document: Arc<Document>,
    menu: MenuController,
    menu_icon: MenuIcon,
    loader: FeedLoader<S>,
}

impl<S: FeedSource> Session<S> {
    /// Builds the document with the menu hidden and nothing rendered yet.
    pub fn new(registry: FeedRegistry, source: S) -> Self {
        let document = Arc::new(Document::new());
        let menu = MenuController::new(Arc::clone(&document));
        let menu_icon = MenuIcon::new(menu.clone());
        let renderer = EntryRenderer::new(document.clone());
        let loader = FeedLoader::new(Arc::new(registry), source, renderer);

        Self {
            document,
            menu,
            menu_icon,
            loader,
        }
    }

    /// Loads the first feed, as the widget does on start-up.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed registry, which holds at least one feed.
    pub fn init(&self) -> Result<LoadHandle, LoadError> {
        self.loader.load_feed(0)
    }

    pub fn load_feed(&self, index: usize) -> Result<LoadHandle, LoadError> {
        self.loader.load_feed(index)
    }

    /// A click on a feed in the menu's list: closes the menu, loads the feed.
    ///
    /// # Errors
    ///
    /// [`LoadError::IndexOutOfRange`]; the menu is left as it was.
    pub fn select_feed(&self, index: usize) -> Result<LoadHandle, LoadError> {
        let handle = self.loader.load_feed(index)?;
        self.menu.hide();
        Ok(handle)
    }

    pub fn registry(&self) -> &FeedRegistry {
        self.loader.registry()
    }

    pub fn loader(&self) -> &FeedLoader<S> {
        &self.loader
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn menu_icon(&self) -> &MenuIcon {
        &self.menu_icon
    }

    pub fn is_menu_hidden(&self) -> bool {
        self.menu.is_hidden()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Snapshot of the rendered `.feed .entry` nodes.
    pub fn entries(&self) -> Arc<[Entry]> {
        self.document.feed.entries()
    }

    pub fn header_title(&self) -> String {
        self.document.header_title()
    }
}
