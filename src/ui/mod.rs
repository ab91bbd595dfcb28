//! The widget's view side: document, menu and entry rendering.
//!
//! Nothing here touches the network. The loader hands fetched content to
//! [`EntryRenderer`], which writes into any [`RenderTarget`]; [`Document`]
//! is the in-memory target used by the session.

mod document;
mod menu;
mod render;

pub use document::{Document, Entry, FeedContainer, RootElement, MENU_HIDDEN_CLASS};
pub use menu::{MenuController, MenuIcon, MenuState};
pub use render::{EntryRenderer, RenderError, RenderTarget};
