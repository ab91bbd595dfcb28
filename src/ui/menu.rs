use std::fmt;
use std::sync::Arc;

use crate::ui::document::{Document, MENU_HIDDEN_CLASS};

/// Visibility of the slide-out menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Hidden,
    Visible,
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuState::Hidden => f.write_str("hidden"),
            MenuState::Visible => f.write_str("visible"),
        }
    }
}

/// Two-state menu toggle.
///
/// Holds no state of its own: visibility is the `menu-hidden` class on the
/// document root, so what is shown and what `is_hidden` reports always agree.
#[derive(Clone)]
pub struct MenuController {
    document: Arc<Document>,
}

impl MenuController {
    /// Attaches to `document` and hides the menu.
    pub fn new(document: Arc<Document>) -> Self {
        document.root.add_class(MENU_HIDDEN_CLASS);
        Self { document }
    }

    pub fn is_hidden(&self) -> bool {
        self.document.root.has_class(MENU_HIDDEN_CLASS)
    }

    pub fn state(&self) -> MenuState {
        if self.is_hidden() {
            MenuState::Hidden
        } else {
            MenuState::Visible
        }
    }

    /// Hidden → Visible or Visible → Hidden. Returns the new state.
    pub fn toggle(&self) -> MenuState {
        self.document.root.toggle_class(MENU_HIDDEN_CLASS);
        let state = self.state();
        tracing::debug!(%state, "Menu toggled");
        state
    }

    /// Forces the menu closed, e.g. after a feed is picked from it.
    pub fn hide(&self) {
        self.document.root.add_class(MENU_HIDDEN_CLASS);
    }
}

/// The clickable menu icon; every click is exactly one toggle.
#[derive(Clone)]
pub struct MenuIcon {
    menu: MenuController,
}

impl MenuIcon {
    pub fn new(menu: MenuController) -> Self {
        Self { menu }
    }

    pub fn click(&self) -> MenuState {
        self.menu.toggle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn menu() -> MenuController {
        MenuController::new(Arc::new(Document::new()))
    }

    #[test]
    fn test_hidden_by_default() {
        let menu = menu();
        assert!(menu.is_hidden());
        assert_eq!(menu.state(), MenuState::Hidden);
    }

    #[test]
    fn test_click_shows_then_hides() {
        let menu = menu();
        let icon = MenuIcon::new(menu.clone());

        assert_eq!(icon.click(), MenuState::Visible);
        assert!(!menu.is_hidden());

        assert_eq!(icon.click(), MenuState::Hidden);
        assert!(menu.is_hidden());
    }

    #[test]
    fn test_hide_is_idempotent() {
        let menu = menu();
        menu.hide();
        assert!(menu.is_hidden());
        menu.toggle();
        menu.hide();
        menu.hide();
        assert!(menu.is_hidden());
    }

    #[test]
    fn test_state_reads_root_flag() {
        let doc = Arc::new(Document::new());
        let menu = MenuController::new(doc.clone());
        doc.root.remove_class(MENU_HIDDEN_CLASS);
        assert_eq!(menu.state(), MenuState::Visible);
    }

    proptest! {
        #[test]
        fn prop_even_clicks_leave_menu_hidden(clicks in 0usize..64) {
            let menu = menu();
            let icon = MenuIcon::new(menu.clone());
            for _ in 0..clicks {
                icon.click();
            }
            prop_assert_eq!(menu.is_hidden(), clicks % 2 == 0);
        }
    }
}
