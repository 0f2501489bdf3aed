//! Mobile menu toggle
//!
//! The toggle button carries the `active` flag and the panel the `open`
//! flag; both always mirror one boolean.

use crate::settings::PageBindings;
use crate::surface::UiSurface;

pub struct MobileMenu<S: UiSurface> {
    toggle: S::Element,
    panel: S::Element,
    links: Vec<S::Element>,
    open: bool,
    active_flag: String,
    open_flag: String,
}

impl<S: UiSurface> MobileMenu<S> {
    /// `None` unless both the toggle button and the panel exist
    pub fn bind(surface: &S, bindings: &PageBindings) -> Option<Self> {
        let toggle = surface.by_id(&bindings.menu_toggle_id)?;
        let panel = surface.by_id(&bindings.menu_panel_id)?;
        let links = surface.select_within(&panel, "a");
        Some(Self {
            toggle,
            panel,
            links,
            open: false,
            active_flag: bindings.active_flag.clone(),
            open_flag: bindings.open_flag.clone(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_element(&self) -> &S::Element {
        &self.toggle
    }

    /// Links inside the panel; a click on any of them closes the menu
    pub fn links(&self) -> &[S::Element] {
        &self.links
    }

    /// Toggle-button click
    pub fn toggle(&mut self, surface: &mut S) -> bool {
        self.set_open(surface, !self.open);
        self.open
    }

    /// Link click inside the panel; idempotent
    pub fn close(&mut self, surface: &mut S) {
        self.set_open(surface, false);
    }

    fn set_open(&mut self, surface: &mut S, open: bool) {
        self.open = open;
        surface.set_flag(&self.toggle, &self.active_flag, open);
        surface.set_flag(&self.panel, &self.open_flag, open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, NodeRef};

    fn page() -> (MemorySurface, NodeRef, NodeRef) {
        let mut s = MemorySurface::new();
        let toggle = s.insert(None, "button", &[("id", "navToggle")]);
        let panel = s.insert(None, "ul", &[("id", "navLinks")]);
        let item = s.insert(Some(panel), "li", &[]);
        s.insert(Some(item), "a", &[("href", "#about")]);
        s.insert(Some(item), "a", &[("href", "#work")]);
        (s, toggle, panel)
    }

    #[test]
    fn test_requires_both_elements() {
        let mut s = MemorySurface::new();
        s.insert(None, "button", &[("id", "navToggle")]);
        assert!(MobileMenu::bind(&s, &PageBindings::default()).is_none());
    }

    #[test]
    fn test_toggle_flips_both_flags() {
        let (mut s, toggle, panel) = page();
        let mut menu = MobileMenu::bind(&s, &PageBindings::default()).unwrap();
        assert_eq!(menu.links().len(), 2);

        assert!(menu.toggle(&mut s));
        assert!(s.has_flag(&toggle, "active"));
        assert!(s.has_flag(&panel, "open"));

        assert!(!menu.toggle(&mut s));
        assert!(!s.has_flag(&toggle, "active"));
        assert!(!s.has_flag(&panel, "open"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut s, toggle, panel) = page();
        let mut menu = MobileMenu::bind(&s, &PageBindings::default()).unwrap();
        menu.toggle(&mut s);
        menu.close(&mut s);
        assert!(!menu.is_open());
        menu.close(&mut s);
        assert!(!menu.is_open());
        assert!(!s.has_flag(&toggle, "active"));
        assert!(!s.has_flag(&panel, "open"));
    }
}
