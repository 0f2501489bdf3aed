//! Smooth scrolling for same-page fragment links

use crate::surface::UiSurface;

/// Element id a fragment href points at (`"#about"` -> `"about"`)
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// What the click handler decided
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorAction<E> {
    /// Default navigation suppressed; scrolling smoothly to the target
    Intercept(E),
    /// No target on the page; let the browser handle the click
    PassThrough,
}

impl<E> AnchorAction<E> {
    pub fn prevents_default(&self) -> bool {
        matches!(self, AnchorAction::Intercept(_))
    }
}

/// Click on a link with `href`: scroll to its target if one exists
pub fn on_click<S: UiSurface>(surface: &mut S, href: &str) -> AnchorAction<S::Element> {
    match fragment_id(href).and_then(|id| surface.by_id(id)) {
        Some(target) => {
            surface.scroll_into_view(&target);
            AnchorAction::Intercept(target)
        }
        None => AnchorAction::PassThrough,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#about"), Some("about"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/page#about"), None);
        assert_eq!(fragment_id("https://example.com"), None);
    }

    #[test]
    fn test_click_scrolls_to_target() {
        let mut s = MemorySurface::new();
        let about = s.insert(None, "section", &[("id", "about")]);
        let action = on_click(&mut s, "#about");
        assert!(action.prevents_default());
        assert_eq!(action, AnchorAction::Intercept(about));
        assert_eq!(s.scrolled_to, vec![about]);
    }

    #[test]
    fn test_missing_target_passes_through() {
        let mut s = MemorySurface::new();
        s.insert(None, "section", &[("id", "about")]);
        assert_eq!(on_click(&mut s, "#contact"), AnchorAction::PassThrough);
        assert_eq!(on_click(&mut s, "#"), AnchorAction::PassThrough);
        assert!(s.scrolled_to.is_empty());
    }
}
