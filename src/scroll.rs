//! Scroll tracking: navbar "scrolled" flag and active section link
//!
//! Everything is recomputed from the current scroll offset and the
//! sections' current offsets on every call; nothing carries over between
//! scroll events.

use crate::settings::{PageBindings, ScrollSettings};
use crate::surface::UiSurface;

/// Whether the page has scrolled past `threshold`
#[inline]
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Index of the last section (document order) whose top, minus the
/// lookahead, is at or above the scroll position. `None` above all sections.
pub fn active_section(scroll_y: f64, tops: &[f64], lookahead: f64) -> Option<usize> {
    tops.iter()
        .enumerate()
        .filter(|&(_, &top)| scroll_y >= top - lookahead)
        .map(|(i, _)| i)
        .last()
}

/// Elements the tracker updates, looked up once at start
pub struct ScrollTracker<S: UiSurface> {
    navbar: Option<S::Element>,
    links: Vec<S::Element>,
    sections: Vec<S::Element>,
    settings: ScrollSettings,
    scrolled_flag: String,
    active_flag: String,
}

impl<S: UiSurface> ScrollTracker<S> {
    pub fn bind(surface: &S, bindings: &PageBindings, settings: ScrollSettings) -> Self {
        Self {
            navbar: surface.by_id(&bindings.navbar_id),
            links: surface.select_all(&bindings.nav_link_selector),
            sections: surface.select_all(&bindings.section_selector),
            settings,
            scrolled_flag: bindings.scrolled_flag.clone(),
            active_flag: bindings.active_flag.clone(),
        }
    }

    /// Apply both updates for `scroll_y`; returns the current section index
    pub fn update(&self, surface: &mut S, scroll_y: f64) -> Option<usize> {
        if let Some(navbar) = &self.navbar {
            let on = is_scrolled(scroll_y, self.settings.scrolled_threshold);
            surface.set_flag(navbar, &self.scrolled_flag, on);
        }

        let tops: Vec<f64> = self.sections.iter().map(|s| surface.offset_top(s)).collect();
        let current = active_section(scroll_y, &tops, self.settings.section_lookahead);

        let target = current
            .and_then(|i| surface.id_of(&self.sections[i]))
            .map(|id| format!("#{}", id));
        for link in &self.links {
            let href = surface.attribute(link, "href");
            let on = target.is_some() && href == target;
            surface.set_flag(link, &self.active_flag, on);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, NodeRef};

    #[test]
    fn test_scrolled_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
    }

    #[test]
    fn test_active_section_with_lookahead() {
        let tops = [0.0, 500.0, 1000.0];
        let picks: Vec<_> = [0.0, 450.0, 900.0, 1050.0]
            .iter()
            .map(|&y| active_section(y, &tops, 100.0))
            .collect();
        assert_eq!(picks, vec![Some(0), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn test_active_section_without_lookahead() {
        let tops = [0.0, 500.0, 1000.0];
        let picks: Vec<_> = [0.0, 450.0, 900.0, 1050.0]
            .iter()
            .map(|&y| active_section(y, &tops, 0.0))
            .collect();
        assert_eq!(picks, vec![Some(0), Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_no_section_above_first() {
        assert_eq!(active_section(0.0, &[300.0, 800.0], 100.0), None);
        assert_eq!(active_section(10.0, &[], 100.0), None);
    }

    struct Page {
        surface: MemorySurface,
        navbar: NodeRef,
        links: Vec<NodeRef>,
    }

    fn page() -> Page {
        let mut s = MemorySurface::new();
        let navbar = s.insert(None, "nav", &[("id", "navbar")]);
        let list = s.insert(Some(navbar), "ul", &[("class", "nav-links")]);
        let links = ["#home", "#about", "#work"]
            .iter()
            .map(|&href| s.insert(Some(list), "a", &[("href", href)]))
            .collect();
        for (id, class, top) in [("home", "hero", 0.0), ("about", "section", 500.0), ("work", "section", 1000.0)] {
            let el = s.insert(None, "section", &[("id", id), ("class", class)]);
            s.set_offset_top(el, top);
        }
        Page { surface: s, navbar, links }
    }

    fn active(p: &Page) -> Vec<bool> {
        p.links.iter().map(|l| p.surface.has_flag(l, "active")).collect()
    }

    #[test]
    fn test_update_marks_one_link() {
        let mut p = page();
        let tracker = ScrollTracker::bind(&p.surface, &PageBindings::default(), ScrollSettings::default());

        assert_eq!(tracker.update(&mut p.surface, 0.0), Some(0));
        assert!(!p.surface.has_flag(&p.navbar, "scrolled"));
        assert_eq!(active(&p), vec![true, false, false]);

        assert_eq!(tracker.update(&mut p.surface, 950.0), Some(2));
        assert!(p.surface.has_flag(&p.navbar, "scrolled"));
        assert_eq!(active(&p), vec![false, false, true]);

        assert_eq!(tracker.update(&mut p.surface, 20.0), Some(0));
        assert!(!p.surface.has_flag(&p.navbar, "scrolled"));
        assert_eq!(active(&p), vec![true, false, false]);
    }

    #[test]
    fn test_section_offsets_reread_each_update() {
        let mut p = page();
        let tracker = ScrollTracker::bind(&p.surface, &PageBindings::default(), ScrollSettings::default());
        let about = p.surface.by_id("about").unwrap();
        p.surface.set_offset_top(about, 2000.0);
        assert_eq!(tracker.update(&mut p.surface, 950.0), Some(2));
        assert_eq!(active(&p), vec![false, false, true]);
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut s = MemorySurface::new();
        let tracker = ScrollTracker::bind(&s, &PageBindings::default(), ScrollSettings::default());
        assert_eq!(tracker.update(&mut s, 500.0), None);
    }

    #[test]
    fn test_section_without_id_clears_links() {
        let mut s = MemorySurface::new();
        let list = s.insert(None, "ul", &[("class", "nav-links")]);
        let link = s.insert(Some(list), "a", &[("href", "#")]);
        s.insert(None, "div", &[("class", "hero")]);
        s.set_flag(&link, "active", true);
        let tracker = ScrollTracker::bind(&s, &PageBindings::default(), ScrollSettings::default());
        assert_eq!(tracker.update(&mut s, 0.0), Some(0));
        assert!(!s.has_flag(&link, "active"));
    }
}
