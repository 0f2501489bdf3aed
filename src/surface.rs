//! UI surface abstraction
//!
//! Components never touch the DOM directly. They look elements up and flip
//! named style flags (CSS classes) through [`UiSurface`], so the same logic
//! runs against the live page (`platform::web::DomSurface`) or against
//! [`MemorySurface`] in tests and headless runs.

use std::collections::{BTreeMap, BTreeSet};

/// Element lookup and style-flag toggling
pub trait UiSurface {
    /// Handle to one element of the surface
    type Element: Clone + PartialEq;

    /// Find an element by identifier
    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// All elements matching a selector, in document order
    fn select_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Descendants of `parent` matching a selector, in document order
    fn select_within(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    fn has_flag(&self, el: &Self::Element, flag: &str) -> bool;

    /// Add (`on = true`) or remove a flag
    fn set_flag(&mut self, el: &Self::Element, flag: &str, on: bool);

    /// Replace the element's text content
    fn set_text(&mut self, el: &Self::Element, text: &str);

    /// Distance (px) from the document top to the element's top edge
    fn offset_top(&self, el: &Self::Element) -> f64;

    /// Smoothly scroll the element into view
    fn scroll_into_view(&mut self, el: &Self::Element);

    /// Flip a flag, returning its new state
    fn toggle_flag(&mut self, el: &Self::Element, flag: &str) -> bool {
        let on = !self.has_flag(el, flag);
        self.set_flag(el, flag, on);
        on
    }

    fn id_of(&self, el: &Self::Element) -> Option<String> {
        self.attribute(el, "id").filter(|id| !id.is_empty())
    }
}

/// Handle into a [`MemorySurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    parent: Option<usize>,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    offset_top: f64,
}

/// In-memory element tree
///
/// Supports the selector subset the effects use: comma-separated groups of
/// descendant chains, each step a compound of `tag`, `#id`, `.class` and
/// `[attr^="prefix"]` / `[attr="value"]`.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    /// Elements passed to `scroll_into_view`, oldest first
    pub scrolled_to: Vec<NodeRef>,
    /// Number of `set_text` calls seen
    pub text_writes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. `id` and `class` attributes are recognised;
    /// `class` may hold several space-separated names.
    pub fn insert(&mut self, parent: Option<NodeRef>, tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
        let mut node = Node {
            tag: tag.to_ascii_lowercase(),
            parent: parent.map(|p| p.0),
            ..Default::default()
        };
        for (name, value) in attrs {
            if *name == "class" {
                node.classes.extend(value.split_whitespace().map(str::to_string));
            } else {
                node.attrs.insert(name.to_string(), value.to_string());
            }
        }
        self.nodes.push(node);
        NodeRef(self.nodes.len() - 1)
    }

    pub fn set_offset_top(&mut self, el: NodeRef, top: f64) {
        self.nodes[el.0].offset_top = top;
    }

    pub fn text(&self, el: NodeRef) -> &str {
        &self.nodes[el.0].text
    }

    fn is_descendant(&self, node: usize, ancestor: usize) -> bool {
        let mut cur = self.nodes[node].parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes[p].parent;
        }
        false
    }

    fn matches(&self, node: usize, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .any(|group| {
                let chain: Vec<Compound> = group.split_whitespace().map(Compound::parse).collect();
                self.matches_chain(node, &chain)
            })
    }

    fn matches_chain(&self, node: usize, chain: &[Compound]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !last.matches(&self.nodes[node]) {
            return false;
        }
        // Walk ancestors right-to-left, greedily matching the remaining steps
        let mut remaining = rest;
        let mut cur = self.nodes[node].parent;
        while let Some((step, before)) = remaining.split_last() {
            let Some(p) = cur else {
                return false;
            };
            if step.matches(&self.nodes[p]) {
                remaining = before;
            }
            cur = self.nodes[p].parent;
        }
        true
    }
}

/// One compound selector step
#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AttrOp {
    Equals,
    Prefix,
}

impl Compound {
    fn parse(src: &str) -> Self {
        let mut out = Compound::default();
        let mut rest = src;

        let head_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if head_end > 0 {
            out.tag = Some(rest[..head_end].to_ascii_lowercase());
        }
        rest = &rest[head_end..];

        while let Some(c) = rest.chars().next() {
            match c {
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    let body = &rest[1..end];
                    let (name, op, value) = if let Some((n, v)) = body.split_once("^=") {
                        (n, AttrOp::Prefix, v)
                    } else if let Some((n, v)) = body.split_once('=') {
                        (n, AttrOp::Equals, v)
                    } else {
                        (body, AttrOp::Prefix, "")
                    };
                    let value = value.trim_matches(|c| c == '"' || c == '\'');
                    out.attrs.push((name.to_string(), op, value.to_string()));
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                    let name = body[..end].to_string();
                    if c == '#' {
                        out.id = Some(name);
                    } else {
                        out.classes.push(name);
                    }
                    rest = &body[end..];
                }
                _ => break,
            }
        }
        out
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != node.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, op, value)| match node.attrs.get(name) {
            Some(actual) => match op {
                AttrOp::Equals => actual == value,
                AttrOp::Prefix => actual.starts_with(value.as_str()),
            },
            None => false,
        })
    }
}

impl UiSurface for MemorySurface {
    type Element = NodeRef;

    fn by_id(&self, id: &str) -> Option<NodeRef> {
        self.nodes
            .iter()
            .position(|n| n.attrs.get("id").map(String::as_str) == Some(id))
            .map(NodeRef)
    }

    fn select_all(&self, selector: &str) -> Vec<NodeRef> {
        (0..self.nodes.len())
            .filter(|&i| self.matches(i, selector))
            .map(NodeRef)
            .collect()
    }

    fn select_within(&self, parent: &NodeRef, selector: &str) -> Vec<NodeRef> {
        (0..self.nodes.len())
            .filter(|&i| self.is_descendant(i, parent.0) && self.matches(i, selector))
            .map(NodeRef)
            .collect()
    }

    fn attribute(&self, el: &NodeRef, name: &str) -> Option<String> {
        let node = &self.nodes[el.0];
        if name == "class" {
            return Some(node.classes.iter().cloned().collect::<Vec<_>>().join(" "));
        }
        node.attrs.get(name).cloned()
    }

    fn has_flag(&self, el: &NodeRef, flag: &str) -> bool {
        self.nodes[el.0].classes.contains(flag)
    }

    fn set_flag(&mut self, el: &NodeRef, flag: &str, on: bool) {
        let classes = &mut self.nodes[el.0].classes;
        if on {
            classes.insert(flag.to_string());
        } else {
            classes.remove(flag);
        }
    }

    fn set_text(&mut self, el: &NodeRef, text: &str) {
        self.nodes[el.0].text = text.to_string();
        self.text_writes += 1;
    }

    fn offset_top(&self, el: &NodeRef) -> f64 {
        self.nodes[el.0].offset_top
    }

    fn scroll_into_view(&mut self, el: &NodeRef) {
        self.scrolled_to.push(*el);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_page() -> (MemorySurface, NodeRef, NodeRef, NodeRef) {
        let mut s = MemorySurface::new();
        let nav = s.insert(None, "nav", &[("id", "navbar")]);
        let list = s.insert(Some(nav), "ul", &[("class", "nav-links"), ("id", "navLinks")]);
        let about = s.insert(Some(list), "a", &[("href", "#about")]);
        let ext = s.insert(Some(list), "a", &[("href", "https://example.com")]);
        (s, list, about, ext)
    }

    #[test]
    fn test_by_id() {
        let (s, list, _, _) = nav_page();
        assert_eq!(s.by_id("navLinks"), Some(list));
        assert_eq!(s.by_id("missing"), None);
    }

    #[test]
    fn test_descendant_selector() {
        let (s, _, about, ext) = nav_page();
        assert_eq!(s.select_all(".nav-links a"), vec![about, ext]);
        assert!(s.select_all(".footer a").is_empty());
    }

    #[test]
    fn test_attribute_prefix_selector() {
        let (s, _, about, _) = nav_page();
        assert_eq!(s.select_all("a[href^=\"#\"]"), vec![about]);
    }

    #[test]
    fn test_selector_groups_keep_document_order() {
        let mut s = MemorySurface::new();
        let hero = s.insert(None, "header", &[("class", "hero")]);
        let sec = s.insert(None, "section", &[("class", "section")]);
        assert_eq!(s.select_all(".section, .hero"), vec![hero, sec]);
    }

    #[test]
    fn test_select_within() {
        let (mut s, list, about, ext) = nav_page();
        let stray = s.insert(None, "a", &[("href", "#top")]);
        let found = s.select_within(&list, "a");
        assert_eq!(found, vec![about, ext]);
        assert!(!found.contains(&stray));
    }

    #[test]
    fn test_flags() {
        let (mut s, list, _, _) = nav_page();
        assert!(s.has_flag(&list, "nav-links"));
        assert!(s.toggle_flag(&list, "open"));
        assert!(s.has_flag(&list, "open"));
        assert!(!s.toggle_flag(&list, "open"));
        s.set_flag(&list, "open", false);
        assert!(!s.has_flag(&list, "open"));
    }
}
