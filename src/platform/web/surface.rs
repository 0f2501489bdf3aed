//! `UiSurface` over the live document

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollIntoViewOptions};

use crate::surface::UiSurface;

#[derive(Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn elements(list: Result<NodeList, wasm_bindgen::JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl UiSurface for DomSurface {
    type Element = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector))
    }

    fn select_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector))
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn has_flag(&self, el: &Element, flag: &str) -> bool {
        el.class_list().contains(flag)
    }

    fn set_flag(&mut self, el: &Element, flag: &str, on: bool) {
        let _ = el.class_list().toggle_with_force(flag, on);
    }

    fn set_text(&mut self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn offset_top(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map(|h| h.offset_top() as f64)
            .unwrap_or(0.0)
    }

    fn scroll_into_view(&mut self, el: &Element) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}
