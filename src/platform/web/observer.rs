//! IntersectionObserver capability

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;
use crate::reveal::{IntersectionEntry, ViewportObserver};
use crate::settings::RevealSettings;

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Whether the browser has `IntersectionObserver`
pub fn is_supported(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Wraps an `IntersectionObserver` and the closure it calls back into
pub struct DomObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl DomObserver {
    /// `on_entries` receives each batch of intersection changes
    pub fn new<F>(settings: &RevealSettings, mut on_entries: F) -> Result<Self>
    where
        F: FnMut(Vec<IntersectionEntry<Element>>) + 'static,
    {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|e| IntersectionEntry {
                        target: e.target(),
                        is_intersecting: e.is_intersecting(),
                        ratio: e.intersection_ratio(),
                    })
                    .collect();
                on_entries(batch);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(settings.threshold));
        init.set_root_margin(&settings.root_margin());
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl ViewportObserver<Element> for DomObserver {
    fn observe(&mut self, target: &Element) {
        self.observer.observe(target);
    }

    fn unobserve(&mut self, target: &Element) {
        self.observer.unobserve(target);
    }
}
