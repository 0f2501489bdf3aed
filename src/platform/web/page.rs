//! Wires every effect to the live page
//!
//! Each effect attaches independently. A missing element skips that effect
//! and a failed browser call is logged; neither stops the others.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, HtmlElement, Window};

use super::observer::{self, DomObserver};
use super::{DomSurface, EventListener, FrameLoop, TimerLoop, window};
use crate::anchor;
use crate::error::{FxError, Result};
use crate::menu::MobileMenu;
use crate::particles::ParticleField;
use crate::renderer::CanvasPainter;
use crate::reveal::{ImmediateBackend, ObserverBackend, RevealAnimator};
use crate::scroll::ScrollTracker;
use crate::settings::FxSettings;
use crate::surface::UiSurface;
use crate::typewriter::Typewriter;

type ObservedReveal = RevealAnimator<DomSurface, ObserverBackend<DomObserver>>;

/// Owns every loop, listener and observer the effects started
#[derive(Default)]
pub struct PageEffects {
    frame_loop: Option<FrameLoop>,
    timer_loop: Option<TimerLoop>,
    listeners: Vec<EventListener>,
    reveal: Option<Rc<RefCell<Option<ObservedReveal>>>>,
}

impl PageEffects {
    pub fn attach(settings: &FxSettings) -> Result<Self> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| FxError::Js("no document".to_string()))?;
        let surface = DomSurface::new(document);
        let mut fx = PageEffects::default();

        match fx.attach_particles(&window, &surface, settings) {
            Ok(true) => log::debug!("Particle field attached"),
            Ok(false) => log::debug!("No particle canvas, skipping"),
            Err(e) => log::warn!("Particle field disabled: {}", e),
        }
        match fx.attach_typewriter(&surface, settings) {
            Ok(true) => log::debug!("Typewriter attached"),
            Ok(false) => log::debug!("No typewriter element, skipping"),
            Err(e) => log::warn!("Typewriter disabled: {}", e),
        }
        if let Err(e) = fx.attach_scroll_tracker(&window, &surface, settings) {
            log::warn!("Scroll tracking disabled: {}", e);
        }
        if let Err(e) = fx.attach_menu(&surface, settings) {
            log::warn!("Mobile menu disabled: {}", e);
        }
        fx.attach_reveal(&window, &surface, settings);
        if let Err(e) = fx.attach_anchors(&surface, settings) {
            log::warn!("Smooth anchors disabled: {}", e);
        }

        log::info!("Page effects attached ({} listeners)", fx.listeners.len());
        Ok(fx)
    }

    /// Stop both loops, remove every listener and disconnect the observer
    pub fn teardown(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        if let Some(timer_loop) = self.timer_loop.take() {
            timer_loop.cancel();
        }
        self.listeners.clear();
        if let Some(reveal) = self.reveal.take() {
            if let Some(anim) = reveal.borrow_mut().take() {
                anim.backend().observer().disconnect();
            }
        }
    }

    fn attach_particles(&mut self, window: &Window, surface: &DomSurface, settings: &FxSettings) -> Result<bool> {
        let seed = js_sys::Date::now() as u64;
        let Some((field, canvas)) =
            ParticleField::bind(surface, &settings.bindings, settings.particles.clone(), seed, |el| {
                el.dyn_ref::<HtmlCanvasElement>().map(fit_to_container)
            })
        else {
            return Ok(false);
        };
        let canvas = canvas
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FxError::Js("particle target is not a canvas".to_string()))?;
        let field = Rc::new(RefCell::new(field));
        let mut painter = CanvasPainter::new(&canvas)?;

        let on_resize = {
            let field = field.clone();
            move |_: web_sys::Event| {
                let (w, h) = fit_to_container(&canvas);
                field.borrow_mut().resize(w, h);
            }
        };
        self.listeners.push(EventListener::new(window, "resize", on_resize)?);
        self.frame_loop = Some(FrameLoop::start(move |_time| {
            field.borrow_mut().frame(&mut painter);
        })?);
        Ok(true)
    }

    fn attach_typewriter(&mut self, surface: &DomSurface, settings: &FxSettings) -> Result<bool> {
        let Some((mut writer, target)) = Typewriter::bind(surface, &settings.bindings, &settings.typewriter)? else {
            return Ok(false);
        };
        let mut surface = surface.clone();
        self.timer_loop = Some(TimerLoop::start(0, move || writer.step_into(&mut surface, &target))?);
        Ok(true)
    }

    fn attach_scroll_tracker(&mut self, window: &Window, surface: &DomSurface, settings: &FxSettings) -> Result<()> {
        let tracker = ScrollTracker::bind(surface, &settings.bindings, settings.scroll.clone());
        let mut surface = surface.clone();
        tracker.update(&mut surface, scroll_y(window));

        let win = window.clone();
        self.listeners.push(EventListener::passive(window, "scroll", move |_| {
            tracker.update(&mut surface, scroll_y(&win));
        })?);
        Ok(())
    }

    fn attach_menu(&mut self, surface: &DomSurface, settings: &FxSettings) -> Result<()> {
        let Some(menu) = MobileMenu::bind(surface, &settings.bindings) else {
            log::debug!("No mobile menu, skipping");
            return Ok(());
        };
        let toggle = menu.toggle_element().clone();
        let links = menu.links().to_vec();
        let menu = Rc::new(RefCell::new(menu));

        let on_toggle = {
            let (menu, mut surface) = (menu.clone(), surface.clone());
            move |_: web_sys::Event| {
                menu.borrow_mut().toggle(&mut surface);
            }
        };
        self.listeners.push(EventListener::new(&toggle, "click", on_toggle)?);

        for link in links {
            let (menu, mut surface) = (menu.clone(), surface.clone());
            self.listeners.push(EventListener::new(&link, "click", move |_| {
                menu.borrow_mut().close(&mut surface);
            })?);
        }
        Ok(())
    }

    /// Never fails: without a working observer every target is revealed at once
    fn attach_reveal(&mut self, window: &Window, surface: &DomSurface, settings: &FxSettings) {
        let targets: Vec<Element> = surface.select_all(&settings.bindings.reveal_selector);
        if targets.is_empty() {
            return;
        }
        let flag = settings.bindings.visible_flag.as_str();
        let mut surface = surface.clone();

        if !observer::is_supported(window) {
            log::info!("IntersectionObserver unavailable, revealing {} elements", targets.len());
            RevealAnimator::start(&mut surface, targets, ImmediateBackend, &settings.reveal, flag);
            return;
        }

        let cell: Rc<RefCell<Option<ObservedReveal>>> = Rc::new(RefCell::new(None));
        let created = {
            let (cell, mut surface) = (cell.clone(), surface.clone());
            DomObserver::new(&settings.reveal, move |entries| {
                if let Some(anim) = cell.borrow_mut().as_mut() {
                    anim.on_entries(&mut surface, &entries);
                }
            })
        };
        let dom_observer = match created {
            Ok(dom_observer) => dom_observer,
            Err(e) => {
                log::warn!("IntersectionObserver failed ({}), revealing {} elements", e, targets.len());
                RevealAnimator::start(&mut surface, targets, ImmediateBackend, &settings.reveal, flag);
                return;
            }
        };
        let anim = RevealAnimator::start(
            &mut surface,
            targets,
            ObserverBackend::new(dom_observer),
            &settings.reveal,
            flag,
        );
        *cell.borrow_mut() = Some(anim);
        self.reveal = Some(cell);
    }

    fn attach_anchors(&mut self, surface: &DomSurface, settings: &FxSettings) -> Result<()> {
        for link in surface.select_all(&settings.bindings.anchor_selector) {
            let (el, mut surface) = (link.clone(), surface.clone());
            self.listeners.push(EventListener::new(&link, "click", move |event| {
                let Some(href) = el.get_attribute("href") else {
                    return;
                };
                if anchor::on_click(&mut surface, &href).prevents_default() {
                    event.prevent_default();
                }
            })?);
        }
        Ok(())
    }
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Match the canvas backing size to its container; returns the new size
fn fit_to_container(canvas: &HtmlCanvasElement) -> (f32, f32) {
    let (w, h) = canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        .map(|p| (p.offset_width(), p.offset_height()))
        .unwrap_or((canvas.width() as i32, canvas.height() as i32));
    let (w, h) = (w.max(0) as u32, h.max(0) as u32);
    canvas.set_width(w);
    canvas.set_height(h);
    (w as f32, h as f32)
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}
