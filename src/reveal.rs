//! Reveal-on-scroll
//!
//! Each watched element moves one way from pending to visible the first
//! time enough of it enters the viewport, and is never watched again.
//!
//! Watching goes through a [`RevealBackend`]. [`ObserverBackend`] wraps a
//! [`ViewportObserver`] (IntersectionObserver in the browser);
//! [`ImmediateBackend`] is used when no observer exists and reveals every
//! element as soon as it is watched.

use crate::settings::RevealSettings;
use crate::surface::UiSurface;

/// Viewport-intersection capability
pub trait ViewportObserver<E> {
    fn observe(&mut self, target: &E);
    fn unobserve(&mut self, target: &E);
}

/// One intersection change reported by the observer
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `[0, 1]`
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Visible,
}

/// How elements get watched
pub trait RevealBackend<E> {
    /// Start watching; returns the element's state right after
    fn watch(&mut self, target: &E) -> RevealState;
    /// Stop watching a revealed element
    fn release(&mut self, target: &E);
}

/// Watch through a viewport observer
pub struct ObserverBackend<O> {
    observer: O,
}

impl<O> ObserverBackend<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

impl<E, O: ViewportObserver<E>> RevealBackend<E> for ObserverBackend<O> {
    fn watch(&mut self, target: &E) -> RevealState {
        self.observer.observe(target);
        RevealState::Pending
    }

    fn release(&mut self, target: &E) {
        self.observer.unobserve(target);
    }
}

/// No observer available: everything is visible at once
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateBackend;

impl<E> RevealBackend<E> for ImmediateBackend {
    fn watch(&mut self, _target: &E) -> RevealState {
        RevealState::Visible
    }

    fn release(&mut self, _target: &E) {}
}

pub struct RevealAnimator<S: UiSurface, B> {
    items: Vec<(S::Element, RevealState)>,
    backend: B,
    threshold: f64,
    visible_flag: String,
}

impl<S: UiSurface, B: RevealBackend<S::Element>> RevealAnimator<S, B> {
    /// Watch every element in `targets`
    pub fn start(
        surface: &mut S,
        targets: Vec<S::Element>,
        mut backend: B,
        settings: &RevealSettings,
        visible_flag: &str,
    ) -> Self {
        let items = targets
            .into_iter()
            .map(|target| {
                let state = backend.watch(&target);
                if state == RevealState::Visible {
                    surface.set_flag(&target, visible_flag, true);
                }
                (target, state)
            })
            .collect();
        Self {
            items,
            backend,
            threshold: settings.threshold,
            visible_flag: visible_flag.to_string(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self, target: &S::Element) -> Option<RevealState> {
        self.items.iter().find(|(t, _)| t == target).map(|(_, s)| *s)
    }

    pub fn pending(&self) -> usize {
        self.items.iter().filter(|(_, s)| *s == RevealState::Pending).count()
    }

    /// Handle a batch of intersection changes; returns how many elements
    /// were revealed
    pub fn on_entries(&mut self, surface: &mut S, entries: &[IntersectionEntry<S::Element>]) -> usize {
        let mut revealed = 0;
        for entry in entries {
            // Reported ratios are rounded, allow a hair under the threshold
            if !entry.is_intersecting || entry.ratio + 1e-3 < self.threshold {
                continue;
            }
            let Some((target, state)) = self
                .items
                .iter_mut()
                .find(|(t, s)| *t == entry.target && *s == RevealState::Pending)
            else {
                continue;
            };
            *state = RevealState::Visible;
            surface.set_flag(target, &self.visible_flag, true);
            self.backend.release(target);
            revealed += 1;
        }
        revealed
    }
}
