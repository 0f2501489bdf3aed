//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only):
//! - `DomSurface`: `UiSurface` over the live document
//! - Owned event listeners, removed on drop
//! - Cancellable animation-frame and timeout loops
//! - IntersectionObserver-backed reveal watching
//! - `PageEffects`: wires every effect to the page

#[cfg(target_arch = "wasm32")]
pub mod web;
