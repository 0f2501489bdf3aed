//! Browser glue

pub mod events;
pub mod observer;
pub mod page;
pub mod surface;
pub mod tasks;

pub use events::EventListener;
pub use observer::DomObserver;
pub use page::PageEffects;
pub use surface::DomSurface;
pub use tasks::{FrameLoop, TimerLoop};

use crate::error::{FxError, Result};

pub(crate) fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| FxError::Js("no window".to_string()))
}
