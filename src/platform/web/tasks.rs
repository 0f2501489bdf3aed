//! Cancellable self-rescheduling loops
//!
//! Both loops keep their JS closure in a shared slot so the closure can
//! reschedule itself. Cancelling clears the pending browser callback and
//! empties the slot, which breaks the closure's reference cycle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::window;
use crate::error::Result;
use crate::schedule::TaskHandle;

type Slot<T> = Rc<RefCell<Option<Closure<T>>>>;

/// Runs a callback on every animation frame until cancelled
pub struct FrameLoop {
    window: Window,
    handle: TaskHandle,
    pending: Rc<Cell<Option<i32>>>,
    slot: Slot<dyn FnMut(f64)>,
}

impl FrameLoop {
    pub fn start<F>(mut frame: F) -> Result<Self>
    where
        F: FnMut(f64) + 'static,
    {
        let window = window()?;
        let handle = TaskHandle::new();
        let pending = Rc::new(Cell::new(None));
        let slot: Slot<dyn FnMut(f64)> = Rc::new(RefCell::new(None));

        let closure = {
            let (window, handle, pending, slot) =
                (window.clone(), handle.clone(), pending.clone(), slot.clone());
            Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                pending.set(None);
                if handle.is_cancelled() {
                    return;
                }
                frame(time);
                if let Some(cb) = slot.borrow().as_ref() {
                    pending.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            })
        };
        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *slot.borrow_mut() = Some(closure);

        Ok(Self { window, handle, pending, slot })
    }

    pub fn cancel(&self) {
        self.handle.cancel();
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs a step after a timeout; the step returns the next delay (ms)
pub struct TimerLoop {
    window: Window,
    handle: TaskHandle,
    pending: Rc<Cell<Option<i32>>>,
    slot: Slot<dyn FnMut()>,
}

impl TimerLoop {
    pub fn start<F>(first_delay_ms: u32, mut step: F) -> Result<Self>
    where
        F: FnMut() -> u32 + 'static,
    {
        let window = window()?;
        let handle = TaskHandle::new();
        let pending = Rc::new(Cell::new(None));
        let slot: Slot<dyn FnMut()> = Rc::new(RefCell::new(None));

        let closure = {
            let (window, handle, pending, slot) =
                (window.clone(), handle.clone(), pending.clone(), slot.clone());
            Closure::<dyn FnMut()>::new(move || {
                pending.set(None);
                if handle.is_cancelled() {
                    return;
                }
                let delay = step();
                if let Some(cb) = slot.borrow().as_ref() {
                    pending.set(
                        window
                            .set_timeout_with_callback_and_timeout_and_arguments_0(
                                cb.as_ref().unchecked_ref(),
                                delay as i32,
                            )
                            .ok(),
                    );
                }
            })
        };
        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            first_delay_ms as i32,
        )?;
        pending.set(Some(id));
        *slot.borrow_mut() = Some(closure);

        Ok(Self { window, handle, pending, slot })
    }

    pub fn cancel(&self) {
        self.handle.cancel();
        if let Some(id) = self.pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
