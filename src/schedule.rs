//! Cancellable scheduled tasks
//!
//! The redraw loop and the typewriter reschedule themselves forever. Each
//! loop is owned through a [`TaskHandle`]; cancelling it stops the next
//! reschedule. [`VirtualTimeline`] drives such loops in virtual time so
//! tests can run several cycles without real timers.

use std::cell::Cell;
use std::rc::Rc;

/// Shared cancel flag for one recurring task
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Deterministic clock for a self-rescheduling step function.
///
/// The step returns the delay (ms) before it wants to run again.
#[derive(Debug)]
pub struct VirtualTimeline {
    now_ms: u64,
    next_due_ms: Option<u64>,
    handle: TaskHandle,
}

impl VirtualTimeline {
    /// First step due after `first_delay_ms`
    pub fn new(first_delay_ms: u32) -> Self {
        Self {
            now_ms: 0,
            next_due_ms: Some(first_delay_ms as u64),
            handle: TaskHandle::new(),
        }
    }

    pub fn handle(&self) -> TaskHandle {
        self.handle.clone()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Time of the next pending step, if any
    pub fn next_due_ms(&self) -> Option<u64> {
        if self.handle.is_cancelled() {
            None
        } else {
            self.next_due_ms
        }
    }

    /// Move time forward by `ms`, running every step that falls due.
    /// Returns how many steps ran.
    pub fn advance<F: FnMut() -> u32>(&mut self, ms: u64, mut step: F) -> usize {
        let end = self.now_ms + ms;
        let mut ran = 0;
        while let Some(due) = self.next_due_ms() {
            if due > end {
                break;
            }
            self.now_ms = due;
            // Zero delays still advance time so the loop terminates
            let delay = step().max(1);
            ran += 1;
            self.next_due_ms = Some(due + delay as u64);
        }
        self.now_ms = end;
        ran
    }

    /// Run exactly one pending step, jumping time to it
    pub fn run_next<F: FnOnce() -> u32>(&mut self, step: F) -> bool {
        let Some(due) = self.next_due_ms() else {
            return false;
        };
        self.now_ms = due;
        self.next_due_ms = Some(due + step() as u64);
        true
    }
}
