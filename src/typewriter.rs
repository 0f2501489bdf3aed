//! Looping typewriter text
//!
//! Cycles forever through an ordered list of phrases. Each step inserts or
//! removes exactly one character and says how long to wait before the next
//! step:
//!
//! ```text
//! Typing --(last char typed)--> HoldFull --> Deleting --(last char removed)--> HoldEmpty
//!   ^                                                                            |
//!   +----------------------------- next phrase ----------------------------------+
//! ```

use crate::error::{FxError, Result};
use crate::settings::{PageBindings, TypewriterSettings};
use crate::surface::UiSurface;

/// What the typewriter is doing (or waiting on) after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// Revealing characters left to right
    Typing,
    /// Pausing on the fully typed phrase
    HoldFull,
    /// Removing characters right to left
    Deleting,
    /// Pausing on empty text before the next phrase
    HoldEmpty,
}

/// Delays between steps (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_ms: u32,
    pub hold_full_ms: u32,
    pub delete_ms: u32,
    pub hold_empty_ms: u32,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        let s = TypewriterSettings::default();
        Self {
            type_ms: s.type_ms,
            hold_full_ms: s.hold_full_ms,
            delete_ms: s.delete_ms,
            hold_empty_ms: s.hold_empty_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    phrase_idx: usize,
    /// Always within `[0, chars in current phrase]`
    char_count: usize,
    phase: TypewriterPhase,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, timing: TypewriterTiming) -> Result<Self> {
        if phrases.is_empty() {
            return Err(FxError::EmptyPhrases);
        }
        Ok(Self {
            phrases,
            timing,
            phrase_idx: 0,
            char_count: 0,
            phase: TypewriterPhase::Typing,
        })
    }

    pub fn from_settings(settings: &TypewriterSettings) -> Result<Self> {
        Self::new(
            settings.phrases.clone(),
            TypewriterTiming {
                type_ms: settings.type_ms,
                hold_full_ms: settings.hold_full_ms,
                delete_ms: settings.delete_ms,
                hold_empty_ms: settings.hold_empty_ms,
            },
        )
    }

    /// Find the text element; `Ok(None)` when the page has none
    pub fn bind<S: UiSurface>(
        surface: &S,
        bindings: &PageBindings,
        settings: &TypewriterSettings,
    ) -> Result<Option<(Self, S::Element)>> {
        let Some(target) = surface.by_id(&bindings.typed_text_id) else {
            return Ok(None);
        };
        Ok(Some((Self::from_settings(settings)?, target)))
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_idx
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    fn phrase(&self) -> &str {
        &self.phrases[self.phrase_idx]
    }

    fn phrase_len(&self) -> usize {
        self.phrase().chars().count()
    }

    /// Currently displayed prefix
    pub fn text(&self) -> &str {
        let phrase = self.phrase();
        match phrase.char_indices().nth(self.char_count) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    /// Insert or remove one character; returns the delay (ms) before the next step
    pub fn step(&mut self) -> u32 {
        match self.phase {
            TypewriterPhase::Typing | TypewriterPhase::HoldEmpty => {
                let len = self.phrase_len();
                if self.char_count < len {
                    self.char_count += 1;
                }
                if self.char_count >= len {
                    self.phase = TypewriterPhase::HoldFull;
                    self.timing.hold_full_ms
                } else {
                    self.phase = TypewriterPhase::Typing;
                    self.timing.type_ms
                }
            }
            TypewriterPhase::HoldFull | TypewriterPhase::Deleting => {
                self.char_count = self.char_count.saturating_sub(1);
                if self.char_count == 0 {
                    self.phrase_idx = (self.phrase_idx + 1) % self.phrases.len();
                    self.phase = TypewriterPhase::HoldEmpty;
                    self.timing.hold_empty_ms
                } else {
                    self.phase = TypewriterPhase::Deleting;
                    self.timing.delete_ms
                }
            }
        }
    }

    /// Step and write the new text to `target`
    pub fn step_into<S: UiSurface>(&mut self, surface: &mut S, target: &S::Element) -> u32 {
        let delay = self.step();
        surface.set_text(target, self.text());
        delay
    }
}
