//! Typewriter text effect.
//!
//! The cursor is a `(phrase, chars, deleting)` triple. Each tick shows one
//! more (or one fewer) character of the current phrase and returns how long
//! to wait before the next tick:
//!
//! ```text
//! "" ─type─▶ "P" ─type─▶ ... "Problem Solver" ─hold─▶ delete ... "" ─next─▶ phrase + 1
//! ```
//!
//! The cycle never ends; it runs for the lifetime of the page. Character
//! counts are Unicode scalar values, so multi-byte phrases type one visible
//! character at a time.

use tracing::{debug, trace};

use crate::config::TypewriterConfig;
use crate::page::Ctx;
use crate::scheduler::{Millis, Task};
use crate::surface::ElementRef;

/// Text to display and delay before the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub text: String,
    pub delay: Millis,
}

#[derive(Debug, Clone)]
pub struct TypewriterCursor {
    phrases: Vec<String>,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypewriterCursor {
    /// Cursor at the start of the first phrase. Empty phrases are skipped;
    /// returns `None` if nothing is left to type.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Option<Self> {
        let phrases: Vec<String> = phrases
            .iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
        })
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn char_index(&self) -> usize {
        self.chars
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Advance one character and report what to show.
    pub fn step(&mut self, timing: &TypewriterConfig) -> Step {
        let phrase = &self.phrases[self.phrase];
        let len = phrase.chars().count();

        let mut delay = if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            timing.delete_ms
        } else {
            self.chars = (self.chars + 1).min(len);
            timing.type_ms
        };
        let text: String = phrase.chars().take(self.chars).collect();

        if !self.deleting && self.chars == len {
            delay = timing.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            delay = timing.next_ms;
        }

        Step { text, delay }
    }
}

#[derive(Debug)]
pub struct Typewriter {
    config: TypewriterConfig,
    target: Option<ElementRef>,
    cursor: Option<TypewriterCursor>,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            target: None,
            cursor: None,
        }
    }

    pub fn cursor(&self) -> Option<&TypewriterCursor> {
        self.cursor.as_ref()
    }

    pub fn attach(&mut self, ctx: &mut Ctx, target_id: &str) {
        let Some(target) = ctx.surface.by_id(target_id) else {
            debug!(id = target_id, "no typewriter target, typewriter inert");
            return;
        };
        let Some(cursor) = TypewriterCursor::new(&self.config.phrases) else {
            debug!("no phrases to type, typewriter inert");
            return;
        };
        self.target = Some(target);
        self.cursor = Some(cursor);
        ctx.timers
            .schedule_after(self.config.start_delay_ms, Task::TypewriterTick);
    }

    pub fn on_tick(&mut self, ctx: &mut Ctx) {
        let (Some(target), Some(cursor)) = (self.target, self.cursor.as_mut()) else {
            return;
        };
        let step = cursor.step(&self.config);
        trace!(text = %step.text, delay = step.delay, "typewriter");
        ctx.surface.set_text(target, &step.text);
        ctx.timers.schedule_after(step.delay, Task::TypewriterTick);
    }
}
