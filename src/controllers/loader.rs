//! Loading overlay.
//!
//! While the page loads, the overlay's first `<p>` cycles through the
//! configured messages: every `cycle_ms` the text fades out, and `fade_ms`
//! later the next message is swapped in and faded back. When the page's
//! load event arrives the cycle is cancelled, and after `grace_ms` the
//! overlay fades out and is removed `removal_ms` later.
//!
//! ```text
//! Waiting ──load──▶ Leaving ──grace──▶ FadingOut ──removal──▶ Removed
//! ```

use tracing::{debug, trace};

use crate::config::LoaderConfig;
use crate::page::Ctx;
use crate::scheduler::{Task, TimerHandle};
use crate::surface::{ElementRef, Selector, StyleProp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Not attached, or no overlay in the document.
    Inert,
    /// Overlay shown, waiting for the load event.
    Waiting,
    /// Load seen; grace delay running.
    Leaving,
    /// Overlay fading out before removal.
    FadingOut,
    Removed,
}

#[derive(Debug)]
pub struct Loader {
    config: LoaderConfig,
    overlay: Option<ElementRef>,
    text: Option<ElementRef>,
    cursor: usize,
    cycle: Option<TimerHandle>,
    swap: Option<TimerHandle>,
    phase: LoaderPhase,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            overlay: None,
            text: None,
            cursor: 0,
            cycle: None,
            swap: None,
            phase: LoaderPhase::Inert,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Index of the next message to show.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn attach(&mut self, ctx: &mut Ctx, overlay_id: &str) {
        let Some(overlay) = ctx.surface.by_id(overlay_id) else {
            debug!(id = overlay_id, "no loading overlay, loader inert");
            return;
        };
        self.overlay = Some(overlay);
        self.phase = LoaderPhase::Waiting;
        self.text = ctx.surface.query_within(overlay, &Selector::tag("p"));
        if self.text.is_some() {
            self.cycle = Some(
                ctx.timers
                    .schedule_repeating(self.config.cycle_ms, Task::LoaderTick),
            );
        } else {
            debug!("loading overlay has no text element, message cycle disabled");
        }
    }

    pub fn on_tick(&mut self, ctx: &mut Ctx) {
        let Some(text) = self.text else { return };
        ctx.surface.set_style(text, StyleProp::Opacity, "0");
        self.swap = Some(ctx.timers.schedule_after(self.config.fade_ms, Task::LoaderSwap));
    }

    pub fn on_swap(&mut self, ctx: &mut Ctx) {
        self.swap = None;
        let Some(text) = self.text else { return };
        if let Some(message) = self.config.messages.get(self.cursor) {
            trace!(cursor = self.cursor, message, "loader message");
            ctx.surface.set_text(text, message);
        }
        ctx.surface.set_style(text, StyleProp::Opacity, "1");
        self.cursor = (self.cursor + 1) % self.config.messages.len().max(1);
    }

    /// Page fully loaded: stop cycling and start leaving. Later load
    /// signals are ignored.
    pub fn on_loaded(&mut self, ctx: &mut Ctx) {
        if self.phase != LoaderPhase::Waiting {
            return;
        }
        for handle in [self.cycle.take(), self.swap.take()].into_iter().flatten() {
            ctx.timers.cancel(handle);
        }
        self.phase = LoaderPhase::Leaving;
        ctx.timers
            .schedule_after(self.config.grace_ms, Task::LoaderFadeOut);
        debug!(grace_ms = self.config.grace_ms, "page loaded, loader leaving");
    }

    pub fn on_fade_out(&mut self, ctx: &mut Ctx) {
        let Some(overlay) = self.overlay else { return };
        if self.phase != LoaderPhase::Leaving {
            return;
        }
        ctx.surface.set_style(overlay, StyleProp::Opacity, "0");
        ctx.surface.set_style(overlay, StyleProp::Visibility, "hidden");
        self.phase = LoaderPhase::FadingOut;
        ctx.timers
            .schedule_after(self.config.removal_ms, Task::LoaderRemove);
    }

    pub fn on_remove(&mut self, ctx: &mut Ctx) {
        let Some(overlay) = self.overlay else { return };
        if self.phase != LoaderPhase::FadingOut {
            return;
        }
        ctx.surface.remove_element(overlay);
        self.phase = LoaderPhase::Removed;
        debug!("loading overlay removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, MemorySurface, Mutation};
    use crate::scheduler::Millis;
    use crate::surface::UiSurface;
    use crate::test_helpers::CountingClock;

    fn overlay_doc(with_text: bool) -> (MemorySurface, ElementRef, Option<ElementRef>) {
        let mut doc = MemorySurface::new(800.0);
        let body = doc.body();
        let overlay = doc.append(body, ElementSpec::new("div").id("loading-screen"));
        let text = with_text.then(|| doc.append(overlay, ElementSpec::new("p").text("Loading...")));
        (doc, overlay, text)
    }

    fn run(loader: &mut Loader, doc: &mut MemorySurface, clock: &mut CountingClock, until: Millis) {
        while let Some(task) = clock.inner.pop_due(until) {
            let mut ctx = Ctx {
                surface: &mut *doc,
                timers: &mut *clock,
            };
            match task {
                Task::LoaderTick => loader.on_tick(&mut ctx),
                Task::LoaderSwap => loader.on_swap(&mut ctx),
                Task::LoaderFadeOut => loader.on_fade_out(&mut ctx),
                Task::LoaderRemove => loader.on_remove(&mut ctx),
                other => panic!("unexpected task {other:?}"),
            }
        }
        clock.inner.set_now(until);
    }

    fn attached(doc: &mut MemorySurface, clock: &mut CountingClock) -> Loader {
        let mut loader = Loader::new(LoaderConfig::default());
        loader.attach(
            &mut Ctx {
                surface: &mut *doc,
                timers: &mut *clock,
            },
            "loading-screen",
        );
        loader
    }

    fn load(loader: &mut Loader, doc: &mut MemorySurface, clock: &mut CountingClock) {
        loader.on_loaded(&mut Ctx {
            surface: &mut *doc,
            timers: &mut *clock,
        });
    }

    #[test]
    fn cycles_messages_with_fade_bracketing_each_swap() {
        let (mut doc, _, text) = overlay_doc(true);
        let text = text.unwrap();
        let mut clock = CountingClock::default();
        let mut loader = attached(&mut doc, &mut clock);

        run(&mut loader, &mut doc, &mut clock, 900);
        assert_eq!(doc.style(text, StyleProp::Opacity), Some("0"));
        assert_eq!(doc.text(text), "Loading...");

        run(&mut loader, &mut doc, &mut clock, 1000);
        assert_eq!(doc.text(text), "Loading Portfolio...");
        assert_eq!(doc.style(text, StyleProp::Opacity), Some("1"));

        // Four more swaps wrap the cursor back to the first message.
        run(&mut loader, &mut doc, &mut clock, 4200);
        assert_eq!(doc.text(text), "Loading Portfolio...");
        assert_eq!(loader.cursor(), 1);
    }

    #[test]
    fn load_cancels_cycle_once_and_removes_once() {
        let (mut doc, overlay, _) = overlay_doc(true);
        let mut clock = CountingClock::default();
        let mut loader = attached(&mut doc, &mut clock);

        run(&mut loader, &mut doc, &mut clock, 5000);
        assert!(doc.is_attached(overlay), "never removed before load");

        load(&mut loader, &mut doc, &mut clock);
        load(&mut loader, &mut doc, &mut clock);
        assert_eq!(clock.cancels, 1);
        assert_eq!(loader.phase(), LoaderPhase::Leaving);

        run(&mut loader, &mut doc, &mut clock, 5999);
        assert!(doc.is_attached(overlay));
        run(&mut loader, &mut doc, &mut clock, 6000);
        assert_eq!(doc.style(overlay, StyleProp::Visibility), Some("hidden"));
        run(&mut loader, &mut doc, &mut clock, 6500);
        assert!(!doc.is_attached(overlay));
        assert_eq!(loader.phase(), LoaderPhase::Removed);

        run(&mut loader, &mut doc, &mut clock, 60_000);
        let removals = doc
            .mutations()
            .iter()
            .filter(|m| matches!(m, Mutation::Removed { .. }))
            .count();
        assert_eq!(removals, 1);
        assert_eq!(clock.inner.pending(), 0);
    }

    #[test]
    fn pending_swap_is_cancelled_with_the_cycle() {
        let (mut doc, _, text) = overlay_doc(true);
        let text = text.unwrap();
        let mut clock = CountingClock::default();
        let mut loader = attached(&mut doc, &mut clock);

        run(&mut loader, &mut doc, &mut clock, 850);
        load(&mut loader, &mut doc, &mut clock);
        assert_eq!(clock.cancels, 2);
        run(&mut loader, &mut doc, &mut clock, 1100);
        assert_eq!(doc.text(text), "Loading...");
    }

    #[test]
    fn missing_text_still_removes_on_load() {
        let (mut doc, overlay, _) = overlay_doc(false);
        let mut clock = CountingClock::default();
        let mut loader = attached(&mut doc, &mut clock);
        assert_eq!(clock.inner.pending(), 0);

        load(&mut loader, &mut doc, &mut clock);
        run(&mut loader, &mut doc, &mut clock, 1500);
        assert!(!doc.is_attached(overlay));
    }

    #[test]
    fn missing_overlay_is_inert() {
        let mut doc = MemorySurface::new(800.0);
        let mut clock = CountingClock::default();
        let mut loader = attached(&mut doc, &mut clock);
        load(&mut loader, &mut doc, &mut clock);
        assert_eq!(loader.phase(), LoaderPhase::Inert);
        assert_eq!(clock.inner.pending(), 0);
        assert!(doc.mutations().is_empty());
    }
}
