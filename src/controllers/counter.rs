//! Numeric stat count-up.
//!
//! A stat like `150+` counts from 0 to 150 in `steps` equal increments, one
//! per `tick_ms`, keeping the non-digit suffix on every frame. The last frame
//! always shows the exact original value.

use std::collections::HashMap;

use tracing::trace;

use crate::config::CounterConfig;
use crate::page::Ctx;
use crate::scheduler::{Task, TimerHandle};
use crate::surface::ElementRef;

/// Split stat text into its leading integer and its suffix.
///
/// Leading whitespace is skipped before the digits. The suffix is the text
/// with every ASCII digit removed. Returns `None` when the text does not
/// start with a number.
pub fn parse_stat(text: &str) -> Option<(u64, String)> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let target = digits.parse().ok()?;
    let suffix = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    Some((target, suffix))
}

/// One running count-up.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    current: f64,
    increment: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, suffix: String, steps: u32) -> Self {
        Self {
            target,
            suffix,
            current: 0.0,
            increment: target as f64 / f64::from(steps.max(1)),
        }
    }

    pub fn from_text(text: &str, steps: u32) -> Option<Self> {
        let (target, suffix) = parse_stat(text)?;
        Some(Self::new(target, suffix, steps))
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Fresh animation toward the same value.
    pub fn restarted(&self, steps: u32) -> Self {
        Self::new(self.target, self.suffix.clone(), steps)
    }

    /// Advance one increment. Returns the text to show and whether the
    /// animation is finished.
    pub fn tick(&mut self) -> (String, bool) {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            (format!("{}{}", self.target, self.suffix), true)
        } else {
            (format!("{}{}", self.current.floor() as u64, self.suffix), false)
        }
    }
}

#[derive(Debug)]
struct Run {
    animation: CounterAnimation,
    handle: TimerHandle,
}

/// All stat counters on the page, keyed by their number element.
#[derive(Debug)]
pub struct Counters {
    config: CounterConfig,
    runs: HashMap<ElementRef, Run>,
    /// Values parsed the first time each element animated.
    origins: HashMap<ElementRef, CounterAnimation>,
}

impl Counters {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            runs: HashMap::new(),
            origins: HashMap::new(),
        }
    }

    pub fn is_running(&self, el: ElementRef) -> bool {
        self.runs.contains_key(&el)
    }

    /// Start (or restart from 0) the count-up on `el`.
    ///
    /// The target is parsed from the element's text the first time only;
    /// restarts reuse it, so re-triggering mid-count never adopts a partial
    /// value as the new target.
    pub fn start(&mut self, ctx: &mut Ctx, el: ElementRef) {
        if let Some(run) = self.runs.remove(&el) {
            ctx.timers.cancel(run.handle);
        }
        let steps = self.config.steps;
        let animation = match self.origins.get(&el) {
            Some(origin) => origin.restarted(steps),
            None => {
                let Some(animation) = CounterAnimation::from_text(&ctx.surface.text(el), steps)
                else {
                    trace!(%el, "stat text has no leading number, not animating");
                    return;
                };
                self.origins.insert(el, animation.clone());
                animation
            }
        };
        let handle = ctx
            .timers
            .schedule_repeating(self.config.tick_ms, Task::CounterTick { target: el });
        self.runs.insert(el, Run { animation, handle });
    }

    pub fn on_tick(&mut self, ctx: &mut Ctx, el: ElementRef) {
        let Some(run) = self.runs.get_mut(&el) else {
            return;
        };
        let (text, done) = run.animation.tick();
        ctx.surface.set_text(el, &text);
        if done {
            ctx.timers.cancel(run.handle);
            self.runs.remove(&el);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementSpec, MemorySurface, Mutation};
    use crate::scheduler::{Scheduler, VirtualClock};
    use crate::surface::UiSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_stat_splits_number_and_suffix() {
        assert_eq!(parse_stat("150+"), Some((150, "+".to_string())));
        assert_eq!(parse_stat("99%"), Some((99, "%".to_string())));
        assert_eq!(parse_stat("12"), Some((12, String::new())));
        assert_eq!(parse_stat("  7 yrs"), Some((7, "   yrs".to_string())));
        assert_eq!(parse_stat("+5"), None);
        assert_eq!(parse_stat(""), None);
    }

    /// Numeric part of every displayed frame, in order.
    fn frames(target: u64, suffix: &str) -> Vec<String> {
        let mut anim = CounterAnimation::new(target, suffix.to_string(), 30);
        let mut out = Vec::new();
        for _ in 0..1000 {
            let (text, done) = anim.tick();
            out.push(text);
            if done {
                return out;
            }
        }
        panic!("counter for {target} did not finish");
    }

    #[test]
    fn display_is_monotone_and_ends_exactly_on_target() {
        for target in [0u64, 1, 7, 100, 9999] {
            for suffix in ["", "+", "%"] {
                let shown = frames(target, suffix);
                let values: Vec<u64> = shown
                    .iter()
                    .map(|s| s.strip_suffix(suffix).unwrap_or(s).parse().unwrap())
                    .collect();
                assert!(
                    values.windows(2).all(|w| w[0] <= w[1]),
                    "{target}{suffix}: {values:?}"
                );
                assert_eq!(shown.last().unwrap(), &format!("{target}{suffix}"));
                assert!(shown.iter().all(|s| s.ends_with(suffix)));
                assert!(shown.len() <= 31, "{target}: {} frames", shown.len());
            }
        }
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        assert_eq!(frames(0, "+"), vec!["0+".to_string()]);
    }

    fn stat_doc(text: &str) -> (MemorySurface, ElementRef) {
        let mut doc = MemorySurface::new(600.0);
        let body = doc.body();
        let el = doc.append(body, ElementSpec::new("div").text(text));
        (doc, el)
    }

    fn drive(
        counters: &mut Counters,
        doc: &mut MemorySurface,
        clock: &mut VirtualClock,
        until: u64,
    ) {
        while let Some(task) = clock.pop_due(until) {
            let Task::CounterTick { target } = task else {
                panic!("unexpected {task:?}");
            };
            counters.on_tick(
                &mut Ctx {
                    surface: &mut *doc,
                    timers: &mut *clock,
                },
                target,
            );
        }
        clock.set_now(until);
    }

    #[test]
    fn controller_counts_up_and_stops() {
        let (mut doc, el) = stat_doc("30+");
        let mut clock = VirtualClock::new();
        let mut counters = Counters::new(CounterConfig::default());
        counters.start(
            &mut Ctx {
                surface: &mut doc,
                timers: &mut clock,
            },
            el,
        );
        drive(&mut counters, &mut doc, &mut clock, 50);
        assert_eq!(doc.text(el), "1+");
        drive(&mut counters, &mut doc, &mut clock, 10_000);
        assert_eq!(doc.text(el), "30+");
        assert!(!counters.is_running(el));
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.now(), 10_000);
    }

    #[test]
    fn restart_mid_count_keeps_original_target() {
        let (mut doc, el) = stat_doc("300");
        let mut clock = VirtualClock::new();
        let mut counters = Counters::new(CounterConfig::default());
        let start = |counters: &mut Counters, doc: &mut MemorySurface, clock: &mut VirtualClock| {
            counters.start(
                &mut Ctx {
                    surface: doc,
                    timers: clock,
                },
                el,
            )
        };
        start(&mut counters, &mut doc, &mut clock);
        drive(&mut counters, &mut doc, &mut clock, 500);
        assert_eq!(doc.text(el), "100");

        start(&mut counters, &mut doc, &mut clock);
        assert_eq!(clock.pending(), 1, "old interval cancelled");
        drive(&mut counters, &mut doc, &mut clock, 10_000);
        assert_eq!(doc.text(el), "300");
    }

    #[test]
    fn non_numeric_text_is_left_alone() {
        let (mut doc, el) = stat_doc("many");
        let mut clock = VirtualClock::new();
        let mut counters = Counters::new(CounterConfig::default());
        counters.start(
            &mut Ctx {
                surface: &mut doc,
                timers: &mut clock,
            },
            el,
        );
        assert_eq!(clock.pending(), 0);
        assert!(!doc.mutations().iter().any(|m| matches!(m, Mutation::Text { .. })));
    }
}
