//! Scroll-triggered entrance animations.
//!
//! One visibility observer watches every element carrying a reveal class.
//! Each time a target intersects it gets the `animate` class, and three
//! kinds of target also start a nested animation:
//!
//! | target          | nested animation                          |
//! |-----------------|-------------------------------------------|
//! | `.skills-grid`  | cascade over every `.skill-card`          |
//! | `.projects-grid`| cascade over every `.project-card`        |
//! | `.stat-card`    | count-up on its first child, if a `div`   |
//!
//! Targets are never unobserved, so scrolling away and back re-runs the
//! animations. A re-run cancels whatever the previous run still had pending.

use tracing::{debug, warn};

use crate::config::RevealConfig;
use crate::controllers::counter::Counters;
use crate::controllers::stagger::CardCascade;
use crate::page::Ctx;
use crate::scheduler::CardBatch;
use crate::surface::{ElementRef, IntersectionEntry, ObserverId, ObserverOptions, Selector};

pub const ANIMATE_CLASS: &str = "animate";
pub const SKILLS_GRID_CLASS: &str = "skills-grid";
pub const SKILL_CARD_CLASS: &str = "skill-card";
pub const PROJECTS_GRID_CLASS: &str = "projects-grid";
pub const PROJECT_CARD_CLASS: &str = "project-card";
pub const STAT_CARD_CLASS: &str = "stat-card";

#[derive(Debug)]
pub struct Reveal {
    config: RevealConfig,
    observer: Option<ObserverId>,
    skills: CardCascade,
    projects: CardCascade,
    counters: Counters,
}

impl Reveal {
    pub fn new(config: RevealConfig, counters: Counters) -> Self {
        Self {
            skills: CardCascade::new(CardBatch::Skills, config.skills.clone()),
            projects: CardCascade::new(CardBatch::Projects, config.projects.clone()),
            config,
            observer: None,
            counters,
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Observe every reveal target present now. Elements added later are
    /// not picked up.
    pub fn attach(&mut self, ctx: &mut Ctx) {
        if self.config.targets.is_empty() {
            warn!("no reveal target classes configured, nothing will animate on scroll");
        }
        let observer = ctx.surface.create_observer(ObserverOptions {
            threshold: self.config.threshold,
            bottom_margin: self.config.bottom_margin,
        });
        let targets = ctx
            .surface
            .query_all(&Selector::any_class(&self.config.targets));
        for el in &targets {
            ctx.surface.observe(observer, *el);
        }
        debug!(targets = targets.len(), "reveal targets observed");
        self.observer = Some(observer);
    }

    pub fn on_intersection(&mut self, ctx: &mut Ctx, entry: &IntersectionEntry) {
        if self.observer != Some(entry.observer) || !entry.is_intersecting {
            return;
        }
        let el = entry.target;
        ctx.surface.add_class(el, ANIMATE_CLASS);

        if ctx.surface.has_class(el, SKILLS_GRID_CLASS) {
            let cards = ctx.surface.query_all(&Selector::class(SKILL_CARD_CLASS));
            self.skills.start(ctx, cards);
        }
        if ctx.surface.has_class(el, PROJECTS_GRID_CLASS) {
            let cards = ctx.surface.query_all(&Selector::class(PROJECT_CARD_CLASS));
            self.projects.start(ctx, cards);
        }
        if ctx.surface.has_class(el, STAT_CARD_CLASS)
            && let Some(number) = ctx.surface.first_child(el)
            && ctx.surface.tag_name(number).as_deref() == Some("div")
        {
            self.counters.start(ctx, number);
        }
    }

    pub fn on_card_enter(&mut self, ctx: &mut Ctx, batch: CardBatch, index: usize) {
        self.cascade(batch).on_enter(ctx, index);
    }

    pub fn on_card_settle(&mut self, ctx: &mut Ctx, batch: CardBatch, index: usize) {
        self.cascade(batch).on_settle(ctx, index);
    }

    pub fn on_counter_tick(&mut self, ctx: &mut Ctx, target: ElementRef) {
        self.counters.on_tick(ctx, target);
    }

    fn cascade(&mut self, batch: CardBatch) -> &mut CardCascade {
        match batch {
            CardBatch::Skills => &mut self.skills,
            CardBatch::Projects => &mut self.projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CounterConfig;
    use crate::memory::{ElementSpec, MemorySurface};
    use crate::scheduler::{Scheduler, Task, VirtualClock};
    use crate::surface::UiSurface;

    struct Fixture {
        doc: MemorySurface,
        clock: VirtualClock,
        reveal: Reveal,
    }

    impl Fixture {
        fn new(doc: MemorySurface) -> Self {
            let mut f = Self {
                doc,
                clock: VirtualClock::new(),
                reveal: Reveal::new(
                    RevealConfig::default(),
                    Counters::new(CounterConfig::default()),
                ),
            };
            f.reveal.attach(&mut Ctx {
                surface: &mut f.doc,
                timers: &mut f.clock,
            });
            f
        }

        fn pump(&mut self) {
            for entry in self.doc.take_intersection_changes() {
                self.reveal.on_intersection(
                    &mut Ctx {
                        surface: &mut self.doc,
                        timers: &mut self.clock,
                    },
                    &entry,
                );
            }
        }

        fn run_until(&mut self, until: u64) {
            while let Some(task) = self.clock.pop_due(until) {
                let mut ctx = Ctx {
                    surface: &mut self.doc,
                    timers: &mut self.clock,
                };
                match task {
                    Task::CardEnter { batch, index } => {
                        self.reveal.on_card_enter(&mut ctx, batch, index)
                    }
                    Task::CardSettle { batch, index } => {
                        self.reveal.on_card_settle(&mut ctx, batch, index)
                    }
                    Task::CounterTick { target } => self.reveal.on_counter_tick(&mut ctx, target),
                    other => panic!("unexpected {other:?}"),
                }
            }
        }

        fn scroll(&mut self, y: f64) {
            self.doc.user_scroll(y);
            self.pump();
        }
    }

    #[test]
    fn observes_only_reveal_targets() {
        let mut doc = MemorySurface::new(500.0);
        let body = doc.body();
        let a = doc.append(body, ElementSpec::new("div").class("fade-in-up"));
        doc.append(body, ElementSpec::new("div").class("plain"));
        let b = doc.append(body, ElementSpec::new("li").class("timeline-item"));
        let f = Fixture::new(doc);
        let observer = f.reveal.observer().unwrap();
        assert_eq!(f.doc.observed(observer), vec![a, b]);
    }

    #[test]
    fn target_just_below_fold_animates_through_margin() {
        let mut doc = MemorySurface::new(500.0);
        let body = doc.body();
        let near = doc.append(
            body,
            ElementSpec::new("div").class("fade-in-up").bounds(520.0, 100.0),
        );
        let far = doc.append(
            body,
            ElementSpec::new("div").class("fade-in-left").bounds(900.0, 100.0),
        );
        let mut f = Fixture::new(doc);
        f.pump();
        assert!(f.doc.has_class(near, ANIMATE_CLASS));
        assert!(!f.doc.has_class(far, ANIMATE_CLASS));
        f.scroll(500.0);
        assert!(f.doc.has_class(far, ANIMATE_CLASS));
    }

    #[test]
    fn skills_grid_cascades_its_cards() {
        let mut doc = MemorySurface::new(500.0);
        let body = doc.body();
        let grid = doc.append(
            body,
            ElementSpec::new("div").class("skills-grid").bounds(0.0, 300.0),
        );
        let cards: Vec<_> = (0..3)
            .map(|_| doc.append(grid, ElementSpec::new("div").class(SKILL_CARD_CLASS)))
            .collect();
        let mut f = Fixture::new(doc);
        f.pump();
        f.run_until(1_000);
        for card in cards {
            assert_eq!(
                f.doc.style(card, crate::surface::StyleProp::Opacity),
                Some("1")
            );
        }
        assert_eq!(f.clock.pending(), 0);
    }

    #[test]
    fn stat_card_counts_first_div_child_only() {
        let mut doc = MemorySurface::new(500.0);
        let body = doc.body();
        let with_div = doc.append(
            body,
            ElementSpec::new("div").class("stat-card").bounds(0.0, 100.0),
        );
        let number = doc.append(with_div, ElementSpec::new("div").text("50+"));
        doc.append(with_div, ElementSpec::new("p").text("Projects"));
        let with_span = doc.append(
            body,
            ElementSpec::new("div").class("stat-card").bounds(100.0, 100.0),
        );
        let span = doc.append(with_span, ElementSpec::new("span").text("7"));
        let mut f = Fixture::new(doc);
        f.pump();
        assert!(f.reveal.counters().is_running(number));
        assert!(!f.reveal.counters().is_running(span));
        f.run_until(5_000);
        assert_eq!(f.doc.text(number), "50+");
        assert_eq!(f.doc.text(span), "7");
    }

    #[test]
    fn re_entry_retriggers_counter_from_zero() {
        let mut doc = MemorySurface::new(500.0);
        let body = doc.body();
        doc.append(body, ElementSpec::new("div").bounds(0.0, 3000.0));
        let card = doc.append(
            body,
            ElementSpec::new("div").class("stat-card").bounds(0.0, 100.0),
        );
        let number = doc.append(card, ElementSpec::new("div").text("90"));
        let mut f = Fixture::new(doc);
        f.pump();
        f.run_until(5_000);
        assert_eq!(f.doc.text(number), "90");

        f.scroll(2000.0);
        assert!(!f.reveal.counters().is_running(number));
        f.scroll(0.0);
        assert!(f.reveal.counters().is_running(number));
        let now = f.clock.now();
        f.run_until(now + 50);
        assert_eq!(f.doc.text(number), "3");
    }
}
