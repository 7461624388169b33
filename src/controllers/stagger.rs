//! Staggered card entrance.
//!
//! Card `i` of a batch enters at `i * stagger_ms`: it jumps to a hidden,
//! offset start state with a transition attached, then `settle_ms` later
//! moves to its resting state so the transition animates it in.

use tracing::debug;

use crate::config::StaggerConfig;
use crate::page::Ctx;
use crate::scheduler::{CardBatch, Task, TimerHandle};
use crate::surface::{ElementRef, StyleProp};

#[derive(Debug)]
pub struct CardCascade {
    batch: CardBatch,
    config: StaggerConfig,
    cards: Vec<ElementRef>,
    pending: Vec<TimerHandle>,
}

impl CardCascade {
    pub fn new(batch: CardBatch, config: StaggerConfig) -> Self {
        Self {
            batch,
            config,
            cards: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Schedule the entrance of `cards`, in order. Steps still pending from
    /// a previous run of this batch are cancelled first.
    pub fn start(&mut self, ctx: &mut Ctx, cards: Vec<ElementRef>) {
        for handle in self.pending.drain(..) {
            ctx.timers.cancel(handle);
        }
        debug!(batch = ?self.batch, cards = cards.len(), "card cascade");
        for index in 0..cards.len() {
            let delay = index as u64 * self.config.stagger_ms;
            let handle = ctx.timers.schedule_after(
                delay,
                Task::CardEnter {
                    batch: self.batch,
                    index,
                },
            );
            self.pending.push(handle);
        }
        self.cards = cards;
    }

    pub fn on_enter(&mut self, ctx: &mut Ctx, index: usize) {
        let Some(&card) = self.cards.get(index) else {
            return;
        };
        ctx.surface.set_style(card, StyleProp::Opacity, "0");
        ctx.surface.set_style(
            card,
            StyleProp::Transform,
            &format!("translateY({}px)", self.config.offset_px),
        );
        ctx.surface
            .set_style(card, StyleProp::Transition, &self.config.transition());
        let handle = ctx.timers.schedule_after(
            self.config.settle_ms,
            Task::CardSettle {
                batch: self.batch,
                index,
            },
        );
        self.pending.push(handle);
    }

    pub fn on_settle(&mut self, ctx: &mut Ctx, index: usize) {
        let Some(&card) = self.cards.get(index) else {
            return;
        };
        ctx.surface.set_style(card, StyleProp::Opacity, "1");
        ctx.surface
            .set_style(card, StyleProp::Transform, "translateY(0)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::memory::{ElementSpec, MemorySurface};
    use crate::scheduler::{Millis, Scheduler, VirtualClock};
    use pretty_assertions::assert_eq;

    fn cards(doc: &mut MemorySurface, n: usize) -> Vec<ElementRef> {
        let body = doc.body();
        (0..n)
            .map(|_| doc.append(body, ElementSpec::new("div").class("skill-card")))
            .collect()
    }

    fn run(
        cascade: &mut CardCascade,
        doc: &mut MemorySurface,
        clock: &mut VirtualClock,
        until: Millis,
    ) -> Vec<(Millis, Task)> {
        let mut fired = Vec::new();
        while let Some(task) = clock.pop_due(until) {
            let mut ctx = Ctx {
                surface: &mut *doc,
                timers: &mut *clock,
            };
            match task {
                Task::CardEnter { index, .. } => cascade.on_enter(&mut ctx, index),
                Task::CardSettle { index, .. } => cascade.on_settle(&mut ctx, index),
                ref other => panic!("unexpected {other:?}"),
            }
            fired.push((clock.now(), task));
        }
        fired
    }

    #[test]
    fn skills_enter_one_stagger_apart_and_settle_after() {
        let mut doc = MemorySurface::new(600.0);
        let list = cards(&mut doc, 3);
        let mut clock = VirtualClock::new();
        let mut cascade = CardCascade::new(CardBatch::Skills, RevealConfig::default().skills);
        cascade.start(
            &mut Ctx {
                surface: &mut doc,
                timers: &mut clock,
            },
            list.clone(),
        );
        let fired = run(&mut cascade, &mut doc, &mut clock, 1000);
        let times: Vec<(Millis, &'static str, usize)> = fired
            .iter()
            .map(|(at, task)| match task {
                Task::CardEnter { index, .. } => (*at, "enter", *index),
                Task::CardSettle { index, .. } => (*at, "settle", *index),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            times,
            vec![
                (0, "enter", 0),
                (50, "settle", 0),
                (100, "enter", 1),
                (150, "settle", 1),
                (200, "enter", 2),
                (250, "settle", 2),
            ]
        );
        for card in list {
            assert_eq!(doc.style(card, StyleProp::Opacity), Some("1"));
            assert_eq!(doc.style(card, StyleProp::Transform), Some("translateY(0)"));
            assert_eq!(doc.style(card, StyleProp::Transition), Some("all 0.6s ease"));
        }
    }

    #[test]
    fn enter_state_uses_batch_offset() {
        let mut doc = MemorySurface::new(600.0);
        let list = cards(&mut doc, 1);
        let mut clock = VirtualClock::new();
        let mut cascade = CardCascade::new(CardBatch::Projects, RevealConfig::default().projects);
        let mut ctx = Ctx {
            surface: &mut doc,
            timers: &mut clock,
        };
        cascade.start(&mut ctx, list.clone());
        cascade.on_enter(&mut ctx, 0);
        assert_eq!(doc.style(list[0], StyleProp::Opacity), Some("0"));
        assert_eq!(doc.style(list[0], StyleProp::Transform), Some("translateY(50px)"));
        assert_eq!(doc.style(list[0], StyleProp::Transition), Some("all 0.8s ease"));
    }

    #[test]
    fn restart_cancels_pending_steps() {
        let mut doc = MemorySurface::new(600.0);
        let list = cards(&mut doc, 4);
        let mut clock = VirtualClock::new();
        let mut cascade = CardCascade::new(CardBatch::Skills, RevealConfig::default().skills);
        cascade.start(
            &mut Ctx {
                surface: &mut doc,
                timers: &mut clock,
            },
            list.clone(),
        );
        run(&mut cascade, &mut doc, &mut clock, 120);
        cascade.start(
            &mut Ctx {
                surface: &mut doc,
                timers: &mut clock,
            },
            list,
        );
        assert_eq!(clock.pending(), 4);
        let fired = run(&mut cascade, &mut doc, &mut clock, 10_000);
        assert_eq!(fired.len(), 8);
    }
}
