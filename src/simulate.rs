//! Headless page sessions on the in-memory document.
//!
//! A [`Simulation`] plays the host role for a
//! `Page<MemorySurface, VirtualClock>`: it forwards user actions as page
//! events, fires due timer tasks one at a time, and after every step
//! delivers the visibility changes the step caused. Each visible change is
//! recorded with the virtual time it happened at, producing a trace of the
//! whole session.
//!
//! [`run_scenario`] drives the scripted session behind the `simulate`
//! command: ready, load, a series of scrolls, a series of clicks, settle.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::BehaviorConfig;
use crate::demo::portfolio_page;
use crate::memory::{MemorySurface, Mutation};
use crate::page::{Dispatch, Page, PageEvent};
use crate::scheduler::{Millis, Scheduler, VirtualClock};
use crate::surface::{ElementRef, UiSurface};

#[derive(Error, Debug, PartialEq)]
pub enum SimulateError {
    #[error("no element with id '{0}' in the document")]
    UnknownElement(String),
    #[error("invalid scroll offset '{0}': expected a non-negative number")]
    InvalidScroll(String),
}

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    /// Virtual time in ms.
    pub at: Millis,
    /// Short label of the changed element (`#id`, `tag.class`, `tag`).
    pub target: Option<String>,
    pub mutation: Mutation,
}

#[derive(Debug)]
pub struct Simulation {
    page: Page<MemorySurface, VirtualClock>,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    pub fn new(surface: MemorySurface, config: BehaviorConfig) -> Self {
        Self {
            page: Page::new(surface, VirtualClock::new(), config),
            trace: Vec::new(),
        }
    }

    /// Session over the demo portfolio document.
    pub fn portfolio(config: BehaviorConfig) -> Self {
        Self::new(portfolio_page(), config)
    }

    pub fn page(&self) -> &Page<MemorySurface, VirtualClock> {
        &self.page
    }

    pub fn surface(&self) -> &MemorySurface {
        self.page.surface()
    }

    pub fn now(&self) -> Millis {
        self.page.timers().now()
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<TraceEntry> {
        self.trace
    }

    pub fn content_ready(&mut self) {
        self.dispatch(PageEvent::ContentReady);
    }

    pub fn load(&mut self) {
        self.dispatch(PageEvent::Loaded);
    }

    /// User scroll to `y`. Refused while the page is scroll-locked; no scroll
    /// event is delivered unless the offset actually moved.
    pub fn scroll_to(&mut self, y: f64) -> bool {
        let moved = self.page.surface_mut().user_scroll(y);
        if moved {
            self.dispatch(PageEvent::Scroll);
        } else {
            debug!(y, "scroll refused or unchanged");
        }
        moved
    }

    /// Click `target`. A click that moves the page (nav link, back-to-top)
    /// is followed by a scroll event, as a browser would emit.
    pub fn click(&mut self, target: ElementRef) -> Dispatch {
        let before = self.surface().scroll_y();
        let out = self.dispatch(PageEvent::Click { target });
        if self.surface().scroll_y() != before {
            self.dispatch(PageEvent::Scroll);
        }
        out
    }

    pub fn click_id(&mut self, id: &str) -> Result<Dispatch, SimulateError> {
        let target = self.element(id)?;
        Ok(self.click(target))
    }

    pub fn submit(&mut self, form: ElementRef) -> Dispatch {
        self.dispatch(PageEvent::Submit { form })
    }

    pub fn element(&self, id: &str) -> Result<ElementRef, SimulateError> {
        self.surface()
            .by_id(id)
            .ok_or_else(|| SimulateError::UnknownElement(id.to_string()))
    }

    /// Advance virtual time by `ms`, firing due tasks one by one.
    pub fn advance(&mut self, ms: Millis) {
        let until = self.now() + ms;
        while let Some(task) = self.page.timers_mut().pop_due(until) {
            self.page.fire(task);
            self.record();
            self.pump();
        }
        self.page.timers_mut().set_now(until);
    }

    fn dispatch(&mut self, event: PageEvent) -> Dispatch {
        let out = self.page.dispatch(event);
        self.record();
        self.pump();
        out
    }

    /// Deliver visibility changes until the observers are quiet.
    fn pump(&mut self) {
        loop {
            let changes = self.page.surface_mut().take_intersection_changes();
            if changes.is_empty() {
                return;
            }
            for entry in changes {
                self.page.dispatch(PageEvent::Intersection(entry));
                self.record();
            }
        }
    }

    fn record(&mut self) {
        let at = self.now();
        let mutations = self.page.surface_mut().drain_mutations();
        for mutation in mutations {
            let target = mutation.target().map(|el| self.surface().describe(el));
            self.trace.push(TraceEntry {
                at,
                target,
                mutation,
            });
        }
    }
}

/// Scripted session for the `simulate` command.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Virtual time of the page `load` event.
    pub load_at: Millis,
    /// Time between consecutive scrolls and clicks.
    pub step_ms: Millis,
    pub scrolls: Vec<f64>,
    /// Element ids to click after scrolling.
    pub clicks: Vec<String>,
    /// Time to let animations run after the last action.
    pub settle_ms: Millis,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            load_at: 1500,
            step_ms: 500,
            scrolls: vec![0.0, 150.0, 900.0, 1700.0, 2500.0, 1200.0],
            clicks: Vec::new(),
            settle_ms: 3000,
        }
    }
}

/// Parse a comma-separated list of scroll offsets, e.g. `0,150,600`.
pub fn parse_scrolls(list: &str) -> Result<Vec<f64>, SimulateError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<f64>() {
            Ok(y) if y.is_finite() && y >= 0.0 => Ok(y),
            _ => Err(SimulateError::InvalidScroll(s.to_string())),
        })
        .collect()
}

/// Play `scenario` against the demo portfolio.
pub fn run_scenario(
    config: BehaviorConfig,
    scenario: &Scenario,
) -> Result<Simulation, SimulateError> {
    let mut sim = Simulation::portfolio(config);
    for id in &scenario.clicks {
        sim.element(id)?;
    }

    sim.content_ready();
    sim.advance(scenario.load_at);
    sim.load();
    for y in &scenario.scrolls {
        sim.scroll_to(*y);
        sim.advance(scenario.step_ms);
    }
    for id in &scenario.clicks {
        sim.click_id(id)?;
        sim.advance(scenario.step_ms);
    }
    sim.advance(scenario.settle_ms);
    info!(
        entries = sim.trace().len(),
        at = sim.now(),
        "simulation finished"
    );
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::loader::LoaderPhase;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_scrolls_accepts_spaced_lists() {
        assert_eq!(parse_scrolls("0, 150,600").unwrap(), vec![0.0, 150.0, 600.0]);
        assert_eq!(parse_scrolls("").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn parse_scrolls_rejects_garbage() {
        assert_eq!(
            parse_scrolls("0,abc"),
            Err(SimulateError::InvalidScroll("abc".to_string()))
        );
        assert_eq!(
            parse_scrolls("-5"),
            Err(SimulateError::InvalidScroll("-5".to_string()))
        );
    }

    #[test]
    fn trace_labels_changed_elements() {
        let mut sim = Simulation::portfolio(BehaviorConfig::default());
        sim.content_ready();
        sim.scroll_to(400.0);
        let header_entry = sim
            .trace()
            .iter()
            .find(|e| {
                matches!(&e.mutation, Mutation::ClassAdded { class, .. } if class == "scrolled")
            })
            .unwrap();
        assert_eq!(header_entry.target.as_deref(), Some("#header"));
        assert_eq!(header_entry.at, 0);
    }

    #[test]
    fn advance_records_timer_changes_at_their_due_time() {
        let mut sim = Simulation::portfolio(BehaviorConfig::default());
        sim.content_ready();
        sim.advance(1000);
        let typed = sim
            .trace()
            .iter()
            .find(|e| e.target.as_deref() == Some("#typewriter"))
            .unwrap();
        assert_eq!(typed.at, 1000);
        assert_eq!(sim.now(), 1000);
    }

    #[test]
    fn default_scenario_removes_loader_and_runs_reveals() {
        let sim = run_scenario(BehaviorConfig::default(), &Scenario::default()).unwrap();
        assert_eq!(sim.page().loader().phase(), LoaderPhase::Removed);
        let overlay_removed = sim
            .trace()
            .iter()
            .filter(|e| matches!(e.mutation, Mutation::Removed { .. }))
            .count();
        assert_eq!(overlay_removed, 1);
        let grid = sim.surface().query_all(&crate::surface::Selector::class("skills-grid"))[0];
        assert!(sim.surface().has_class(grid, "animate"));
        let len = sim.trace().len();
        assert_eq!(sim.into_trace().len(), len);
    }

    #[test]
    fn unknown_click_target_fails_before_running() {
        let scenario = Scenario {
            clicks: vec!["nope".to_string()],
            ..Scenario::default()
        };
        let err = run_scenario(BehaviorConfig::default(), &scenario).unwrap_err();
        assert_eq!(err, SimulateError::UnknownElement("nope".to_string()));
    }

    #[test]
    fn locked_page_refuses_user_scroll() {
        let mut sim = Simulation::portfolio(BehaviorConfig::default());
        sim.content_ready();
        sim.click_id("hamburger").unwrap();
        assert!(sim.surface().scroll_locked());
        assert!(!sim.scroll_to(900.0));
        sim.click_id("hamburger").unwrap();
        assert!(sim.scroll_to(900.0));
    }
}
