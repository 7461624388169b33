//! Shared test utilities for the folio-motion unit tests.
//!
//! Provides a cancel-counting scheduler, small ready-made documents and
//! lookup helpers that panic with a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = portfolio();
//! page.dispatch(PageEvent::ContentReady);
//! let header = el(page.surface(), "header");
//! assert!(!page.surface().has_class(header, "scrolled"));
//! ```

use crate::config::BehaviorConfig;
use crate::demo::portfolio_page;
use crate::memory::{ElementSpec, MemorySurface};
use crate::page::Page;
use crate::scheduler::{Millis, Scheduler, Task, TimerHandle, VirtualClock};
use crate::surface::{ElementRef, UiSurface};

// =========================================================================
// Scheduling
// =========================================================================

/// [`VirtualClock`] wrapper that counts successful cancellations.
#[derive(Debug, Default)]
pub struct CountingClock {
    pub inner: VirtualClock,
    pub cancels: usize,
}

impl Scheduler for CountingClock {
    fn now(&self) -> Millis {
        self.inner.now()
    }

    fn schedule_after(&mut self, delay: Millis, task: Task) -> TimerHandle {
        self.inner.schedule_after(delay, task)
    }

    fn schedule_repeating(&mut self, interval: Millis, task: Task) -> TimerHandle {
        self.inner.schedule_repeating(interval, task)
    }

    fn request_frame(&mut self, task: Task) -> TimerHandle {
        self.inner.request_frame(task)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.inner.cancel(handle);
        if cancelled {
            self.cancels += 1;
        }
        cancelled
    }
}

// =========================================================================
// Fixture documents
// =========================================================================

/// Handles into [`menu_page`].
#[derive(Debug, Clone, Copy)]
pub struct MenuIds {
    pub header: ElementRef,
    pub nav_link: ElementRef,
    pub hamburger: ElementRef,
    pub panel: ElementRef,
    pub mobile_link: ElementRef,
    pub section: ElementRef,
}

/// Header with one nav link, a mobile menu with one link, and the section
/// both links point at.
pub fn menu_page() -> (MemorySurface, MenuIds) {
    let mut doc = MemorySurface::new(600.0);
    let body = doc.body();
    let header = doc.append(body, ElementSpec::new("header").id("header").bounds(0.0, 60.0));
    let nav_link = doc.append(
        header,
        ElementSpec::new("a").class("nav-link").attr("href", "#work"),
    );
    let hamburger = doc.append(header, ElementSpec::new("button").id("hamburger"));
    let panel = doc.append(body, ElementSpec::new("div").id("mobile-menu"));
    let mobile_link = doc.append(
        panel,
        ElementSpec::new("a").class("mobile-nav-link").attr("href", "#work"),
    );
    let section = doc.append(
        body,
        ElementSpec::new("section").id("work").bounds(1000.0, 1000.0),
    );
    let ids = MenuIds {
        header,
        nav_link,
        hamburger,
        panel,
        mobile_link,
        section,
    };
    (doc, ids)
}

/// Page over the demo portfolio document with stock configuration, not yet
/// started.
pub fn portfolio() -> Page<MemorySurface, VirtualClock> {
    Page::new(portfolio_page(), VirtualClock::new(), BehaviorConfig::default())
}

// =========================================================================
// Lookups
// =========================================================================

/// Element by id. Panics if not found.
pub fn el(surface: &MemorySurface, id: &str) -> ElementRef {
    surface
        .by_id(id)
        .unwrap_or_else(|| panic!("element '#{id}' not found"))
}

/// Sorted class list of the element with `id`.
pub fn classes_of(surface: &MemorySurface, id: &str) -> Vec<String> {
    let mut classes = surface.classes(el(surface, id));
    classes.sort();
    classes
}
