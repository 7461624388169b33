//! # Folio Motion
//!
//! The interactive behavior layer of a single-page developer portfolio: a
//! loading overlay with rotating messages, a header that reacts to scrolling,
//! a slide-in mobile menu, a typewriter headline, scroll-triggered entrance
//! animations, staggered card cascades and counting stat numbers.
//!
//! # Architecture: Controllers Behind Two Ports
//!
//! Every behavior is a small controller with its own state. Controllers never
//! touch a real document or a real timer. They talk to two traits:
//!
//! ```text
//!                ┌──────────────┐
//!  PageEvent ───▶│     Page     │──▶ UiSurface  (elements, classes, styles, scroll)
//!  Task ────────▶│ controllers  │──▶ Scheduler  (one-shot, repeating, next frame)
//!                └──────────────┘
//! ```
//!
//! The host (a browser binding, or [`simulate::Simulation`] here) feeds page
//! events and due tasks back in. Deferred work is a typed [`scheduler::Task`]
//! value, not a closure, so the whole layer is single-threaded and has no
//! shared mutable ownership.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | `Page` runtime: wiring on document ready, event and task routing |
//! | [`controllers`] | One module per behavior (loader, header, menu, reveal, ...) |
//! | [`surface`] | `UiSurface` port and its value types |
//! | [`scheduler`] | `Scheduler` port, `Task`, deterministic `VirtualClock` |
//! | [`memory`] | `MemorySurface`: arena document with layout, observers and a mutation log |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`demo`] | Demo portfolio document used by `simulate` and tests |
//! | [`simulate`] | Headless sessions producing a time-stamped change trace |
//! | [`output`] | CLI output formatting for traces and config summaries |
//!
//! # Design Decisions
//!
//! ## Derived State Over Toggled State
//!
//! Where a visible state depends on a single fact (menu open, page scrolled
//! past a threshold) the controller recomputes every class and style from
//! that fact on each event instead of toggling them. The DOM can never drift
//! from the controller's state, no matter how events interleave.
//!
//! ## Virtual Time
//!
//! [`scheduler::VirtualClock`] orders tasks by due time, then by scheduling
//! order. Tests and `simulate` advance it by exact amounts, so every timing
//! property (loader removal, typewriter cadence, card stagger) is checked
//! without sleeping.
//!
//! ## Missing Elements Are Not Errors
//!
//! A portfolio page may omit any section. A controller whose element is
//! missing stays inert and every later event is a no-op. Only configuration
//! problems surface as errors ([`config::ConfigError`]).

pub mod config;
pub mod controllers;
pub mod demo;
pub mod memory;
pub mod output;
pub mod page;
pub mod scheduler;
pub mod simulate;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_helpers;
