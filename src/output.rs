//! CLI output formatting for `simulate` and `check`.
//!
//! # Trace Display
//!
//! A simulation trace is grouped by virtual time. Each change is one line:
//! the element label, then what changed.
//!
//! ```text
//!      0 ms
//!     #currentYear        text "2026"
//!     div.fade-in-up      +animate
//!    800 ms
//!     p                   opacity: 0
//!   1000 ms
//!     p                   text "Loading Portfolio..."
//!     #typewriter         text "A"
//!
//! 42 changes over 7500 ms
//! ```
//!
//! # Config Summary
//!
//! ```text
//! Elements
//!     loader: #loading-screen
//!     header: #header
//! Timing
//!     loader: 4 messages every 800 ms
//!     typewriter: 4 phrases
//! Features
//!     parallax: off
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::BehaviorConfig;
use crate::memory::Mutation;
use crate::scheduler::Millis;
use crate::simulate::TraceEntry;
use crate::surface::ScrollBehavior;

/// Width of the element label column.
const LABEL_WIDTH: usize = 20;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Describe a single change, without its target.
///
/// ```text
/// +animate
/// opacity: 0
/// text "Hello"
/// scroll to 720 (smooth)
/// ```
fn describe_mutation(mutation: &Mutation) -> String {
    match mutation {
        Mutation::ClassAdded { class, .. } => format!("+{class}"),
        Mutation::ClassRemoved { class, .. } => format!("-{class}"),
        Mutation::Style { prop, value, .. } => format!("{}: {value}", prop.css_name()),
        Mutation::Text { text, .. } => format!("text {text:?}"),
        Mutation::Attribute {
            name,
            value: Some(value),
            ..
        } => format!("{name}={value:?}"),
        Mutation::Attribute {
            name, value: None, ..
        } => format!("-[{name}]"),
        Mutation::Removed { .. } => "removed".to_string(),
        Mutation::ScrollTo { top, behavior } => {
            let how = match behavior {
                ScrollBehavior::Instant => "instant",
                ScrollBehavior::Smooth => "smooth",
            };
            format!("scroll to {top} ({how})")
        }
        Mutation::ScrollLock { locked } => format!("scroll lock {}", on_off(*locked)),
        Mutation::Notice { message } => format!("notice {message:?}"),
        Mutation::FormReset { .. } => "form reset".to_string(),
    }
}

// ============================================================================
// Simulation trace
// ============================================================================

/// Format a simulation trace, grouped by time, followed by a summary line.
pub fn format_trace(trace: &[TraceEntry], ended_at: Millis) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<Millis> = None;
    for entry in trace {
        if current != Some(entry.at) {
            lines.push(format!("{:>6} ms", entry.at));
            current = Some(entry.at);
        }
        let label = entry.target.as_deref().unwrap_or("page");
        lines.push(format!(
            "{}{:<width$}{}",
            indent(1),
            label,
            describe_mutation(&entry.mutation),
            width = LABEL_WIDTH
        ));
    }
    if !trace.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{} changes over {} ms", trace.len(), ended_at));
    lines
}

/// Print a simulation trace to stdout.
pub fn print_trace(trace: &[TraceEntry], ended_at: Millis) {
    for line in format_trace(trace, ended_at) {
        println!("{}", line);
    }
}

// ============================================================================
// Config summary
// ============================================================================

/// Format the resolved configuration for `check`.
pub fn format_config_summary(config: &BehaviorConfig) -> Vec<String> {
    let ids = &config.elements;
    let mut lines = vec!["Elements".to_string()];
    for (role, id) in [
        ("loader", &ids.loader),
        ("header", &ids.header),
        ("hamburger", &ids.hamburger),
        ("mobile menu", &ids.mobile_menu),
        ("scroll to top", &ids.scroll_top),
        ("typewriter", &ids.typewriter),
        ("hero", &ids.hero),
        ("contact form", &ids.contact_form),
        ("current year", &ids.current_year),
    ] {
        lines.push(format!("{}{role}: #{id}", indent(1)));
    }

    lines.push("Timing".to_string());
    lines.push(format!(
        "{}loader: {} messages every {} ms, removed {} ms after load",
        indent(1),
        config.loader.messages.len(),
        config.loader.cycle_ms,
        config.loader.grace_ms + config.loader.removal_ms
    ));
    lines.push(format!(
        "{}typewriter: {} phrases, starts after {} ms",
        indent(1),
        config.typewriter.phrases.len(),
        config.typewriter.start_delay_ms
    ));
    lines.push(format!(
        "{}reveal: {} target classes, threshold {}, bottom margin {}px",
        indent(1),
        config.reveal.targets.len(),
        config.reveal.threshold,
        config.reveal.bottom_margin
    ));
    lines.push(format!(
        "{}counter: {} steps every {} ms",
        indent(1),
        config.counter.steps,
        config.counter.tick_ms
    ));

    lines.push("Features".to_string());
    lines.push(format!("{}parallax: {}", indent(1), on_off(config.parallax.enabled)));
    lines.push(format!(
        "{}contact form: {}",
        indent(1),
        on_off(config.contact.enabled)
    ));
    lines.push(format!(
        "{}lazy images: {}",
        indent(1),
        on_off(config.lazy_images.enabled)
    ));
    lines
}

/// Print the configuration summary to stdout.
pub fn print_config_summary(config: &BehaviorConfig) {
    for line in format_config_summary(config) {
        println!("{}", line);
    }
}
