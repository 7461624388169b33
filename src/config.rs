//! Behavior configuration.
//!
//! Handles loading, validating, and merging a `folio.toml` file. Stock
//! defaults reproduce the stock portfolio page exactly; a user file only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [elements]
//! loader = "loading-screen"   # Element ids in the host document
//! header = "header"
//! hamburger = "hamburger"
//! mobile_menu = "mobile-menu"
//! scroll_top = "scrollToTop"
//! typewriter = "typewriter"
//! hero = "hero"
//! contact_form = "contactForm"
//! current_year = "currentYear"
//!
//! [loader]
//! messages = ["Loading Portfolio...", "Preparing Experience...", "Almost Ready...", "Welcome!"]
//! cycle_ms = 800              # One message per cycle
//! fade_ms = 200               # Text fade before each swap
//! grace_ms = 1000             # Wait after page load before fading the overlay
//! removal_ms = 500            # Overlay fade duration before removal
//!
//! [header]
//! scrolled_after = 100.0      # px; header gets `scrolled` beyond this
//! hide_after = 500.0          # px; header hides on downward scroll beyond this
//! section_offset = 100.0      # px above a section where it becomes current
//! link_offset = 20.0          # px gap left above a section after nav click
//!
//! [scroll_top]
//! visible_after = 300.0
//!
//! [typewriter]
//! phrases = ["Aspiring Software Developer", "Full Stack Developer", "Problem Solver", "Tech Enthusiast"]
//! start_delay_ms = 1000
//! type_ms = 100
//! delete_ms = 50
//! hold_ms = 2000              # Pause with a full phrase shown
//! next_ms = 500               # Pause before typing the next phrase
//!
//! [reveal]
//! threshold = 0.1
//! bottom_margin = 50.0
//! targets = ["fade-in-up", "fade-in-left", "fade-in-right", "skills-grid",
//!            "projects-grid", "stat-card", "timeline-item", "contact-card"]
//!
//! [reveal.skills]
//! stagger_ms = 100
//! settle_ms = 50
//! offset_px = 30.0
//! duration_s = 0.6
//!
//! [reveal.projects]
//! stagger_ms = 200
//! settle_ms = 50
//! offset_px = 50.0
//! duration_s = 0.8
//!
//! [counter]
//! steps = 30
//! tick_ms = 50
//!
//! [parallax]
//! enabled = false
//! factor = 0.4
//!
//! [contact]
//! enabled = true
//! fields = ["name", "email", "message"]
//! invalid_notice = "Please fill all fields."
//! success_notice = "Message sent successfully!"
//!
//! [lazy_images]
//! enabled = true
//! source_attribute = "data-src"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::scheduler::Millis;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Behavior configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Ids of the host document elements each controller drives.
    pub elements: ElementsConfig,
    pub loader: LoaderConfig,
    pub header: HeaderConfig,
    pub scroll_top: ScrollTopConfig,
    pub typewriter: TypewriterConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub parallax: ParallaxConfig,
    pub contact: ContactConfig,
    pub lazy_images: LazyImagesConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.messages.is_empty() {
            return Err(ConfigError::Validation(
                "loader.messages must not be empty".into(),
            ));
        }
        if self.typewriter.phrases.is_empty() {
            return Err(ConfigError::Validation(
                "typewriter.phrases must not be empty".into(),
            ));
        }
        if self.typewriter.phrases.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Validation(
                "typewriter.phrases must not contain empty phrases".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be 0.0-1.0".into(),
            ));
        }
        if self.counter.steps == 0 {
            return Err(ConfigError::Validation(
                "counter.steps must be non-zero".into(),
            ));
        }
        if self.contact.fields.is_empty() {
            return Err(ConfigError::Validation(
                "contact.fields must not be empty".into(),
            ));
        }
        let intervals = [
            ("loader.cycle_ms", self.loader.cycle_ms),
            ("typewriter.type_ms", self.typewriter.type_ms),
            ("typewriter.delete_ms", self.typewriter.delete_ms),
            ("counter.tick_ms", self.counter.tick_ms),
        ];
        if let Some((key, _)) = intervals.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Validation(format!("{key} must be non-zero")));
        }
        Ok(())
    }
}

/// Element ids looked up at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementsConfig {
    pub loader: String,
    pub header: String,
    pub hamburger: String,
    pub mobile_menu: String,
    pub scroll_top: String,
    pub typewriter: String,
    pub hero: String,
    pub contact_form: String,
    pub current_year: String,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            loader: "loading-screen".into(),
            header: "header".into(),
            hamburger: "hamburger".into(),
            mobile_menu: "mobile-menu".into(),
            scroll_top: "scrollToTop".into(),
            typewriter: "typewriter".into(),
            hero: "hero".into(),
            contact_form: "contactForm".into(),
            current_year: "currentYear".into(),
        }
    }
}

/// Loading overlay timings and messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Messages cycled on the overlay, in order. Wraps around.
    pub messages: Vec<String>,
    pub cycle_ms: Millis,
    pub fade_ms: Millis,
    pub grace_ms: Millis,
    pub removal_ms: Millis,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            messages: vec![
                "Loading Portfolio...".into(),
                "Preparing Experience...".into(),
                "Almost Ready...".into(),
                "Welcome!".into(),
            ],
            cycle_ms: 800,
            fade_ms: 200,
            grace_ms: 1000,
            removal_ms: 500,
        }
    }
}

/// Header scroll thresholds, all in px.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    pub scrolled_after: f64,
    pub hide_after: f64,
    pub section_offset: f64,
    pub link_offset: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scrolled_after: 100.0,
            hide_after: 500.0,
            section_offset: 100.0,
            link_offset: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollTopConfig {
    pub visible_after: f64,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            visible_after: 300.0,
        }
    }
}

/// Typewriter phrases and per-character timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: Millis,
    pub type_ms: Millis,
    pub delete_ms: Millis,
    pub hold_ms: Millis,
    pub next_ms: Millis,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Aspiring Software Developer".into(),
                "Full Stack Developer".into(),
                "Problem Solver".into(),
                "Tech Enthusiast".into(),
            ],
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_ms: 500,
        }
    }
}

/// Scroll-triggered reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of a target that must be visible (0.0-1.0).
    pub threshold: f64,
    /// px added below the viewport bottom; targets trigger this early.
    pub bottom_margin: f64,
    /// Classes whose elements are observed at initialization.
    pub targets: Vec<String>,
    pub skills: StaggerConfig,
    pub projects: StaggerConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
            targets: [
                "fade-in-up",
                "fade-in-left",
                "fade-in-right",
                "skills-grid",
                "projects-grid",
                "stat-card",
                "timeline-item",
                "contact-card",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            skills: StaggerConfig {
                stagger_ms: 100,
                settle_ms: 50,
                offset_px: 30.0,
                duration_s: 0.6,
            },
            projects: StaggerConfig {
                stagger_ms: 200,
                settle_ms: 50,
                offset_px: 50.0,
                duration_s: 0.8,
            },
        }
    }
}

/// One staggered card cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaggerConfig {
    /// Delay between consecutive cards.
    pub stagger_ms: Millis,
    /// Delay between the hidden start state and the visible end state.
    pub settle_ms: Millis,
    /// Vertical start offset in px.
    pub offset_px: f64,
    /// CSS transition duration in seconds.
    pub duration_s: f64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        RevealConfig::default().skills
    }
}

impl StaggerConfig {
    /// CSS `transition` value applied to each card.
    pub fn transition(&self) -> String {
        format!("all {}s ease", self.duration_s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Number of increments from 0 to the target.
    pub steps: u32,
    pub tick_ms: Millis,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            steps: 30,
            tick_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    pub enabled: bool,
    /// Background offset per px of scroll.
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 0.4,
        }
    }
}

/// Local contact-form validation. Nothing is ever sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub enabled: bool,
    /// Names of the required fields.
    pub fields: Vec<String>,
    pub invalid_notice: String,
    pub success_notice: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fields: vec!["name".into(), "email".into(), "message".into()],
            invalid_notice: "Please fill all fields.".into(),
            success_notice: "Message sent successfully!".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyImagesConfig {
    pub enabled: bool,
    /// Attribute holding the deferred image source.
    pub source_attribute: String,
}

impl Default for LazyImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_attribute: "data-src".into(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BehaviorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BehaviorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the behavior config.
///
/// `None` yields the validated stock defaults. A given path must exist;
/// its values are merged on top of the defaults, unknown keys are rejected,
/// and the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<BehaviorConfig, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio-motion configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Host document element ids
# ---------------------------------------------------------------------------
[elements]
loader = "loading-screen"
header = "header"
hamburger = "hamburger"
mobile_menu = "mobile-menu"
scroll_top = "scrollToTop"
typewriter = "typewriter"
hero = "hero"
contact_form = "contactForm"
current_year = "currentYear"

# ---------------------------------------------------------------------------
# Loading overlay
# ---------------------------------------------------------------------------
[loader]
# Cycled in order on the overlay's first <p>, wrapping around.
messages = [
    "Loading Portfolio...",
    "Preparing Experience...",
    "Almost Ready...",
    "Welcome!",
]
# One message per cycle.
cycle_ms = 800
# Text fade-out before each message swap.
fade_ms = 200
# Wait after the page's load event before fading the overlay out.
grace_ms = 1000
# Overlay fade duration; the overlay is removed afterwards.
removal_ms = 500

# ---------------------------------------------------------------------------
# Header and navigation (px)
# ---------------------------------------------------------------------------
[header]
# Header gets the `scrolled` class past this offset.
scrolled_after = 100.0
# Header slides away when scrolling down past this offset.
hide_after = 500.0
# A section becomes current this far before its top reaches the header.
section_offset = 100.0
# Space left above a section after a nav link click.
link_offset = 20.0

# ---------------------------------------------------------------------------
# Scroll-to-top button
# ---------------------------------------------------------------------------
[scroll_top]
visible_after = 300.0

# ---------------------------------------------------------------------------
# Typewriter
# ---------------------------------------------------------------------------
[typewriter]
phrases = [
    "Aspiring Software Developer",
    "Full Stack Developer",
    "Problem Solver",
    "Tech Enthusiast",
]
start_delay_ms = 1000
# Per character while typing / deleting.
type_ms = 100
delete_ms = 50
# Pause with the full phrase shown.
hold_ms = 2000
# Pause before typing the next phrase.
next_ms = 500

# ---------------------------------------------------------------------------
# Scroll reveals
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible (0.0 - 1.0).
threshold = 0.1
# Extra px below the viewport bottom; elements trigger this early.
bottom_margin = 50.0
# Elements carrying any of these classes are observed.
targets = [
    "fade-in-up",
    "fade-in-left",
    "fade-in-right",
    "skills-grid",
    "projects-grid",
    "stat-card",
    "timeline-item",
    "contact-card",
]

# Skill cards cascade in when the skills grid appears.
[reveal.skills]
stagger_ms = 100
settle_ms = 50
offset_px = 30.0
duration_s = 0.6

# Project cards cascade in when the projects grid appears.
[reveal.projects]
stagger_ms = 200
settle_ms = 50
offset_px = 50.0
duration_s = 0.8

# ---------------------------------------------------------------------------
# Stat counters
# ---------------------------------------------------------------------------
[counter]
# Increments from 0 to the target value.
steps = 30
tick_ms = 50

# ---------------------------------------------------------------------------
# Hero parallax (off by default)
# ---------------------------------------------------------------------------
[parallax]
enabled = false
factor = 0.4

# ---------------------------------------------------------------------------
# Contact form (validated locally, never sent)
# ---------------------------------------------------------------------------
[contact]
enabled = true
fields = ["name", "email", "message"]
invalid_notice = "Please fill all fields."
success_notice = "Message sent successfully!"

# ---------------------------------------------------------------------------
# Lazy images
# ---------------------------------------------------------------------------
[lazy_images]
enabled = true
source_attribute = "data-src"
"##
}
