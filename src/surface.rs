//! The UI surface port: everything controllers may ask of the host document.
//!
//! Controllers only ever talk to a `&mut dyn UiSurface`. A browser binding
//! would implement it over the DOM; [`MemorySurface`](crate::memory::MemorySurface)
//! implements it over an in-memory element tree for tests and simulation.
//!
//! Elements are addressed by opaque [`ElementRef`] handles obtained from
//! lookups. Operations on a handle whose element has been removed are no-ops
//! and reads return neutral values (empty text, zero offsets).

use std::fmt;

use serde::Serialize;

/// Opaque handle to an element of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementRef(pub usize);

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The small selector vocabulary the behavior layer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `p`, `div`, ...
    Tag(String),
    /// `.nav-link`
    Class(String),
    /// `.a, .b, .c`
    AnyClass(Vec<String>),
    /// `section[id]`, `img[data-src]`
    TagWithAttr { tag: String, attr: String },
}

impl Selector {
    pub fn tag(tag: &str) -> Self {
        Selector::Tag(tag.to_string())
    }

    pub fn class(class: &str) -> Self {
        Selector::Class(class.to_string())
    }

    pub fn any_class<S: AsRef<str>>(classes: &[S]) -> Self {
        Selector::AnyClass(classes.iter().map(|c| c.as_ref().to_string()).collect())
    }

    pub fn tag_with_attr(tag: &str, attr: &str) -> Self {
        Selector::TagWithAttr {
            tag: tag.to_string(),
            attr: attr.to_string(),
        }
    }
}

/// Inline style properties the controllers write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProp {
    Opacity,
    Visibility,
    Transform,
    Transition,
    BackgroundPositionY,
}

impl StyleProp {
    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProp::Opacity => "opacity",
            StyleProp::Visibility => "visibility",
            StyleProp::Transform => "transform",
            StyleProp::Transition => "transition",
            StyleProp::BackgroundPositionY => "background-position-y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Handle for a visibility observer created on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObserverId(pub usize);

/// Options for a visibility observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverOptions {
    /// Fraction of the target's area (0.0..=1.0) that must be visible.
    pub threshold: f64,
    /// Pixels added below the viewport bottom when testing intersection.
    /// Positive values report targets before they scroll into view.
    pub bottom_margin: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            bottom_margin: 0.0,
        }
    }
}

/// One visibility change delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionEntry {
    pub observer: ObserverId,
    pub target: ElementRef,
    pub is_intersecting: bool,
}

/// Host document capability injected into every controller.
pub trait UiSurface {
    // --- lookup -----------------------------------------------------------

    fn by_id(&self, id: &str) -> Option<ElementRef>;

    /// All matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementRef>;

    /// First matching descendant of `scope` in document order.
    fn query_within(&self, scope: ElementRef, selector: &Selector) -> Option<ElementRef>;

    fn first_child(&self, el: ElementRef) -> Option<ElementRef>;

    fn tag_name(&self, el: ElementRef) -> Option<String>;

    /// True if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementRef, node: ElementRef) -> bool;

    // --- classes, attributes, text, style -----------------------------------

    fn has_class(&self, el: ElementRef, class: &str) -> bool;
    fn add_class(&mut self, el: ElementRef, class: &str);
    fn remove_class(&mut self, el: ElementRef, class: &str);

    fn attribute(&self, el: ElementRef, name: &str) -> Option<String>;
    fn set_attribute(&mut self, el: ElementRef, name: &str, value: &str);
    fn remove_attribute(&mut self, el: ElementRef, name: &str);

    fn text(&self, el: ElementRef) -> String;
    fn set_text(&mut self, el: ElementRef, text: &str);

    fn set_style(&mut self, el: ElementRef, prop: StyleProp, value: &str);

    /// Detach the element (and its subtree) from the document.
    fn remove_element(&mut self, el: ElementRef);

    // --- layout and scrolling -----------------------------------------------

    /// Distance in px from the document top to the element's top edge.
    fn offset_top(&self, el: ElementRef) -> f64;
    fn offset_height(&self, el: ElementRef) -> f64;

    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Suppress (or restore) background page scrolling.
    fn set_scroll_lock(&mut self, locked: bool);

    // --- forms and notices ----------------------------------------------------

    /// Current value of the named field inside `form`, if such a field exists.
    fn field_value(&self, form: ElementRef, name: &str) -> Option<String>;
    fn reset_form(&mut self, form: ElementRef);

    /// Show a blocking, user-facing message.
    fn notify(&mut self, message: &str);

    // --- visibility observation -------------------------------------------------

    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId;
    fn observe(&mut self, observer: ObserverId, el: ElementRef);
    fn unobserve(&mut self, observer: ObserverId, el: ElementRef);
}
