//! In-memory document implementing [`UiSurface`].
//!
//! Used by unit tests, the integration suite and the `simulate` command. It
//! keeps a flat arena of elements with absolute layout boxes (`top`,
//! `height`), a single vertical scroll offset and a viewport height, which is
//! all the behavior layer ever reads.
//!
//! Every effective change a controller makes is appended to a [`Mutation`]
//! log. Writes that leave the document unchanged (adding a class that is
//! already present, re-setting an identical style) are not logged, so the
//! log reads as a list of visible changes.
//!
//! Visibility observers are evaluated on demand by
//! [`MemorySurface::take_intersection_changes`], which reports every
//! observed target whose intersecting state differs from the last report.
//! Newly observed targets always report once, like a browser's initial
//! observer callback.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::surface::{
    ElementRef, IntersectionEntry, ObserverId, ObserverOptions, ScrollBehavior, Selector,
    StyleProp, UiSurface,
};

/// One visible change made through the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    ClassAdded {
        target: ElementRef,
        class: String,
    },
    ClassRemoved {
        target: ElementRef,
        class: String,
    },
    Style {
        target: ElementRef,
        prop: StyleProp,
        value: String,
    },
    Text {
        target: ElementRef,
        text: String,
    },
    Attribute {
        target: ElementRef,
        name: String,
        value: Option<String>,
    },
    Removed {
        target: ElementRef,
    },
    ScrollTo {
        top: f64,
        behavior: ScrollBehavior,
    },
    ScrollLock {
        locked: bool,
    },
    Notice {
        message: String,
    },
    FormReset {
        form: ElementRef,
    },
}

impl Mutation {
    /// Element the change applies to, if any.
    pub fn target(&self) -> Option<ElementRef> {
        match self {
            Mutation::ClassAdded { target, .. }
            | Mutation::ClassRemoved { target, .. }
            | Mutation::Style { target, .. }
            | Mutation::Text { target, .. }
            | Mutation::Attribute { target, .. }
            | Mutation::Removed { target } => Some(*target),
            Mutation::FormReset { form } => Some(*form),
            Mutation::ScrollTo { .. } | Mutation::ScrollLock { .. } | Mutation::Notice { .. } => {
                None
            }
        }
    }
}

/// Declarative description of an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    top: f64,
    height: f64,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Absolute layout box: distance from the document top and height.
    pub fn bounds(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<StyleProp, String>,
    value: String,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    top: f64,
    height: f64,
    attached: bool,
}

#[derive(Debug)]
struct ObserverState {
    options: ObserverOptions,
    /// Observed targets with the last reported intersecting state.
    targets: Vec<(ElementRef, Option<bool>)>,
}

/// Arena-backed document with a mutation log.
#[derive(Debug)]
pub struct MemorySurface {
    nodes: Vec<Node>,
    body: ElementRef,
    viewport_height: f64,
    scroll_y: f64,
    scroll_locked: bool,
    notices: Vec<String>,
    observers: Vec<ObserverState>,
    log: Vec<Mutation>,
}

impl MemorySurface {
    /// Empty document containing only `body`, viewed through a viewport of
    /// the given height.
    pub fn new(viewport_height: f64) -> Self {
        let body = Node {
            tag: "body".to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            style: BTreeMap::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            top: 0.0,
            height: 0.0,
            attached: true,
        };
        Self {
            nodes: vec![body],
            body: ElementRef(0),
            viewport_height,
            scroll_y: 0.0,
            scroll_locked: false,
            notices: Vec::new(),
            observers: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn body(&self) -> ElementRef {
        self.body
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: ElementRef, spec: ElementSpec) -> ElementRef {
        let el = ElementRef(self.nodes.len());
        let attached = self.node(parent).is_some_and(|p| p.attached);
        let value = spec
            .attrs
            .iter()
            .find(|(k, _)| k == "value")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.nodes.push(Node {
            tag: spec.tag,
            classes: spec.classes,
            attrs: spec.attrs.into_iter().collect(),
            text: spec.text,
            style: BTreeMap::new(),
            value,
            parent: Some(parent),
            children: Vec::new(),
            top: spec.top,
            height: spec.height,
            attached,
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(el);
        }
        el
    }

    /// Height of the whole document: the lowest bottom edge of any element.
    pub fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .filter(|n| n.attached)
            .map(|n| n.top + n.height)
            .fold(0.0, f64::max)
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// User-initiated scroll (wheel, touch). Refused while scroll-lock is
    /// engaged. Returns whether the offset changed.
    pub fn user_scroll(&mut self, y: f64) -> bool {
        if self.scroll_locked {
            return false;
        }
        let y = y.clamp(0.0, self.max_scroll());
        let changed = y != self.scroll_y;
        self.scroll_y = y;
        changed
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn is_attached(&self, el: ElementRef) -> bool {
        self.node(el).is_some_and(|n| n.attached)
    }

    pub fn classes(&self, el: ElementRef) -> Vec<String> {
        self.node(el).map(|n| n.classes.clone()).unwrap_or_default()
    }

    pub fn style(&self, el: ElementRef, prop: StyleProp) -> Option<&str> {
        self.node(el)?.style.get(&prop).map(String::as_str)
    }

    /// Type into a form field.
    pub fn set_value(&mut self, el: ElementRef, value: &str) {
        if let Some(n) = self.nodes.get_mut(el.0) {
            n.value = value.to_string();
        }
    }

    pub fn value(&self, el: ElementRef) -> String {
        self.node(el).map(|n| n.value.clone()).unwrap_or_default()
    }

    /// Move an element's layout box (e.g. after content above it grew).
    pub fn set_bounds(&mut self, el: ElementRef, top: f64, height: f64) {
        if let Some(n) = self.nodes.get_mut(el.0) {
            n.top = top;
            n.height = height;
        }
    }

    /// Take the mutation log accumulated since the previous call.
    pub fn drain_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    /// Targets currently observed by `observer`, in observation order.
    pub fn observed(&self, observer: ObserverId) -> Vec<ElementRef> {
        self.observers
            .get(observer.0)
            .map(|o| o.targets.iter().map(|(el, _)| *el).collect())
            .unwrap_or_default()
    }

    /// Short human-readable label: `#id`, else `tag.first-class`, else `tag`.
    pub fn describe(&self, el: ElementRef) -> String {
        let Some(n) = self.node(el) else {
            return el.to_string();
        };
        if let Some(id) = n.attrs.get("id") {
            return format!("#{id}");
        }
        match n.classes.first() {
            Some(class) => format!("{}.{}", n.tag, class),
            None => n.tag.clone(),
        }
    }

    /// Evaluate every observer against the current scroll offset and report
    /// targets whose intersecting state changed since the last report.
    pub fn take_intersection_changes(&mut self) -> Vec<IntersectionEntry> {
        let view_top = self.scroll_y;
        let view_height = self.viewport_height;
        let mut changes = Vec::new();
        for (index, observer) in self.observers.iter_mut().enumerate() {
            let view_bottom = view_top + view_height + observer.options.bottom_margin;
            for (target, last) in observer.targets.iter_mut() {
                let now = match self.nodes.get(target.0) {
                    Some(n) if n.attached => intersects(
                        n.top,
                        n.height,
                        view_top,
                        view_bottom,
                        observer.options.threshold,
                    ),
                    _ => false,
                };
                if *last != Some(now) {
                    *last = Some(now);
                    changes.push(IntersectionEntry {
                        observer: ObserverId(index),
                        target: *target,
                        is_intersecting: now,
                    });
                }
            }
        }
        changes
    }

    fn node(&self, el: ElementRef) -> Option<&Node> {
        self.nodes.get(el.0)
    }

    fn live_mut(&mut self, el: ElementRef) -> Option<&mut Node> {
        self.nodes.get_mut(el.0).filter(|n| n.attached)
    }

    /// Attached descendants of `root` (excluding `root`) in document order.
    fn descendants(&self, root: ElementRef) -> Vec<ElementRef> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementRef> = match self.node(root) {
            Some(n) if n.attached => n.children.iter().rev().copied().collect(),
            _ => return out,
        };
        while let Some(el) = stack.pop() {
            out.push(el);
            if let Some(n) = self.node(el) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, el: ElementRef, selector: &Selector) -> bool {
        let Some(n) = self.node(el) else {
            return false;
        };
        match selector {
            Selector::Tag(tag) => n.tag == *tag,
            Selector::Class(class) => n.classes.iter().any(|c| c == class),
            Selector::AnyClass(classes) => classes.iter().any(|c| n.classes.contains(c)),
            Selector::TagWithAttr { tag, attr } => n.tag == *tag && n.attrs.contains_key(attr),
        }
    }
}

/// Viewport intersection test for a box `[top, top + height)` against
/// `[view_top, view_bottom]`.
fn intersects(top: f64, height: f64, view_top: f64, view_bottom: f64, threshold: f64) -> bool {
    if height <= 0.0 {
        return top >= view_top && top <= view_bottom;
    }
    let overlap = (top + height).min(view_bottom) - top.max(view_top);
    overlap > 0.0 && overlap / height >= threshold
}

impl UiSurface for MemorySurface {
    fn by_id(&self, id: &str) -> Option<ElementRef> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|el| {
                self.node(*el)
                    .and_then(|n| n.attrs.get("id"))
                    .is_some_and(|v| v == id)
            })
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementRef> {
        self.descendants(self.body)
            .into_iter()
            .filter(|el| self.matches(*el, selector))
            .collect()
    }

    fn query_within(&self, scope: ElementRef, selector: &Selector) -> Option<ElementRef> {
        self.descendants(scope)
            .into_iter()
            .find(|el| self.matches(*el, selector))
    }

    fn first_child(&self, el: ElementRef) -> Option<ElementRef> {
        self.node(el).and_then(|n| n.children.first().copied())
    }

    fn tag_name(&self, el: ElementRef) -> Option<String> {
        self.node(el).map(|n| n.tag.clone())
    }

    fn contains(&self, ancestor: ElementRef, node: ElementRef) -> bool {
        let mut cursor = Some(node);
        while let Some(el) = cursor {
            if el == ancestor {
                return true;
            }
            cursor = self.node(el).and_then(|n| n.parent);
        }
        false
    }

    fn has_class(&self, el: ElementRef, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementRef, class: &str) {
        let Some(n) = self.live_mut(el) else { return };
        if n.classes.iter().any(|c| c == class) {
            return;
        }
        n.classes.push(class.to_string());
        self.log.push(Mutation::ClassAdded {
            target: el,
            class: class.to_string(),
        });
    }

    fn remove_class(&mut self, el: ElementRef, class: &str) {
        let Some(n) = self.live_mut(el) else { return };
        let before = n.classes.len();
        n.classes.retain(|c| c != class);
        if n.classes.len() != before {
            self.log.push(Mutation::ClassRemoved {
                target: el,
                class: class.to_string(),
            });
        }
    }

    fn attribute(&self, el: ElementRef, name: &str) -> Option<String> {
        self.node(el)?.attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, el: ElementRef, name: &str, value: &str) {
        let Some(n) = self.live_mut(el) else { return };
        if n.attrs.get(name).is_some_and(|v| v == value) {
            return;
        }
        n.attrs.insert(name.to_string(), value.to_string());
        self.log.push(Mutation::Attribute {
            target: el,
            name: name.to_string(),
            value: Some(value.to_string()),
        });
    }

    fn remove_attribute(&mut self, el: ElementRef, name: &str) {
        let Some(n) = self.live_mut(el) else { return };
        if n.attrs.remove(name).is_some() {
            self.log.push(Mutation::Attribute {
                target: el,
                name: name.to_string(),
                value: None,
            });
        }
    }

    fn text(&self, el: ElementRef) -> String {
        self.node(el).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementRef, text: &str) {
        let Some(n) = self.live_mut(el) else { return };
        if n.text == text {
            return;
        }
        n.text = text.to_string();
        self.log.push(Mutation::Text {
            target: el,
            text: text.to_string(),
        });
    }

    fn set_style(&mut self, el: ElementRef, prop: StyleProp, value: &str) {
        let Some(n) = self.live_mut(el) else { return };
        if n.style.get(&prop).is_some_and(|v| v == value) {
            return;
        }
        n.style.insert(prop, value.to_string());
        self.log.push(Mutation::Style {
            target: el,
            prop,
            value: value.to_string(),
        });
    }

    fn remove_element(&mut self, el: ElementRef) {
        if el == self.body || !self.is_attached(el) {
            return;
        }
        let subtree = self.descendants(el);
        if let Some(parent) = self.node(el).and_then(|n| n.parent)
            && let Some(p) = self.nodes.get_mut(parent.0)
        {
            p.children.retain(|c| *c != el);
        }
        for gone in std::iter::once(el).chain(subtree) {
            if let Some(n) = self.nodes.get_mut(gone.0) {
                n.attached = false;
            }
        }
        self.log.push(Mutation::Removed { target: el });
    }

    fn offset_top(&self, el: ElementRef) -> f64 {
        match self.node(el) {
            Some(n) if n.attached => n.top,
            _ => 0.0,
        }
    }

    fn offset_height(&self, el: ElementRef) -> f64 {
        match self.node(el) {
            Some(n) if n.attached => n.height,
            _ => 0.0,
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_y = top.clamp(0.0, self.max_scroll());
        self.log.push(Mutation::ScrollTo { top, behavior });
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        if self.scroll_locked == locked {
            return;
        }
        self.scroll_locked = locked;
        self.log.push(Mutation::ScrollLock { locked });
    }

    fn field_value(&self, form: ElementRef, name: &str) -> Option<String> {
        self.descendants(form)
            .into_iter()
            .find(|el| {
                self.node(*el)
                    .and_then(|n| n.attrs.get("name"))
                    .is_some_and(|v| v == name)
            })
            .map(|el| self.value(el))
    }

    fn reset_form(&mut self, form: ElementRef) {
        if !self.is_attached(form) {
            return;
        }
        for el in self.descendants(form) {
            if let Some(n) = self.nodes.get_mut(el.0) {
                n.value = n.attrs.get("value").cloned().unwrap_or_default();
            }
        }
        self.log.push(Mutation::FormReset { form });
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
        self.log.push(Mutation::Notice {
            message: message.to_string(),
        });
    }

    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId {
        self.observers.push(ObserverState {
            options,
            targets: Vec::new(),
        });
        ObserverId(self.observers.len() - 1)
    }

    fn observe(&mut self, observer: ObserverId, el: ElementRef) {
        if let Some(o) = self.observers.get_mut(observer.0)
            && !o.targets.iter().any(|(t, _)| *t == el)
        {
            o.targets.push((el, None));
        }
    }

    fn unobserve(&mut self, observer: ObserverId, el: ElementRef) {
        if let Some(o) = self.observers.get_mut(observer.0) {
            o.targets.retain(|(t, _)| *t != el);
        }
    }
}
