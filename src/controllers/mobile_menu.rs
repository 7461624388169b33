//! Slide-in mobile menu.
//!
//! Two states, closed and open. The `active` class on both the toggle and
//! the panel, and the page scroll-lock, are always rewritten from the state
//! after every transition, so they can never disagree with it.
//!
//! This controller is the only writer of the page scroll-lock.

use tracing::debug;

use crate::page::Ctx;
use crate::surface::{ElementRef, Selector};

pub const ACTIVE_CLASS: &str = "active";
pub const MOBILE_LINK_CLASS: &str = "mobile-nav-link";

#[derive(Debug, Default)]
pub struct MobileMenu {
    toggle: Option<ElementRef>,
    panel: Option<ElementRef>,
    links: Vec<ElementRef>,
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_inert(&self) -> bool {
        self.toggle.is_none()
    }

    /// Resolve toggle and panel. Both must exist or the menu stays inert.
    pub fn attach(&mut self, ctx: &mut Ctx, toggle_id: &str, panel_id: &str) {
        let (Some(toggle), Some(panel)) = (ctx.surface.by_id(toggle_id), ctx.surface.by_id(panel_id))
        else {
            debug!(toggle_id, panel_id, "mobile menu elements missing, menu inert");
            return;
        };
        self.toggle = Some(toggle);
        self.panel = Some(panel);
        self.links = ctx.surface.query_all(&Selector::class(MOBILE_LINK_CLASS));
    }

    pub fn toggle(&mut self, ctx: &mut Ctx) {
        if self.is_inert() {
            return;
        }
        self.open = !self.open;
        self.apply(ctx);
    }

    /// Force the closed state. Safe to call in any state.
    pub fn close(&mut self, ctx: &mut Ctx) {
        if self.is_inert() {
            return;
        }
        self.open = false;
        self.apply(ctx);
    }

    /// Click handlers bound to the toggle and the menu's own links.
    pub fn on_click(&mut self, ctx: &mut Ctx, target: ElementRef) {
        let Some(toggle) = self.toggle else { return };
        if ctx.surface.contains(toggle, target) {
            self.toggle(ctx);
        } else if self.links.iter().any(|l| ctx.surface.contains(*l, target)) {
            self.close(ctx);
        }
    }

    /// Document-level click handler: anything outside toggle and panel closes.
    pub fn on_document_click(&mut self, ctx: &mut Ctx, target: ElementRef) {
        let (Some(toggle), Some(panel)) = (self.toggle, self.panel) else {
            return;
        };
        if !ctx.surface.contains(toggle, target) && !ctx.surface.contains(panel, target) {
            self.close(ctx);
        }
    }

    fn apply(&self, ctx: &mut Ctx) {
        for el in [self.toggle, self.panel].into_iter().flatten() {
            if self.open {
                ctx.surface.add_class(el, ACTIVE_CLASS);
            } else {
                ctx.surface.remove_class(el, ACTIVE_CLASS);
            }
        }
        ctx.surface.set_scroll_lock(self.open);
        debug!(open = self.open, "mobile menu");
    }
}
