//! Header state and in-page navigation.
//!
//! On every scroll event the header is re-derived from the scroll offset:
//!
//! - `scrolled` class past `scrolled_after`;
//! - slid off-screen while scrolling down past `hide_after`, shown otherwise;
//! - the `.nav-link` pointing at the current `section[id]` gets `active`.
//!
//! Clicking a nav link scrolls smoothly to its section (leaving
//! `link_offset` px under the header) and closes the mobile menu.

use tracing::{debug, trace};

use crate::config::HeaderConfig;
use crate::controllers::mobile_menu::MobileMenu;
use crate::page::Ctx;
use crate::surface::{ElementRef, ScrollBehavior, Selector, StyleProp, UiSurface};

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";

const HIDDEN_TRANSFORM: &str = "translateY(-100%)";
const SHOWN_TRANSFORM: &str = "translateY(0)";

#[derive(Debug)]
pub struct Header {
    config: HeaderConfig,
    header: Option<ElementRef>,
    links: Vec<ElementRef>,
    sections: Vec<ElementRef>,
    last_scroll: f64,
}

impl Header {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            header: None,
            links: Vec::new(),
            sections: Vec::new(),
            last_scroll: 0.0,
        }
    }

    pub fn attach(&mut self, ctx: &mut Ctx, header_id: &str) {
        let Some(header) = ctx.surface.by_id(header_id) else {
            debug!(id = header_id, "no header, navigation inert");
            return;
        };
        self.header = Some(header);
        self.links = ctx.surface.query_all(&Selector::class(NAV_LINK_CLASS));
        self.sections = ctx.surface.query_all(&Selector::tag_with_attr("section", "id"));
        self.last_scroll = ctx.surface.scroll_y();
        debug!(
            links = self.links.len(),
            sections = self.sections.len(),
            "navigation attached"
        );
    }

    pub fn on_scroll(&mut self, ctx: &mut Ctx) {
        let Some(header) = self.header else { return };
        let y = ctx.surface.scroll_y();

        if y > self.config.scrolled_after {
            ctx.surface.add_class(header, SCROLLED_CLASS);
        } else {
            ctx.surface.remove_class(header, SCROLLED_CLASS);
        }

        let transform = if y > self.last_scroll && y > self.config.hide_after {
            HIDDEN_TRANSFORM
        } else {
            SHOWN_TRANSFORM
        };
        ctx.surface.set_style(header, StyleProp::Transform, transform);
        self.last_scroll = y;

        self.update_active_link(ctx, header);
    }

    fn update_active_link(&self, ctx: &mut Ctx, header: ElementRef) {
        let header_height = ctx.surface.offset_height(header);
        let current = current_section(
            &*ctx.surface,
            &self.sections,
            header_height + self.config.section_offset,
            ctx.surface.scroll_y(),
        )
        .and_then(|section| ctx.surface.attribute(section, "id"));
        let wanted = current.map(|id| format!("#{id}"));
        trace!(current = ?wanted, "active section");

        for link in &self.links {
            let href = ctx.surface.attribute(*link, "href");
            if wanted.is_some() && href == wanted {
                ctx.surface.add_class(*link, ACTIVE_CLASS);
            } else {
                ctx.surface.remove_class(*link, ACTIVE_CLASS);
            }
        }
    }

    /// The nav link containing `target`, if any.
    pub fn link_at(&self, surface: &dyn UiSurface, target: ElementRef) -> Option<ElementRef> {
        if self.header.is_none() {
            return None;
        }
        self.links
            .iter()
            .copied()
            .find(|link| surface.contains(*link, target))
    }

    /// Smooth-scroll to the section a nav link points at, then close the
    /// mobile menu. Links whose section does not exist do nothing.
    pub fn navigate(&mut self, ctx: &mut Ctx, link: ElementRef, menu: &mut MobileMenu) {
        let Some(header) = self.header else { return };
        let Some(section) = ctx
            .surface
            .attribute(link, "href")
            .and_then(|href| href.strip_prefix('#').map(str::to_string))
            .and_then(|id| ctx.surface.by_id(&id))
        else {
            return;
        };
        let top = ctx.surface.offset_top(section)
            - ctx.surface.offset_height(header)
            - self.config.link_offset;
        ctx.surface.scroll_to(top, ScrollBehavior::Smooth);
        menu.close(ctx);
    }
}

/// The section whose band contains `scroll_y`, where each band is
/// `[offsetTop - lead, offsetTop - lead + offsetHeight)`. When bands overlap
/// the last matching section in document order wins.
pub fn current_section(
    surface: &dyn UiSurface,
    sections: &[ElementRef],
    lead: f64,
    scroll_y: f64,
) -> Option<ElementRef> {
    sections
        .iter()
        .copied()
        .filter(|section| {
            let top = surface.offset_top(*section) - lead;
            scroll_y >= top && scroll_y < top + surface.offset_height(*section)
        })
        .last()
}
