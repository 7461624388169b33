//! Scroll-to-top button.

use crate::config::ScrollTopConfig;
use crate::page::Ctx;
use crate::surface::{ElementRef, ScrollBehavior};

pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug)]
pub struct ScrollTop {
    config: ScrollTopConfig,
    button: Option<ElementRef>,
}

impl ScrollTop {
    pub fn new(config: ScrollTopConfig) -> Self {
        Self {
            config,
            button: None,
        }
    }

    pub fn attach(&mut self, ctx: &mut Ctx, button_id: &str) {
        self.button = ctx.surface.by_id(button_id);
    }

    pub fn on_scroll(&mut self, ctx: &mut Ctx) {
        let Some(button) = self.button else { return };
        if ctx.surface.scroll_y() > self.config.visible_after {
            ctx.surface.add_class(button, VISIBLE_CLASS);
        } else {
            ctx.surface.remove_class(button, VISIBLE_CLASS);
        }
    }

    pub fn on_click(&mut self, ctx: &mut Ctx, target: ElementRef) {
        let Some(button) = self.button else { return };
        if ctx.surface.contains(button, target) {
            ctx.surface.scroll_to(0.0, ScrollBehavior::Smooth);
        }
    }
}
