//! Hero background parallax. Off unless `parallax.enabled` is set.

use crate::config::ParallaxConfig;
use crate::page::Ctx;
use crate::surface::{ElementRef, StyleProp};

#[derive(Debug)]
pub struct Parallax {
    config: ParallaxConfig,
    hero: Option<ElementRef>,
}

impl Parallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self { config, hero: None }
    }

    pub fn attach(&mut self, ctx: &mut Ctx, hero_id: &str) {
        if self.config.enabled {
            self.hero = ctx.surface.by_id(hero_id);
        }
    }

    pub fn on_scroll(&mut self, ctx: &mut Ctx) {
        let Some(hero) = self.hero else { return };
        let offset = ctx.surface.scroll_y() * self.config.factor;
        ctx.surface
            .set_style(hero, StyleProp::BackgroundPositionY, &format!("{offset}px"));
    }
}
