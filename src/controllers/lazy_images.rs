//! Deferred image loading: `img[data-src]` gets its real `src` the first
//! time it becomes visible.

use tracing::{debug, trace};

use crate::config::LazyImagesConfig;
use crate::page::Ctx;
use crate::surface::{IntersectionEntry, ObserverId, ObserverOptions, Selector};

#[derive(Debug)]
pub struct LazyImages {
    config: LazyImagesConfig,
    observer: Option<ObserverId>,
}

impl LazyImages {
    pub fn new(config: LazyImagesConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn attach(&mut self, ctx: &mut Ctx) {
        if !self.config.enabled {
            return;
        }
        let images = ctx
            .surface
            .query_all(&Selector::tag_with_attr("img", &self.config.source_attribute));
        let observer = ctx.surface.create_observer(ObserverOptions::default());
        for img in &images {
            ctx.surface.observe(observer, *img);
        }
        debug!(images = images.len(), "lazy images observed");
        self.observer = Some(observer);
    }

    pub fn on_intersection(&mut self, ctx: &mut Ctx, entry: &IntersectionEntry) {
        if self.observer != Some(entry.observer) || !entry.is_intersecting {
            return;
        }
        let img = entry.target;
        if let Some(src) = ctx.surface.attribute(img, &self.config.source_attribute) {
            trace!(%img, %src, "loading image");
            ctx.surface.set_attribute(img, "src", &src);
            ctx.surface.remove_attribute(img, &self.config.source_attribute);
        }
        ctx.surface.unobserve(entry.observer, img);
    }
}
