//! Page runtime: owns the controllers and routes host events to them.
//!
//! A [`Page`] is built once per document over a [`UiSurface`] and a
//! [`Scheduler`]. The host then feeds it two kinds of input:
//!
//! - [`PageEvent`]s through [`Page::dispatch`] (document ready, load,
//!   scroll, clicks, form submits, visibility changes);
//! - due [`Task`]s through [`Page::fire`].
//!
//! Nothing is wired until [`PageEvent::ContentReady`]. Every handler runs to
//! completion before the next input is accepted, so controllers never see
//! interleaved calls.

use tracing::{debug, trace};

use crate::config::BehaviorConfig;
use crate::controllers::contact::ContactForm;
use crate::controllers::counter::Counters;
use crate::controllers::header::Header;
use crate::controllers::lazy_images::LazyImages;
use crate::controllers::loader::Loader;
use crate::controllers::mobile_menu::MobileMenu;
use crate::controllers::parallax::Parallax;
use crate::controllers::reveal::Reveal;
use crate::controllers::scroll_top::ScrollTop;
use crate::controllers::typewriter::Typewriter;
use crate::controllers::{fade, year};
use crate::scheduler::{Millis, Scheduler, Task, VirtualClock};
use crate::surface::{ElementRef, IntersectionEntry, UiSurface};

/// Borrowed ports handed to every controller call.
pub struct Ctx<'a> {
    pub surface: &'a mut dyn UiSurface,
    pub timers: &'a mut dyn Scheduler,
}

/// Host signals.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document structure is available (`DOMContentLoaded`).
    ContentReady,
    /// All resources finished loading (`load`).
    Loaded,
    /// The scroll offset changed.
    Scroll,
    Click { target: ElementRef },
    Submit { form: ElementRef },
    Intersection(IntersectionEntry),
}

/// What the host should do with the event after the page handled it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The host must skip its default action (link navigation, form post).
    pub default_prevented: bool,
}

#[derive(Debug)]
struct Controllers {
    loader: Loader,
    header: Header,
    menu: MobileMenu,
    scroll_top: ScrollTop,
    typewriter: Typewriter,
    reveal: Reveal,
    parallax: Parallax,
    contact: ContactForm,
    lazy_images: LazyImages,
}

impl Controllers {
    fn new(config: &BehaviorConfig) -> Self {
        Self {
            loader: Loader::new(config.loader.clone()),
            header: Header::new(config.header.clone()),
            menu: MobileMenu::new(),
            scroll_top: ScrollTop::new(config.scroll_top.clone()),
            typewriter: Typewriter::new(config.typewriter.clone()),
            reveal: Reveal::new(config.reveal.clone(), Counters::new(config.counter.clone())),
            parallax: Parallax::new(config.parallax.clone()),
            contact: ContactForm::new(config.contact.clone()),
            lazy_images: LazyImages::new(config.lazy_images.clone()),
        }
    }
}

/// One document's behavior layer.
#[derive(Debug)]
pub struct Page<S: UiSurface, T: Scheduler> {
    surface: S,
    timers: T,
    config: BehaviorConfig,
    ready: bool,
    controllers: Controllers,
}

impl<S: UiSurface, T: Scheduler> Page<S, T> {
    pub fn new(surface: S, timers: T, config: BehaviorConfig) -> Self {
        Self {
            controllers: Controllers::new(&config),
            surface,
            timers,
            config,
            ready: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn loader(&self) -> &Loader {
        &self.controllers.loader
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.controllers.menu
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.controllers.typewriter
    }

    pub fn reveal(&self) -> &Reveal {
        &self.controllers.reveal
    }

    pub fn lazy_images(&self) -> &LazyImages {
        &self.controllers.lazy_images
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Dispatch {
        trace!(?event, "dispatch");
        let mut out = Dispatch::default();
        if event == PageEvent::ContentReady {
            self.content_ready();
            return out;
        }
        if !self.ready {
            trace!("document not ready, event ignored");
            return out;
        }

        let c = &mut self.controllers;
        let mut ctx = Ctx {
            surface: &mut self.surface,
            timers: &mut self.timers,
        };
        match event {
            PageEvent::ContentReady => {}
            PageEvent::Loaded => c.loader.on_loaded(&mut ctx),
            PageEvent::Scroll => {
                c.header.on_scroll(&mut ctx);
                c.scroll_top.on_scroll(&mut ctx);
                c.parallax.on_scroll(&mut ctx);
            }
            PageEvent::Click { target } => {
                if let Some(link) = c.header.link_at(&*ctx.surface, target) {
                    out.default_prevented = true;
                    c.header.navigate(&mut ctx, link, &mut c.menu);
                }
                c.menu.on_click(&mut ctx, target);
                c.scroll_top.on_click(&mut ctx, target);
                c.menu.on_document_click(&mut ctx, target);
            }
            PageEvent::Submit { form } => {
                if c.contact.on_submit(&mut ctx, form).is_some() {
                    out.default_prevented = true;
                }
            }
            PageEvent::Intersection(entry) => {
                c.reveal.on_intersection(&mut ctx, &entry);
                c.lazy_images.on_intersection(&mut ctx, &entry);
            }
        }
        out
    }

    fn content_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        let ids = &self.config.elements;
        let c = &mut self.controllers;
        let mut ctx = Ctx {
            surface: &mut self.surface,
            timers: &mut self.timers,
        };
        c.loader.attach(&mut ctx, &ids.loader);
        c.header.attach(&mut ctx, &ids.header);
        c.menu.attach(&mut ctx, &ids.hamburger, &ids.mobile_menu);
        c.scroll_top.attach(&mut ctx, &ids.scroll_top);
        c.typewriter.attach(&mut ctx, &ids.typewriter);
        c.reveal.attach(&mut ctx);
        c.lazy_images.attach(&mut ctx);
        c.contact.attach(&mut ctx, &ids.contact_form);
        c.parallax.attach(&mut ctx, &ids.hero);
        year::inject_year(&mut ctx, &ids.current_year, year::current_year());
        debug!("page behaviors attached");
    }

    /// Run a task the scheduler reported as due.
    pub fn fire(&mut self, task: Task) {
        trace!(?task, at = self.timers.now(), "fire");
        let c = &mut self.controllers;
        let mut ctx = Ctx {
            surface: &mut self.surface,
            timers: &mut self.timers,
        };
        match task {
            Task::LoaderTick => c.loader.on_tick(&mut ctx),
            Task::LoaderSwap => c.loader.on_swap(&mut ctx),
            Task::LoaderFadeOut => c.loader.on_fade_out(&mut ctx),
            Task::LoaderRemove => c.loader.on_remove(&mut ctx),
            Task::TypewriterTick => c.typewriter.on_tick(&mut ctx),
            Task::CardEnter { batch, index } => c.reveal.on_card_enter(&mut ctx, batch, index),
            Task::CardSettle { batch, index } => c.reveal.on_card_settle(&mut ctx, batch, index),
            Task::CounterTick { target } => c.reveal.on_counter_tick(&mut ctx, target),
            Task::RevealStart { target } => fade::on_start(&mut ctx, target),
            Task::RevealFrame { target } => fade::on_frame(&mut ctx, target),
        }
    }

    /// Fade `el` in after `delay` ms.
    pub fn reveal_element(&mut self, el: ElementRef, delay: Millis) {
        fade::reveal_element(
            &mut Ctx {
                surface: &mut self.surface,
                timers: &mut self.timers,
            },
            el,
            delay,
        );
    }
}

impl<S: UiSurface> Page<S, VirtualClock> {
    /// Advance virtual time by `ms`, firing every task that comes due in
    /// order. Returns the number of tasks fired.
    pub fn advance(&mut self, ms: Millis) -> usize {
        let until = self.timers.now() + ms;
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(until) {
            self.fire(task);
            fired += 1;
        }
        self.timers.set_now(until);
        fired
    }
}
