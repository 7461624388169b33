//! Generic delayed fade-in for a single element.

use crate::page::Ctx;
use crate::scheduler::{Millis, Task};
use crate::surface::{ElementRef, StyleProp};

pub const START_TRANSFORM: &str = "translateY(30px)";
pub const TRANSITION: &str = "all 0.8s cubic-bezier(0.4, 0, 0.2, 1)";

/// Fade `el` in after `delay` ms.
pub fn reveal_element(ctx: &mut Ctx, el: ElementRef, delay: Millis) {
    ctx.timers
        .schedule_after(delay, Task::RevealStart { target: el });
}

/// Apply the hidden start state, then wait one frame so the transition
/// picks up the change.
pub fn on_start(ctx: &mut Ctx, el: ElementRef) {
    ctx.surface.set_style(el, StyleProp::Opacity, "0");
    ctx.surface.set_style(el, StyleProp::Transform, START_TRANSFORM);
    ctx.surface.set_style(el, StyleProp::Transition, TRANSITION);
    ctx.timers.request_frame(Task::RevealFrame { target: el });
}

pub fn on_frame(ctx: &mut Ctx, el: ElementRef) {
    ctx.surface.set_style(el, StyleProp::Opacity, "1");
    ctx.surface.set_style(el, StyleProp::Transform, "translateY(0)");
}
