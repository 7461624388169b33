//! Footer copyright year.

use chrono::Datelike;

use crate::page::Ctx;

/// Current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Write `year` into the element with `id`, if present.
pub fn inject_year(ctx: &mut Ctx, id: &str, year: i32) {
    if let Some(el) = ctx.surface.by_id(id) {
        ctx.surface.set_text(el, &year.to_string());
    }
}
