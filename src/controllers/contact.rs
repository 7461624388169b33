//! Contact form validation. Nothing is sent anywhere: a complete form is
//! acknowledged and reset.

use tracing::debug;

use crate::config::ContactConfig;
use crate::page::Ctx;
use crate::surface::ElementRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// At least one field was empty after trimming.
    Rejected,
    Accepted,
}

#[derive(Debug)]
pub struct ContactForm {
    config: ContactConfig,
    form: Option<ElementRef>,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        Self { config, form: None }
    }

    pub fn attach(&mut self, ctx: &mut Ctx, form_id: &str) {
        if !self.config.enabled {
            return;
        }
        self.form = ctx.surface.by_id(form_id);
    }

    /// Handle a submit of `form`. Returns `None` when the submit is not for
    /// the contact form, so the default action should proceed.
    pub fn on_submit(&mut self, ctx: &mut Ctx, form: ElementRef) -> Option<FormOutcome> {
        if self.form != Some(form) {
            return None;
        }
        let complete = self.config.fields.iter().all(|field| {
            ctx.surface
                .field_value(form, field)
                .is_some_and(|v| !v.trim().is_empty())
        });
        let outcome = if complete {
            ctx.surface.notify(&self.config.success_notice);
            ctx.surface.reset_form(form);
            FormOutcome::Accepted
        } else {
            ctx.surface.notify(&self.config.invalid_notice);
            FormOutcome::Rejected
        };
        debug!(?outcome, "contact form submitted");
        Some(outcome)
    }
}
