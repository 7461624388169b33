//! Page behavior controllers.
//!
//! Each controller owns its transient state and the element handles it
//! resolved at initialization. All of them follow the same shape:
//!
//! - `attach(&mut Ctx, ...)` looks up elements once; a missing element
//!   leaves the controller inert and every later call becomes a no-op.
//! - `on_*` handlers react to one page event or one fired [`Task`](crate::scheduler::Task).
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | Loading overlay message cycle and removal after page load |
//! | [`header`] | Scrolled/hidden header state, active nav link, smooth nav scrolling |
//! | [`mobile_menu`] | Slide-in menu open/closed state and scroll-lock |
//! | [`scroll_top`] | Scroll-to-top button visibility and action |
//! | [`typewriter`] | Typing/deleting phrase cycle |
//! | [`reveal`] | Viewport-triggered entrance animations |
//! | [`stagger`] | Cascading card entrances used by [`reveal`] |
//! | [`counter`] | Numeric stat count-up used by [`reveal`] |
//! | [`fade`] | Reusable delayed fade-in primitive |
//! | [`parallax`] | Hero background offset on scroll |
//! | [`contact`] | Local contact-form validation |
//! | [`lazy_images`] | Deferred image sources swapped in on visibility |
//! | [`year`] | Current-year footer text |

pub mod contact;
pub mod counter;
pub mod fade;
pub mod header;
pub mod lazy_images;
pub mod loader;
pub mod mobile_menu;
pub mod parallax;
pub mod reveal;
pub mod scroll_top;
pub mod stagger;
pub mod typewriter;
pub mod year;
