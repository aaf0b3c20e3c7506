//! # Vitrine
//!
//! The interaction layer of a single-page portfolio site, as a headless
//! state machine. A page is described in `page.toml` (sections, animatable
//! blocks, gallery, skills, images, contact form); browser events are fed in
//! one at a time and each component updates its own view state.
//!
//! # Architecture: Load, Dispatch, Reconcile
//!
//! ```text
//! 1. Load       page.toml + config.toml  →  Portfolio    (every setup runs once)
//! 2. Dispatch   PageEvent                →  Effect       (one handler at a time)
//! 3. Reconcile  Portfolio                →  index.html   (classes, styles, attrs)
//! ```
//!
//! Handlers run to completion on a single thread. Delayed steps (gallery
//! transitions, status clearing, typewriter ticks) go through a virtual clock
//! owned by the [`app::Portfolio`], so a test or a replay script decides when
//! time passes. The one true suspension point, the contact form request, is
//! split into a begin and a finish step with a [`transport::Transport`] in
//! between.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | The page contract: `page.toml` parsing and validation |
//! | [`config`] | Interaction tunables: stock defaults, `config.toml` overlay, validation |
//! | [`scheduler`] | Virtual clock and delayed-task queue |
//! | [`navigation`] | Menu toggle, scrolled state, scroll-spy, in-page anchors |
//! | [`reveal`] | Reveal-on-scroll with staggered delays |
//! | [`gallery`] | Category filtering with timed enter/leave transitions |
//! | [`contact`] | Contact form submission around one awaited request |
//! | [`transport`] | HTTP and scripted transports for form posts |
//! | [`skills`] | One-shot skill progress bars |
//! | [`lazy`] | Deferred image loading |
//! | [`effects`] | Hero parallax and typewriter |
//! | [`konami`] | Key-sequence easter egg |
//! | [`events`] | Browser events and replay scripts |
//! | [`app`] | The page context: setup, dispatch, time |
//! | [`render`] | Reconciles view state into HTML using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Shared Mutable State Between Components
//!
//! Each component owns its slice of view state and reads only its own part
//! of the page. Cross-cutting events such as an intersection are fanned out
//! by [`app::Portfolio::dispatch`], never by one component poking another.
//!
//! ## Delayed Steps Are Not Cancelled
//!
//! A gallery removal scheduled by an earlier filter click still fires after
//! a later click has shown the item again, and an older status-clear timer
//! still clears a newer message. Pages built against this behaviour rely on
//! it, so the scheduler has no cancellation.
//!
//! ## Config Layering
//!
//! ```text
//! stock defaults  ←  config.toml (sparse overlay)
//! ```
//!
//! Unknown keys are rejected at parse time and values are validated after
//! the merge. Run `vitrine gen-config` for a documented stock file.

pub mod app;
pub mod config;
pub mod contact;
pub mod effects;
pub mod events;
pub mod gallery;
pub mod konami;
pub mod lazy;
pub mod navigation;
pub mod output;
pub mod page;
pub mod render;
pub mod reveal;
pub mod scheduler;
pub mod skills;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;
