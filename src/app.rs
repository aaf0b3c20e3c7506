//! The page's view-state context.
//!
//! [`Portfolio`] owns every component's state plus the shared virtual clock.
//! [`Portfolio::load`] is the startup hook: it runs each component's setup
//! once. After that, [`Portfolio::dispatch`] routes one browser event at a
//! time to whichever components care about it. Components never look at each
//! other's state; each reads its own slice of the page and writes its own
//! view state.

use tracing::{debug, info};

use crate::config::InteractionConfig;
use crate::contact::{ClearStatus, ContactState, Submission};
use crate::effects::{Parallax, TypeTick, Typewriter};
use crate::events::PageEvent;
use crate::gallery::{GalleryFilter, GalleryTask};
use crate::konami::{EasterEgg, KonamiDetector};
use crate::lazy::LazyImages;
use crate::navigation::{AnchorOutcome, NavState, resolve_anchor};
use crate::page::Page;
use crate::reveal::{Intersection, Revealer};
use crate::scheduler::{Millis, Scheduler};
use crate::skills::SkillBars;
use crate::transport::{
    ScriptedReply, ScriptedTransport, SubmitResponse, Transport, TransportError,
};

/// Any delayed step, from any component.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Gallery(GalleryTask),
    ClearStatus(ClearStatus),
    Type(TypeTick),
}

impl From<GalleryTask> for Task {
    fn from(task: GalleryTask) -> Self {
        Task::Gallery(task)
    }
}

impl From<ClearStatus> for Task {
    fn from(task: ClearStatus) -> Self {
        Task::ClearStatus(task)
    }
}

impl From<TypeTick> for Task {
    fn from(task: TypeTick) -> Self {
        Task::Type(task)
    }
}

/// What the host has to do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Smooth-scroll the window to this offset.
    ScrollTo(f64),
    /// Send this submission and report back through
    /// [`Portfolio::complete_submission`].
    Submit(Submission),
}

pub struct Portfolio {
    page: Page,
    config: InteractionConfig,
    scheduler: Scheduler<Task>,
    scroll_offset: f64,
    nav: NavState,
    revealer: Revealer,
    gallery: GalleryFilter,
    contact: Option<ContactState>,
    skills: SkillBars,
    lazy: LazyImages,
    parallax: Parallax,
    typewriter: Option<Typewriter>,
    konami: KonamiDetector,
    egg: EasterEgg,
}

impl Portfolio {
    /// Run every component's setup against the page, as on page load.
    pub fn load(page: Page, config: InteractionConfig) -> Self {
        let mut scheduler = Scheduler::new();
        let typewriter = page
            .hero
            .as_ref()
            .and_then(|h| h.typewriter.as_deref())
            .map(|text| Typewriter::start(text, &config.effects, &mut scheduler));

        let portfolio = Self {
            nav: NavState::default(),
            revealer: Revealer::setup(&page, &config.reveal),
            gallery: GalleryFilter::setup(&page.gallery, page.initial_filter()),
            contact: page.contact.as_ref().map(ContactState::setup),
            skills: SkillBars::setup(&page.skills, config.skills.threshold),
            lazy: LazyImages::setup(&page.images, config.lazy.threshold),
            parallax: Parallax::setup(page.hero.as_ref()),
            typewriter,
            konami: KonamiDetector::new(config.konami.sequence.clone()),
            egg: EasterEgg::default(),
            scroll_offset: 0.0,
            scheduler,
            page,
            config,
        };
        info!(
            sections = portfolio.page.sections.len(),
            animatable = portfolio.revealer.elements().len(),
            gallery_items = portfolio.gallery.items().len(),
            "Page loaded"
        );
        portfolio
    }

    /// Handle one browser event.
    pub fn dispatch(&mut self, event: &PageEvent) -> Effect {
        debug!(?event, now = self.scheduler.now(), "Dispatch");
        match event {
            PageEvent::Scroll { offset } => {
                self.scroll(*offset);
                Effect::None
            }
            PageEvent::ToggleMenu => {
                self.nav.toggle_menu(&self.page.nav);
                Effect::None
            }
            PageEvent::NavLink { href } => {
                self.nav.link_activated();
                self.anchor(href)
            }
            PageEvent::Anchor { href } => self.anchor(href),
            PageEvent::Filter { tag } => {
                self.gallery
                    .select(tag, &self.config.gallery, &mut self.scheduler);
                Effect::None
            }
            PageEvent::Intersect { id, ratio } => {
                let observation = Intersection::new(*ratio);
                self.revealer.observe(id, observation);
                self.skills.observe(id, observation);
                self.lazy.observe(id, observation);
                Effect::None
            }
            PageEvent::Key { key } => {
                if self.konami.press(key) {
                    self.egg.trigger(&self.config.konami.overlay_link);
                }
                Effect::None
            }
            PageEvent::Type { field, value } => {
                if let Some(contact) = &mut self.contact {
                    contact.fill(field, value);
                }
                Effect::None
            }
            PageEvent::Submit { .. } => self
                .contact
                .as_mut()
                .and_then(|c| c.begin(&self.config.contact))
                .map_or(Effect::None, Effect::Submit),
            PageEvent::DismissOverlay => {
                self.egg.dismiss();
                Effect::None
            }
            PageEvent::Advance { ms } => {
                self.advance(*ms);
                Effect::None
            }
        }
    }

    fn scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.nav.on_scroll(
            offset,
            &self.page.nav,
            &self.page.sections,
            &self.config.navigation,
        );
        self.parallax
            .on_scroll(offset, self.page.viewport_height, &self.config.effects);
    }

    fn anchor(&self, href: &str) -> Effect {
        match resolve_anchor(href, &self.page.sections, self.config.navigation.nav_height) {
            AnchorOutcome::ScrollTo(offset) => Effect::ScrollTo(offset),
            AnchorOutcome::Prevented | AnchorOutcome::PassThrough => Effect::None,
        }
    }

    /// Report the outcome of a submission handed out by [`Effect::Submit`].
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        outcome: &Result<SubmitResponse, TransportError>,
    ) {
        if let Some(contact) = &mut self.contact {
            contact.finish(submission, outcome, &self.config.contact, &mut self.scheduler);
        }
    }

    /// Let `ms` of virtual time pass, running every step that comes due.
    pub fn advance(&mut self, ms: Millis) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.settle_at(until);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Gallery(task) => self.gallery.run(task),
            Task::ClearStatus(task) => {
                if let Some(contact) = &mut self.contact {
                    contact.clear_status(task);
                }
            }
            Task::Type(_) => {
                if let Some(typewriter) = &mut self.typewriter {
                    typewriter.tick(&self.config.effects, &mut self.scheduler);
                }
            }
        }
    }

    /// Run a whole script, answering submissions with `responder`.
    ///
    /// Scroll intents are applied straight away as if the smooth scroll had
    /// finished.
    pub async fn replay(&mut self, events: &[PageEvent], responder: &Responder<'_>) {
        for event in events {
            match self.dispatch(event) {
                Effect::None => {}
                Effect::ScrollTo(offset) => self.scroll(offset),
                Effect::Submit(submission) => {
                    let hint = match event {
                        PageEvent::Submit { respond } => respond.clone(),
                        _ => None,
                    };
                    let outcome = responder.answer(&submission, hint).await;
                    self.complete_submission(submission, &outcome);
                }
            }
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn navigation(&self) -> &NavState {
        &self.nav
    }

    pub fn revealer(&self) -> &Revealer {
        &self.revealer
    }

    pub fn gallery(&self) -> &GalleryFilter {
        &self.gallery
    }

    pub fn contact(&self) -> Option<&ContactState> {
        self.contact.as_ref()
    }

    pub fn skills(&self) -> &SkillBars {
        &self.skills
    }

    pub fn lazy_images(&self) -> &LazyImages {
        &self.lazy
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    pub fn konami_cursor(&self) -> usize {
        self.konami.cursor()
    }

    pub fn easter_egg(&self) -> &EasterEgg {
        &self.egg
    }
}

/// Who answers contact-form submissions during a replay.
pub enum Responder<'a> {
    /// Send real requests.
    Live(&'a dyn Transport),
    /// Answer each submission from its `respond` hint (200 when absent).
    Scripted(ScriptedTransport),
}

impl Responder<'_> {
    pub fn scripted() -> Self {
        Responder::Scripted(ScriptedTransport::default())
    }

    async fn answer(
        &self,
        submission: &Submission,
        hint: Option<ScriptedReply>,
    ) -> Result<SubmitResponse, TransportError> {
        match self {
            Responder::Live(transport) => {
                transport
                    .post_form(&submission.endpoint, &submission.fields)
                    .await
            }
            Responder::Scripted(transport) => {
                transport.push(hint.unwrap_or_default());
                transport
                    .post_form(&submission.endpoint, &submission.fields)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::StatusKind;
    use crate::gallery::ItemPhase;
    use crate::test_helpers::*;

    #[test]
    fn load_runs_every_setup() {
        let p = loaded_fixture();
        assert_eq!(p.gallery().active_tag(), Some("all"));
        assert!(!p.revealer().elements().is_empty());
        assert_eq!(p.lazy_images().pending(), 2);
        assert_eq!(p.parallax().offsets().len(), 3);
        assert!(p.contact().is_some());
        assert!(!p.navigation().menu_open);
    }

    #[test]
    fn scroll_updates_nav_and_parallax() {
        let mut p = loaded_fixture();
        p.dispatch(&PageEvent::Scroll { offset: 850.0 });
        assert!(p.navigation().scrolled);
        assert_eq!(p.navigation().active_section.as_deref(), Some("about"));
        assert_eq!(active_link_href(&p), Some("#about"));
        assert!((p.parallax().offsets()[0] - 85.0).abs() < 1e-9);
    }

    #[test]
    fn nav_link_closes_menu_and_scrolls() {
        let mut p = loaded_fixture();
        p.dispatch(&PageEvent::ToggleMenu);
        assert!(p.navigation().menu_open);
        let effect = p.dispatch(&PageEvent::NavLink {
            href: "#work".into(),
        });
        assert!(!p.navigation().menu_open);
        assert_eq!(effect, Effect::ScrollTo(1500.0 - 80.0));
    }

    #[test]
    fn filter_runs_through_shared_clock() {
        let mut p = loaded_fixture();
        p.dispatch(&PageEvent::Filter { tag: "web".into() });
        assert_eq!(find_item(&p, "p2").phase, ItemPhase::Leaving);
        p.dispatch(&PageEvent::Advance { ms: 300 });
        assert_eq!(find_item(&p, "p2").phase, ItemPhase::Removed);
        assert_eq!(find_item(&p, "p1").phase, ItemPhase::Visible);
    }

    #[test]
    fn one_intersection_feeds_every_watcher() {
        let mut p = loaded_fixture();
        p.dispatch(&PageEvent::Intersect {
            id: "skill-rust".into(),
            ratio: 0.6,
        });
        assert!(p.revealer().is_revealed("skill-rust"));
        assert!(p.skills().get("skill-rust").unwrap().width.is_some());

        // Enough to reveal, not enough to fill.
        p.dispatch(&PageEvent::Intersect {
            id: "skill-design".into(),
            ratio: 0.2,
        });
        assert!(p.revealer().is_revealed("skill-design"));
        assert!(p.skills().get("skill-design").unwrap().width.is_none());
    }

    #[test]
    fn submit_is_ignored_while_in_flight() {
        let mut p = loaded_fixture();
        let first = p.dispatch(&PageEvent::Submit { respond: None });
        let Effect::Submit(submission) = first else {
            panic!("expected a submission, got {first:?}");
        };
        // Other handlers keep working while the request is out.
        p.dispatch(&PageEvent::Scroll { offset: 200.0 });
        assert!(p.navigation().scrolled);
        assert_eq!(
            p.dispatch(&PageEvent::Submit { respond: None }),
            Effect::None
        );

        p.complete_submission(
            submission,
            &Ok(SubmitResponse {
                status: 200,
                body: None,
            }),
        );
        let contact = p.contact().unwrap();
        assert!(!contact.submit_disabled);
        assert_eq!(contact.status.as_ref().unwrap().kind, StatusKind::Success);
        p.advance(5000);
        assert!(p.contact().unwrap().status.is_none());
    }

    #[tokio::test]
    async fn replay_answers_from_hints() {
        let mut p = loaded_fixture();
        let events = vec![
            PageEvent::Type {
                field: "email".into(),
                value: "ada@example.com".into(),
            },
            PageEvent::Submit {
                respond: Some(ScriptedReply::NetworkError("offline".into())),
            },
        ];
        p.replay(&events, &Responder::scripted()).await;
        let contact = p.contact().unwrap();
        assert_eq!(contact.status.as_ref().unwrap().kind, StatusKind::Error);
        assert_eq!(field_value(contact, "email"), "ada@example.com");
    }

    #[tokio::test]
    async fn replay_applies_scroll_intents() {
        let mut p = loaded_fixture();
        let events = vec![PageEvent::Anchor {
            href: "#contact".into(),
        }];
        p.replay(&events, &Responder::scripted()).await;
        assert_eq!(p.scroll_offset(), 2500.0 - 80.0);
        assert_eq!(p.navigation().active_section.as_deref(), Some("contact"));
    }

    #[test]
    fn konami_through_dispatch() {
        let mut p = loaded_fixture();
        p.dispatch(&PageEvent::Key {
            key: "ArrowUp".into(),
        });
        assert_eq!(p.konami_cursor(), 1);
        p.dispatch(&PageEvent::Key { key: "x".into() });
        assert_eq!(p.konami_cursor(), 0);
        for key in p.config().konami.sequence.clone() {
            p.dispatch(&PageEvent::Key { key });
        }
        assert_eq!(p.konami_cursor(), 0);
        assert!(p.easter_egg().inverted);
        assert_eq!(p.easter_egg().times_triggered, 1);
        p.dispatch(&PageEvent::DismissOverlay);
        assert!(p.easter_egg().overlay.is_none());
    }

    #[test]
    fn typewriter_starts_on_load() {
        let mut p = loaded_fixture();
        let text = p.page().hero.as_ref().unwrap().typewriter.clone().unwrap();
        assert_eq!(p.typewriter().unwrap().shown(), "D");
        assert_eq!(p.now(), 0);
        assert_eq!(p.pending_tasks(), 1);
        p.advance(100 * (text.chars().count() as u64 - 1));
        assert_eq!(p.typewriter().unwrap().shown(), text);
    }

    #[test]
    fn page_without_optional_parts_tolerates_every_event() {
        let mut p = Portfolio::load(Page::default(), InteractionConfig::default());
        let events = [
            PageEvent::ToggleMenu,
            PageEvent::Scroll { offset: 500.0 },
            PageEvent::Filter { tag: "web".into() },
            PageEvent::Intersect {
                id: "x".into(),
                ratio: 1.0,
            },
            PageEvent::Submit { respond: None },
            PageEvent::Anchor { href: "#x".into() },
            PageEvent::Advance { ms: 10_000 },
        ];
        for event in &events {
            assert_eq!(p.dispatch(event), Effect::None);
        }
        assert!(!p.navigation().menu_open);
        assert!(!p.navigation().scrolled);
    }
}
