//! Navigation bar state: mobile menu, scrolled style, active section link,
//! and smooth scrolling to in-page anchors.
//!
//! ## Active section rule
//!
//! A section claims the active link when the scroll offset falls inside
//! `(top - lookahead, top - lookahead + height]`. Sections are evaluated in
//! document order and the last match wins, so overlapping ranges resolve to
//! the later section rather than lighting up two links.
//!
//! ## Anchor targets
//!
//! Only sections carry a vertical position in the page description, so
//! [`resolve_anchor`] can only scroll to a section. A fragment naming any
//! other element (a block, the contact form) is prevented without scrolling.

use tracing::debug;

use crate::config::NavigationConfig;
use crate::page::{NavMarkup, Section};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    /// Mobile menu open. Mirrored on both the toggle control and the menu.
    pub menu_open: bool,
    /// Navbar carries its "scrolled" style.
    pub scrolled: bool,
    /// Section currently claiming the active link.
    pub active_section: Option<String>,
    /// Index into the nav links of the link marked active.
    pub active_link: Option<usize>,
}

impl NavState {
    /// Flip the menu. No-op when the page has no toggle control.
    pub fn toggle_menu(&mut self, markup: &NavMarkup) {
        if !markup.toggle {
            return;
        }
        self.menu_open = !self.menu_open;
        debug!(open = self.menu_open, "Menu toggled");
    }

    /// Following any nav link closes the menu.
    pub fn link_activated(&mut self) {
        if self.menu_open {
            debug!("Menu closed by link");
        }
        self.menu_open = false;
    }

    /// Recompute scrolled style and active link for a scroll offset.
    pub fn on_scroll(
        &mut self,
        offset: f64,
        markup: &NavMarkup,
        sections: &[Section],
        config: &NavigationConfig,
    ) {
        self.scrolled = markup.navbar && offset > config.scroll_threshold;

        let active = active_section(offset, sections, config.section_lookahead);
        let active_id = active.map(|s| s.id.clone());
        if active_id != self.active_section {
            debug!(section = ?active_id, offset, "Active section changed");
        }
        self.active_link = active_id.as_deref().and_then(|id| {
            markup
                .links
                .iter()
                .position(|l| l.target_id() == Some(id))
        });
        self.active_section = active_id;
    }
}

/// Whether `offset` lies in the section's activation range.
pub fn section_contains(section: &Section, offset: f64, lookahead: f64) -> bool {
    let start = section.top - lookahead;
    offset > start && offset <= start + section.height
}

/// Section claiming the active link at `offset`; the last match in document
/// order wins.
pub fn active_section(offset: f64, sections: &[Section], lookahead: f64) -> Option<&Section> {
    sections
        .iter()
        .rev()
        .find(|s| section_contains(s, offset, lookahead))
}

/// What an in-page anchor click turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorOutcome {
    /// Bare `#` or a non-fragment href: let the browser handle it.
    PassThrough,
    /// Default navigation suppressed but there is nowhere to go.
    Prevented,
    /// Default navigation suppressed; smooth-scroll to this offset.
    ScrollTo(f64),
}

/// Resolve an anchor click to a smooth-scroll target, landing `nav_height`
/// above the section so the fixed navbar does not cover it.
pub fn resolve_anchor(href: &str, sections: &[Section], nav_height: f64) -> AnchorOutcome {
    let Some(id) = href.strip_prefix('#') else {
        return AnchorOutcome::PassThrough;
    };
    if id.is_empty() {
        return AnchorOutcome::PassThrough;
    }
    match sections.iter().find(|s| s.id == id) {
        Some(section) => AnchorOutcome::ScrollTo(section.top - nav_height),
        None => AnchorOutcome::Prevented,
    }
}
