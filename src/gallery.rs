//! Project gallery filter.
//!
//! Selecting a filter control makes it the only active control and walks
//! every gallery item through a two-phase transition:
//!
//! ```text
//! matching:      Removed/Leaving ──enter──▶ Entering ──(10ms) show──▶ Visible
//! non-matching:  Visible/Entering ──leave──▶ Leaving ──(300ms) remove──▶ Removed
//! ```
//!
//! The exit is split in two because dropping an item from layout at once
//! would skip its fade. The settle delay must cover the declared exit
//! transition; [`crate::config`] validates that.
//!
//! Pending steps are not cancelled by a newer selection. Switching filters
//! faster than the settle delay can let a stale `remove` hide an item the
//! newer filter matches.

use tracing::debug;

use crate::config::GalleryConfig;
use crate::page::{FILTER_ALL, GalleryMarkup};
use crate::scheduler::Scheduler;

/// Lifecycle of one gallery item's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    /// Displayed, waiting to fade in.
    Entering,
    /// Displayed at full opacity, no offset.
    Visible,
    /// Still displayed, fading out with an offset.
    Leaving,
    /// Out of layout (`display: none`).
    Removed,
}

impl ItemPhase {
    /// `display: block` was applied.
    pub fn enter(self) -> Self {
        match self {
            ItemPhase::Visible => ItemPhase::Visible,
            _ => ItemPhase::Entering,
        }
    }

    /// Opacity 1 and zero offset were applied.
    pub fn show(self) -> Self {
        match self {
            ItemPhase::Removed => ItemPhase::Removed,
            _ => ItemPhase::Visible,
        }
    }

    /// Opacity 0 and the exit offset were applied.
    pub fn leave(self) -> Self {
        match self {
            ItemPhase::Removed => ItemPhase::Removed,
            _ => ItemPhase::Leaving,
        }
    }

    /// `display: none` was applied.
    pub fn remove(self) -> Self {
        ItemPhase::Removed
    }

    /// Takes up space in the layout.
    pub fn is_displayed(self) -> bool {
        self != ItemPhase::Removed
    }
}

/// Delayed gallery step, run by the owner's scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryTask {
    Show(usize),
    Remove(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub category: String,
    pub phase: ItemPhase,
    /// Inline `(opacity, offset)` last written by a transition step.
    ///
    /// Entering leaves it alone, so an item coming back keeps its exit
    /// styles until the show step lands.
    pub applied: Option<(f64, f64)>,
}

impl ItemView {
    /// Inline opacity and vertical offset currently applied, if any.
    pub fn style(&self) -> Option<(f64, f64)> {
        self.applied
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryFilter {
    controls: Vec<String>,
    active: Option<usize>,
    items: Vec<ItemView>,
}

/// Whether an item with `category` is shown under `selection`.
pub fn matches(selection: &str, category: &str) -> bool {
    selection == FILTER_ALL || category == selection
}

impl GalleryFilter {
    /// Every item starts visible; the initially active control is resolved
    /// by the caller from the markup.
    pub fn setup(markup: &GalleryMarkup, initial: Option<usize>) -> Self {
        Self {
            controls: markup.filters.iter().map(|f| f.tag.clone()).collect(),
            active: initial,
            items: markup
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id.clone(),
                    category: item.category.clone(),
                    phase: ItemPhase::Visible,
                    applied: None,
                })
                .collect(),
        }
    }

    /// Select the control tagged `tag`. Unknown tags are ignored.
    ///
    /// Returns `false` when no control carries the tag.
    pub fn select<T: From<GalleryTask>>(
        &mut self,
        tag: &str,
        config: &GalleryConfig,
        scheduler: &mut Scheduler<T>,
    ) -> bool {
        let Some(index) = self.controls.iter().position(|c| c == tag) else {
            debug!(tag, "No filter control for tag");
            return false;
        };
        self.active = Some(index);
        debug!(tag, "Filter selected");

        for (i, item) in self.items.iter_mut().enumerate() {
            if matches(tag, &item.category) {
                item.phase = item.phase.enter();
                scheduler.schedule(config.enter_delay_ms, GalleryTask::Show(i).into());
            } else {
                item.phase = item.phase.leave();
                item.applied = Some((0.0, config.exit_offset));
                scheduler.schedule(config.settle_delay_ms, GalleryTask::Remove(i).into());
            }
        }
        true
    }

    /// Apply a delayed step that has come due.
    pub fn run(&mut self, task: GalleryTask) {
        match task {
            GalleryTask::Show(i) => {
                if let Some(item) = self.items.get_mut(i) {
                    item.phase = item.phase.show();
                    item.applied = Some((1.0, 0.0));
                }
            }
            GalleryTask::Remove(i) => {
                if let Some(item) = self.items.get_mut(i) {
                    item.phase = item.phase.remove();
                }
            }
        }
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.controls.get(i))
            .map(String::as_str)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ItemView> {
        self.items.iter().find(|i| i.id == id)
    }
}
