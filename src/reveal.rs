//! Entrance animations driven by viewport intersection.
//!
//! At startup every element with an animatable role is tagged and starts
//! hidden. The first intersection event whose visible fraction reaches the
//! threshold reveals it. Revealing is one-way: [`reveal`] never maps
//! `Revealed` back to `Hidden`, whatever the event says.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RevealConfig;
use crate::page::{Page, Role};

/// One observation of an element's visible fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Visible fraction of the element, `0.0..=1.0`.
    pub ratio: f64,
}

impl Intersection {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    /// Whether this observation counts as crossing `threshold`.
    ///
    /// A zero threshold still needs some part of the element on screen.
    pub fn crosses(&self, threshold: f64) -> bool {
        self.ratio > 0.0 && self.ratio >= threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Pure reveal transition.
pub fn reveal(state: RevealState, event: Intersection, threshold: f64) -> RevealState {
    match state {
        RevealState::Revealed => RevealState::Revealed,
        RevealState::Hidden if event.crosses(threshold) => RevealState::Revealed,
        RevealState::Hidden => RevealState::Hidden,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animatable {
    pub id: String,
    pub role: Role,
    pub state: RevealState,
    /// Transition delay in seconds, for staggered roles.
    pub delay: Option<f64>,
    pub observed: bool,
}

/// Registry of every element tagged for entrance animation, in document order.
#[derive(Debug, Clone, Default)]
pub struct Revealer {
    elements: Vec<Animatable>,
    threshold: f64,
    unobserve_after_reveal: bool,
}

impl Revealer {
    /// Tag every animatable element on the page and start observing it.
    ///
    /// Gallery items and skill cards get a per-kind staggered delay of
    /// `index × stagger_step` seconds.
    pub fn setup(page: &Page, config: &RevealConfig) -> Self {
        let mut elements: Vec<Animatable> = page
            .blocks
            .iter()
            .filter(|b| b.role.is_animatable())
            .map(|b| Animatable {
                id: b.id.clone(),
                role: b.role,
                state: RevealState::Hidden,
                delay: None,
                observed: true,
            })
            .collect();

        let staggered = |index: usize| Some(index as f64 * config.stagger_step);
        elements.extend(page.gallery.items.iter().enumerate().map(|(i, item)| {
            Animatable {
                id: item.id.clone(),
                role: Role::PortfolioItem,
                state: RevealState::Hidden,
                delay: staggered(i),
                observed: true,
            }
        }));
        elements.extend(page.skills.iter().enumerate().map(|(i, card)| Animatable {
            id: card.id.clone(),
            role: Role::SkillCard,
            state: RevealState::Hidden,
            delay: staggered(i),
            observed: true,
        }));

        debug!(count = elements.len(), "Tagged animatable elements");
        Self {
            elements,
            threshold: config.threshold,
            unobserve_after_reveal: config.unobserve_after_reveal,
        }
    }

    /// Feed an intersection event. Unknown or unobserved ids are ignored.
    ///
    /// Returns `true` when this event revealed the element.
    pub fn observe(&mut self, id: &str, event: Intersection) -> bool {
        let Some(el) = self
            .elements
            .iter_mut()
            .find(|e| e.id == id && e.observed)
        else {
            return false;
        };
        let before = el.state;
        el.state = reveal(before, event, self.threshold);
        let revealed = before == RevealState::Hidden && el.state == RevealState::Revealed;
        if revealed {
            debug!(id, ratio = event.ratio, "Revealed");
            if self.unobserve_after_reveal {
                el.observed = false;
            }
        }
        revealed
    }

    pub fn get(&self, id: &str) -> Option<&Animatable> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|e| e.state == RevealState::Revealed)
    }

    pub fn elements(&self) -> &[Animatable] {
        &self.elements
    }

    pub fn revealed_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.state == RevealState::Revealed)
            .count()
    }
}
