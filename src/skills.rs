//! Skill-bar fill animation.
//!
//! Each skill card declares a target fill (`--progress: 85%`). When half of
//! the card is visible the declared value is copied onto the indicator's
//! width once; the stylesheet's width transition does the animating.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::page::SkillCard;
use crate::reveal::Intersection;

/// A fill percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    pub fn percent(self) -> f64 {
        self.0
    }
}

impl FromStr for Progress {
    type Err = String;

    /// Accepts `"85%"`, `"85"` and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid progress '{s}', expected a percentage like 85%"))?;
        if !(0.0..=100.0).contains(&value) {
            return Err(format!("progress '{s}' must be between 0% and 100%"));
        }
        Ok(Progress(value))
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillBar {
    pub card_id: String,
    pub name: String,
    /// Declared target. `None` when the card has no indicator.
    pub target: Option<Progress>,
    /// Width currently rendered on the indicator.
    pub width: Option<Progress>,
    /// How many times the width has been written.
    pub applications: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SkillBars {
    bars: Vec<SkillBar>,
    threshold: f64,
}

impl SkillBars {
    pub fn setup(cards: &[SkillCard], threshold: f64) -> Self {
        let bars = cards
            .iter()
            .map(|card| SkillBar {
                card_id: card.id.clone(),
                name: card.name.clone(),
                // Page::validate rejects malformed values; anything left unparsable is treated as absent.
                target: card.progress.as_deref().and_then(|p| p.parse().ok()),
                width: None,
                applications: 0,
            })
            .collect();
        Self { bars, threshold }
    }

    /// Feed an intersection for a card. Returns `true` if the bar filled.
    pub fn observe(&mut self, card_id: &str, event: Intersection) -> bool {
        if !event.crosses(self.threshold) {
            return false;
        }
        let Some(bar) = self.bars.iter_mut().find(|b| b.card_id == card_id) else {
            return false;
        };
        if bar.width.is_some() {
            return false;
        }
        let Some(target) = bar.target else {
            return false;
        };
        bar.width = Some(target);
        bar.applications += 1;
        debug!(card = card_id, %target, "Skill bar filled");
        true
    }

    pub fn bars(&self) -> &[SkillBar] {
        &self.bars
    }

    pub fn get(&self, card_id: &str) -> Option<&SkillBar> {
        self.bars.iter().find(|b| b.card_id == card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, progress: Option<&str>) -> SkillCard {
        SkillCard {
            id: id.into(),
            name: id.to_uppercase(),
            progress: progress.map(String::from),
        }
    }

    #[test]
    fn progress_parsing() {
        assert_eq!("85%".parse::<Progress>().unwrap().percent(), 85.0);
        assert_eq!(" 42.5 % ".parse::<Progress>().unwrap().percent(), 42.5);
        assert_eq!("0".parse::<Progress>().unwrap().percent(), 0.0);
        assert!("101%".parse::<Progress>().is_err());
        assert!("-1%".parse::<Progress>().is_err());
        assert!("wide".parse::<Progress>().is_err());
        assert_eq!("90%".parse::<Progress>().unwrap().to_string(), "90%");
    }

    #[test]
    fn fills_to_declared_value_at_half_visibility() {
        let mut bars = SkillBars::setup(&[card("rust", Some("90%"))], 0.5);
        assert!(!bars.observe("rust", Intersection::new(0.49)));
        assert_eq!(bars.get("rust").unwrap().width, None);
        assert!(bars.observe("rust", Intersection::new(0.5)));
        assert_eq!(bars.get("rust").unwrap().width.unwrap().percent(), 90.0);
    }

    #[test]
    fn fill_is_applied_at_most_once() {
        let mut bars = SkillBars::setup(&[card("rust", Some("90%"))], 0.5);
        for _ in 0..5 {
            bars.observe("rust", Intersection::new(1.0));
            bars.observe("rust", Intersection::new(0.0));
        }
        let bar = bars.get("rust").unwrap();
        assert_eq!(bar.applications, 1);
        assert_eq!(bar.width, bar.target);
    }

    #[test]
    fn card_without_indicator_is_noop() {
        let mut bars = SkillBars::setup(&[card("soft", None)], 0.5);
        assert!(!bars.observe("soft", Intersection::new(1.0)));
        assert_eq!(bars.get("soft").unwrap().applications, 0);
        assert!(!bars.observe("missing", Intersection::new(1.0)));
    }
}
