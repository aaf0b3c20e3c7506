//! Hidden key-sequence easter egg.
//!
//! A cursor walks the target sequence: a matching key advances it, any other
//! key sends it back to zero. The key that broke the streak is not re-tested
//! against the first symbol. Completing the sequence fires the effect and
//! starts over, so the egg can be found any number of times per visit.

use tracing::info;

#[derive(Debug, Clone)]
pub struct KonamiDetector {
    sequence: Vec<String>,
    cursor: usize,
}

impl KonamiDetector {
    pub fn new(sequence: Vec<String>) -> Self {
        Self {
            sequence,
            cursor: 0,
        }
    }

    /// Feed one key press. Returns `true` when it completed the sequence.
    pub fn press(&mut self, key: &str) -> bool {
        match self.sequence.get(self.cursor) {
            Some(expected) if expected == key => self.cursor += 1,
            _ => {
                self.cursor = 0;
                return false;
            }
        }
        if self.cursor == self.sequence.len() {
            self.cursor = 0;
            return true;
        }
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Visible state of the easter egg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EasterEgg {
    /// Page is turned upside down.
    pub inverted: bool,
    /// Link shown by the overlay while it is open.
    pub overlay: Option<String>,
    pub times_triggered: u32,
}

impl EasterEgg {
    /// Turn the page over and open the overlay. Safe to call repeatedly.
    pub fn trigger(&mut self, link: &str) {
        self.inverted = true;
        self.overlay = Some(link.to_string());
        self.times_triggered += 1;
        info!(times = self.times_triggered, "Easter egg triggered");
    }

    /// Close the overlay and turn the page back.
    pub fn dismiss(&mut self) {
        self.overlay = None;
        self.inverted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KonamiConfig;

    fn detector() -> KonamiDetector {
        KonamiDetector::new(KonamiConfig::default().sequence)
    }

    fn feed(d: &mut KonamiDetector, keys: &[String]) -> u32 {
        keys.iter().filter(|k| d.press(k)).count() as u32
    }

    #[test]
    fn exact_sequence_triggers_once() {
        let mut d = detector();
        let keys = KonamiConfig::default().sequence;
        assert_eq!(feed(&mut d, &keys), 1);
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn any_substitution_resets_without_triggering() {
        let keys = KonamiConfig::default().sequence;
        for pos in 0..keys.len() {
            let mut d = detector();
            let mut broken = keys.clone();
            broken[pos] = "x".to_string();
            assert_eq!(feed(&mut d, &broken[..=pos]), 0);
            assert_eq!(d.cursor(), 0, "substitution at {pos}");
            assert_eq!(feed(&mut d, &broken), 0);
        }
    }

    #[test]
    fn mismatch_does_not_retest_first_symbol() {
        let mut d = detector();
        d.press("ArrowUp");
        d.press("ArrowUp");
        // Third ArrowUp breaks the streak and does not count as a fresh start.
        d.press("ArrowUp");
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn sequence_can_be_entered_again() {
        let mut d = detector();
        let mut keys = KonamiConfig::default().sequence;
        keys.extend(KonamiConfig::default().sequence);
        assert_eq!(feed(&mut d, &keys), 2);
    }

    #[test]
    fn egg_trigger_and_dismiss() {
        let mut egg = EasterEgg::default();
        egg.trigger("https://example.com");
        egg.trigger("https://example.com");
        assert!(egg.inverted);
        assert_eq!(egg.times_triggered, 2);
        egg.dismiss();
        assert!(!egg.inverted);
        assert_eq!(egg.overlay, None);
    }
}
