//! Hero decorations: scroll parallax on the floating shapes and a
//! typewriter for the tagline.

use crate::config::EffectsConfig;
use crate::page::Hero;
use crate::scheduler::Scheduler;

/// Vertical parallax offsets of the hero's floating shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parallax {
    offsets: Vec<f64>,
}

impl Parallax {
    pub fn setup(hero: Option<&Hero>) -> Self {
        Self {
            offsets: vec![0.0; hero.map_or(0, |h| h.shapes)],
        }
    }

    /// Shape `i` moves by `offset × (i + 1) × step` while the hero is still
    /// within the first viewport; past it the shapes keep their last offset.
    pub fn on_scroll(&mut self, offset: f64, viewport_height: f64, config: &EffectsConfig) {
        if offset >= viewport_height {
            return;
        }
        for (i, shape) in self.offsets.iter_mut().enumerate() {
            *shape = offset * (i + 1) as f64 * config.parallax_step;
        }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }
}

/// Tick for the typewriter, run by the owner's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTick;

/// Types `text` one character per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typewriter {
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Clear the element and type the first character straight away; the
    /// rest follow one tick apart.
    pub fn start<T: From<TypeTick>>(
        text: &str,
        config: &EffectsConfig,
        scheduler: &mut Scheduler<T>,
    ) -> Self {
        let mut typewriter = Self {
            text: text.chars().collect(),
            typed: 0,
        };
        typewriter.tick(config, scheduler);
        typewriter
    }

    /// Type one character and schedule the next one if any remain.
    pub fn tick<T: From<TypeTick>>(
        &mut self,
        config: &EffectsConfig,
        scheduler: &mut Scheduler<T>,
    ) {
        if self.typed < self.text.len() {
            self.typed += 1;
            if self.typed < self.text.len() {
                scheduler.schedule(config.typewriter_delay_ms, TypeTick.into());
            }
        }
    }

    /// Text shown so far.
    pub fn shown(&self) -> String {
        self.text[..self.typed].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.typed == self.text.len()
    }
}
