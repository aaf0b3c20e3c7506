//! Interaction configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Every timing,
//! threshold and message the interaction layer uses lives here; stock
//! defaults are overridden by whatever keys the user file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [navigation]
//! scroll_threshold = 100.0  # Offset past which the navbar is "scrolled"
//! section_lookahead = 100.0 # Sections activate this far before their top
//! nav_height = 80.0         # Anchor scrolling lands this far above the target
//!
//! [reveal]
//! threshold = 0.1           # Visible fraction that reveals an element
//! stagger_step = 0.1        # Seconds of delay added per gallery item / skill card
//! unobserve_after_reveal = false
//!
//! [gallery]
//! enter_delay_ms = 10       # display -> fade-in gap
//! settle_delay_ms = 300     # fade-out -> display:none gap
//! exit_transition_ms = 300  # Declared CSS exit transition
//! exit_offset = 20.0        # translateY applied while leaving
//!
//! [contact]
//! busy_label = "Sending..."
//! success_message = "Thanks! Your message has been sent."
//! error_message = "Something went wrong. Please try again."
//! status_clear_ms = 5000
//!
//! [skills]
//! threshold = 0.5
//!
//! [lazy]
//! threshold = 0.0
//!
//! [effects]
//! parallax_step = 0.1
//! typewriter_delay_ms = 100
//!
//! [konami]
//! sequence = ["ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft",
//!             "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a"]
//! overlay_link = "https://en.wikipedia.org/wiki/Konami_Code"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Interaction configuration loaded from `config.toml`.
///
/// All fields have defaults matching the stock site behavior. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub gallery: GalleryConfig,
    pub contact: ContactConfig,
    pub skills: SkillsConfig,
    pub lazy: LazyConfig,
    pub effects: EffectsConfig,
    pub konami: KonamiConfig,
}

impl InteractionConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("reveal.threshold", self.reveal.threshold),
            ("skills.threshold", self.skills.threshold),
            ("lazy.threshold", self.lazy.threshold),
        ];
        for (key, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!("{key} must be 0.0-1.0")));
            }
        }
        if self.gallery.settle_delay_ms < self.gallery.exit_transition_ms {
            return Err(ConfigError::Validation(
                "gallery.settle_delay_ms must be >= gallery.exit_transition_ms".into(),
            ));
        }
        if self.konami.sequence.is_empty() {
            return Err(ConfigError::Validation(
                "konami.sequence must not be empty".into(),
            ));
        }
        if self.navigation.scroll_threshold < 0.0 || self.navigation.nav_height < 0.0 {
            return Err(ConfigError::Validation(
                "navigation offsets must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Scroll offset past which the navbar gets its "scrolled" style.
    pub scroll_threshold: f64,
    /// How far before its top a section starts claiming the active link.
    pub section_lookahead: f64,
    /// Height of the fixed navbar; anchor scrolling stops this far above the target.
    pub nav_height: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 100.0,
            section_lookahead: 100.0,
            nav_height: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Visible fraction at which an animatable element is revealed.
    pub threshold: f64,
    /// Seconds of transition delay per index for gallery items and skill cards.
    pub stagger_step: f64,
    /// Stop watching an element once it has been revealed.
    pub unobserve_after_reveal: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            stagger_step: 0.1,
            unobserve_after_reveal: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Delay between making a matching item displayable and fading it in.
    pub enter_delay_ms: u64,
    /// Delay between starting the exit fade and removing the item from layout.
    pub settle_delay_ms: u64,
    /// Duration of the exit transition declared in the stylesheet.
    pub exit_transition_ms: u64,
    /// Vertical offset applied to leaving items.
    pub exit_offset: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            settle_delay_ms: 300,
            exit_transition_ms: 300,
            exit_offset: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Submit control label while a submission is in flight.
    pub busy_label: String,
    pub success_message: String,
    pub error_message: String,
    /// Delay after which the status region is emptied again.
    pub status_clear_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            busy_label: "Sending...".to_string(),
            success_message: "Thanks! Your message has been sent.".to_string(),
            error_message: "Something went wrong. Please try again.".to_string(),
            status_clear_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillsConfig {
    pub threshold: f64,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyConfig {
    /// Zero means any positive visible fraction loads the image.
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Parallax speed added per floating shape.
    pub parallax_step: f64,
    /// Delay between typed characters.
    pub typewriter_delay_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            parallax_step: 0.1,
            typewriter_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KonamiConfig {
    /// Key names in the order they must be pressed.
    pub sequence: Vec<String>,
    /// Link shown in the easter-egg overlay.
    pub overlay_link: String,
}

impl Default for KonamiConfig {
    fn default() -> Self {
        Self {
            sequence: [
                "ArrowUp",
                "ArrowUp",
                "ArrowDown",
                "ArrowDown",
                "ArrowLeft",
                "ArrowRight",
                "ArrowLeft",
                "ArrowRight",
                "b",
                "a",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            overlay_link: "https://en.wikipedia.org/wiki/Konami_Code".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(InteractionConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<InteractionConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: InteractionConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `config.toml` path.
///
/// A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<InteractionConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Interaction Configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Delays are in milliseconds, offsets in CSS pixels.

# ---------------------------------------------------------------------------
# Navigation bar and section tracking
# ---------------------------------------------------------------------------
[navigation]
# Scroll offset past which the navbar switches to its "scrolled" style.
scroll_threshold = 100.0

# A section claims the active nav link this far before its top edge.
section_lookahead = 100.0

# Height of the fixed navbar. In-page anchors scroll to target top minus this.
nav_height = 80.0

# ---------------------------------------------------------------------------
# Entrance animations
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it is revealed.
threshold = 0.1

# Seconds of transition delay added per gallery item and per skill card,
# so they cascade in document order.
stagger_step = 0.1

# Stop observing elements once revealed. Revealed is one-way either way.
unobserve_after_reveal = false

# ---------------------------------------------------------------------------
# Project gallery filter
# ---------------------------------------------------------------------------
[gallery]
# Gap between making a matching item displayable and fading it in.
enter_delay_ms = 10

# Gap between starting the exit fade and removing the item from layout.
# Must be at least exit_transition_ms or the fade is cut short.
settle_delay_ms = 300

# Exit transition duration declared in the stylesheet.
exit_transition_ms = 300

# Vertical offset applied to items while they fade out.
exit_offset = 20.0

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
busy_label = "Sending..."
success_message = "Thanks! Your message has been sent."
error_message = "Something went wrong. Please try again."

# The status message is cleared this long after a submission finishes.
status_clear_ms = 5000

# ---------------------------------------------------------------------------
# Skill bars
# ---------------------------------------------------------------------------
[skills]
# Fraction of a skill card that must be visible before its bar fills.
threshold = 0.5

# ---------------------------------------------------------------------------
# Lazy images
# ---------------------------------------------------------------------------
[lazy]
# 0.0 loads an image as soon as any part of it is visible.
threshold = 0.0

# ---------------------------------------------------------------------------
# Hero effects
# ---------------------------------------------------------------------------
[effects]
# Parallax speed per floating shape: shape i moves at (i + 1) * step.
parallax_step = 0.1

# Delay between characters of the hero typewriter.
typewriter_delay_ms = 100

# ---------------------------------------------------------------------------
# Easter egg
# ---------------------------------------------------------------------------
[konami]
sequence = ["ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight", "b", "a"]
overlay_link = "https://en.wikipedia.org/wiki/Konami_Code"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_stock_behavior() {
        let config = InteractionConfig::default();
        assert_eq!(config.navigation.scroll_threshold, 100.0);
        assert_eq!(config.navigation.nav_height, 80.0);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.gallery.enter_delay_ms, 10);
        assert_eq!(config.gallery.settle_delay_ms, 300);
        assert_eq!(config.contact.status_clear_ms, 5000);
        assert_eq!(config.skills.threshold, 0.5);
        assert_eq!(config.konami.sequence.len(), 10);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
settle_delay_ms = 450
"#;
        let config: InteractionConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gallery.settle_delay_ms, 450);
        // Defaults preserved
        assert_eq!(config.gallery.enter_delay_ms, 10);
        assert_eq!(config.contact.busy_label, "Sending...");
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[gallery]
setle_delay_ms = 450
"#;
        assert!(toml::from_str::<InteractionConfig>(toml).is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: InteractionConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = InteractionConfig::default();
        assert_eq!(config.konami.sequence, defaults.konami.sequence);
        assert_eq!(config.contact.error_message, defaults.contact.error_message);
        assert_eq!(config.effects.typewriter_delay_ms, 100);
        config.validate().unwrap();
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn settle_delay_shorter_than_exit_transition_rejected() {
        let mut config = InteractionConfig::default();
        config.gallery.settle_delay_ms = 200;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("settle_delay_ms"));
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut config = InteractionConfig::default();
        config.skills.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_konami_sequence_rejected() {
        let mut config = InteractionConfig::default();
        config.konami.sequence.clear();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // merge_toml / load_config
    // =========================================================================

    #[test]
    fn merge_overlay_wins_and_base_keys_survive() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.gallery.settle_delay_ms, 300);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[contact]
success_message = "Got it"

[navigation]
nav_height = 64.0
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.contact.success_message, "Got it");
        assert_eq!(config.navigation.nav_height, 64.0);
        // Unspecified values should be defaults
        assert_eq!(config.contact.busy_label, "Sending...");
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[reveal]\nthreshold = 2.0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_config_rejects_malformed_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[reveal\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }
}
