//! The markup contract: what the interaction layer expects to find on the page.
//!
//! A page is described in TOML rather than parsed from HTML. The description
//! carries exactly the structural roles the handlers touch (toggle, menu,
//! nav links, sections, animatable blocks, gallery, skill cards, deferred
//! images, contact form, hero) plus the layout numbers a browser would
//! normally measure (section tops and heights, viewport height).
//!
//! ```toml
//! viewport_height = 900.0
//!
//! [nav]
//! toggle = true
//! menu = true
//! navbar = true
//! links = [{ href = "#home" }, { href = "#work" }]
//!
//! [[sections]]
//! id = "home"
//! top = 0.0
//! height = 900.0
//!
//! [[blocks]]
//! id = "work-header"
//! role = "section-header"
//!
//! [gallery]
//! filters = [{ tag = "all", active = true }, { tag = "web" }]
//! items = [{ id = "p1", category = "web" }]
//! ```
//!
//! Everything is optional. Handlers whose elements are absent do nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::skills::Progress;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Markup contract violation: {0}")]
    Contract(String),
}

/// Filter tag that matches every gallery item.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Page {
    /// Inner height of the browser window.
    pub viewport_height: f64,
    pub nav: NavMarkup,
    /// Navigable sections in document order.
    pub sections: Vec<Section>,
    /// Animatable blocks other than gallery items and skill cards.
    pub blocks: Vec<Block>,
    pub gallery: GalleryMarkup,
    pub skills: Vec<SkillCard>,
    pub images: Vec<LazyImage>,
    pub contact: Option<ContactForm>,
    pub hero: Option<Hero>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavMarkup {
    /// Whether the hamburger toggle control exists.
    pub toggle: bool,
    /// Whether the collapsible menu container exists.
    pub menu: bool,
    /// Whether the navbar itself exists (target of the "scrolled" style).
    pub navbar: bool,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// In-page target, e.g. `#about`.
    pub href: String,
    #[serde(default)]
    pub label: String,
}

impl NavLink {
    /// Section id this link points at, if it is an in-page link.
    pub fn target_id(&self) -> Option<&str> {
        self.href.strip_prefix('#').filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub id: String,
    /// Offset of the section's top edge from the document top.
    pub top: f64,
    pub height: f64,
}

/// Semantic role of an animatable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SectionHeader,
    PortfolioItem,
    SkillCard,
    AboutContent,
    ContactContent,
    /// Present on the page but not part of the entrance animation set.
    Plain,
}

impl Role {
    /// Roles that get tagged for entrance animation at startup.
    pub fn is_animatable(self) -> bool {
        !matches!(self, Role::Plain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Block {
    pub id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryMarkup {
    pub filters: Vec<FilterControl>,
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterControl {
    pub tag: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryItem {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCard {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Declared fill (`--progress`), e.g. `"85%"`. `None` means the card has
    /// no progress indicator.
    #[serde(default)]
    pub progress: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LazyImage {
    pub id: String,
    #[serde(default)]
    pub src: Option<String>,
    /// Deferred source, copied into `src` on first intersection.
    #[serde(default)]
    pub data_src: Option<String>,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactForm {
    /// Where the form posts to (the form's `action`).
    pub endpoint: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

fn default_submit_label() -> String {
    "Send".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hero {
    /// Number of decorative floating shapes.
    pub shapes: usize,
    /// Text typed out by the typewriter, if any.
    pub typewriter: Option<String>,
}

impl Page {
    /// Parse a page description from TOML and check the markup contract.
    pub fn from_toml_str(content: &str) -> Result<Self, PageError> {
        let page: Page = toml::from_str(content)?;
        page.validate()?;
        Ok(page)
    }

    /// Load and validate a page description file.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check the markup contract.
    ///
    /// Absent elements are fine; contradictory or ambiguous ones are not.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut ids = HashSet::new();
        let all_ids = self
            .blocks
            .iter()
            .map(|b| b.id.as_str())
            .chain(self.gallery.items.iter().map(|i| i.id.as_str()))
            .chain(self.skills.iter().map(|s| s.id.as_str()))
            .chain(self.images.iter().map(|i| i.id.as_str()));
        for id in all_ids {
            if id.is_empty() {
                return Err(PageError::Contract("element id must not be empty".into()));
            }
            if !ids.insert(id) {
                return Err(PageError::Contract(format!("duplicate element id '{id}'")));
            }
        }

        let mut section_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(PageError::Contract(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if section.height < 0.0 {
                return Err(PageError::Contract(format!(
                    "section '{}' has negative height",
                    section.id
                )));
            }
        }

        let active = self.gallery.filters.iter().filter(|f| f.active).count();
        if active > 1 {
            return Err(PageError::Contract(format!(
                "{active} filter controls marked active, expected at most one"
            )));
        }

        for card in &self.skills {
            if let Some(declared) = &card.progress {
                declared.parse::<Progress>().map_err(|e| {
                    PageError::Contract(format!("skill card '{}': {e}", card.id))
                })?;
            }
        }

        if self
            .contact
            .as_ref()
            .is_some_and(|form| form.endpoint.trim().is_empty())
        {
            return Err(PageError::Contract(
                "contact form endpoint must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Index of the filter control that starts out active.
    ///
    /// The control marked active wins; otherwise the `all` control; otherwise
    /// the first control. `None` only when there are no controls.
    pub fn initial_filter(&self) -> Option<usize> {
        let filters = &self.gallery.filters;
        filters
            .iter()
            .position(|f| f.active)
            .or_else(|| filters.iter().position(|f| f.tag == FILTER_ALL))
            .or(if filters.is_empty() { None } else { Some(0) })
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
