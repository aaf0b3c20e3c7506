//! Shared test utilities for the vitrine test suite.
//!
//! Provides the fixture page, a portfolio loaded from it, and lookup helpers
//! that panic with the available choices when something is missing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let mut p = loaded_fixture();
//! p.dispatch(&PageEvent::Filter { tag: "web".into() });
//! assert_eq!(find_item(&p, "p2").phase, ItemPhase::Leaving);
//! ```

use std::path::Path;

use crate::app::Portfolio;
use crate::config::InteractionConfig;
use crate::contact::ContactState;
use crate::gallery::ItemView;
use crate::page::Page;

// =========================================================================
// Fixture setup
// =========================================================================

/// Parse `fixtures/page.toml`.
pub fn fixture_page() -> Page {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/page.toml");
    Page::load(&path).unwrap_or_else(|e| panic!("fixture page failed to load: {e}"))
}

/// The fixture page loaded with stock config.
pub fn loaded_fixture() -> Portfolio {
    Portfolio::load(fixture_page(), InteractionConfig::default())
}

// =========================================================================
// Lookups, panic with a clear message on miss
// =========================================================================

/// Find a gallery item by id. Panics if not found.
pub fn find_item<'a>(p: &'a Portfolio, id: &str) -> &'a ItemView {
    p.gallery().item(id).unwrap_or_else(|| {
        let ids: Vec<&str> = p.gallery().items().iter().map(|i| i.id.as_str()).collect();
        panic!("gallery item '{id}' not found. Available: {ids:?}")
    })
}

/// Href of the nav link currently marked active.
pub fn active_link_href(p: &Portfolio) -> Option<&str> {
    p.navigation()
        .active_link
        .map(|i| p.page().nav.links[i].href.as_str())
}

/// Current value of a contact form field. Panics if not found.
pub fn field_value<'a>(contact: &'a ContactState, name: &str) -> &'a str {
    contact
        .fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| {
            let names: Vec<&str> = contact.fields.iter().map(|(n, _)| n.as_str()).collect();
            panic!("form field '{name}' not found. Available: {names:?}")
        })
}
