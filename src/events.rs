//! Browser events as data.
//!
//! A replay script is a JSON array of [`PageEvent`]s:
//!
//! ```json
//! [
//!   { "scroll": { "offset": 750.0 } },
//!   "toggle_menu",
//!   { "filter": { "tag": "web" } },
//!   { "advance": { "ms": 300 } },
//!   { "intersect": { "id": "rust", "ratio": 0.6 } },
//!   { "type": { "field": "email", "value": "ada@example.com" } },
//!   { "submit": { "respond": { "status": 200 } } },
//!   { "key": { "key": "ArrowUp" } }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::transport::ScriptedReply;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEvent {
    /// Window scrolled to `offset`.
    Scroll { offset: f64 },
    /// Hamburger toggle clicked.
    ToggleMenu,
    /// A navigation link clicked.
    NavLink { href: String },
    /// Any other in-page anchor clicked.
    Anchor { href: String },
    /// A gallery filter control clicked.
    Filter { tag: String },
    /// The viewport watcher reports an element's visible fraction.
    Intersect { id: String, ratio: f64 },
    /// Key pressed anywhere on the page.
    Key { key: String },
    /// Visitor typed into a contact form field.
    Type { field: String, value: String },
    /// Contact form submitted. `respond` tells a scripted transport how to answer.
    Submit {
        #[serde(default)]
        respond: Option<ScriptedReply>,
    },
    /// Easter-egg overlay closed.
    DismissOverlay,
    /// Let virtual time pass.
    Advance { ms: u64 },
}

/// Parse a replay script.
pub fn parse_script(json: &str) -> Result<Vec<PageEvent>, EventsError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a replay script from disk.
pub fn load_script(path: &Path) -> Result<Vec<PageEvent>, EventsError> {
    let content = fs::read_to_string(path)?;
    parse_script(&content)
}
