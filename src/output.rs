//! CLI output formatting for `check` and `replay`.
//!
//! # Information-First Display
//!
//! Every entity leads with its positional index and its identity (id, title,
//! label); details such as offsets, categories and pending sources follow on
//! the same line or as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 home (top 0, height 900)
//! 002 about (top 900, height 600)
//!
//! Navigation
//! 001 Home → #home
//!
//! Gallery
//!     Filters: all*, web, design, photo
//! 001 Storefront [web]
//!
//! Skills
//! 001 Rust 90%
//! 002 Soft skills (no bar)
//!
//! Images
//! 001 img-portrait → portrait.avif
//!
//! Contact
//!     POST https://forms.example.com/f/portfolio
//!     Fields: name, email, message
//! ```
//!
//! ## Snapshot
//!
//! ```text
//! Time: 300ms (1 pending)
//! Scroll: 950
//! Navigation
//!     Menu: closed
//!     Navbar: scrolled
//!     Active: about (#about)
//! Reveal: 3/9 revealed
//! Gallery: web
//!     001 p1 [web] visible
//!     002 p2 [design] removed
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::app::Portfolio;
use crate::contact::StatusKind;
use crate::gallery::ItemPhase;
use crate::page::Page;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn phase_label(phase: ItemPhase) -> &'static str {
    match phase {
        ItemPhase::Entering => "entering",
        ItemPhase::Visible => "visible",
        ItemPhase::Leaving => "leaving",
        ItemPhase::Removed => "removed",
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the inventory of a validated page.
pub fn format_check(page: &Page) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Sections".to_string());
    for (i, s) in page.sections.iter().enumerate() {
        lines.push(format!(
            "{} {} (top {}, height {})",
            format_index(i + 1),
            s.id,
            s.top,
            s.height
        ));
    }

    if !page.nav.links.is_empty() {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        for (i, link) in page.nav.links.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                link.label,
                link.href
            ));
        }
        let missing: Vec<&str> = ["toggle", "menu", "navbar"]
            .into_iter()
            .zip([page.nav.toggle, page.nav.menu, page.nav.navbar])
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            lines.push(format!("{}Absent: {}", indent(1), missing.join(", ")));
        }
    }

    let animatable = page.blocks.iter().filter(|b| b.role.is_animatable()).count()
        + page.gallery.items.len()
        + page.skills.len();
    lines.push(String::new());
    lines.push(format!("Reveal: {} animatable", animatable));

    if !page.gallery.filters.is_empty() || !page.gallery.items.is_empty() {
        lines.push(String::new());
        lines.push("Gallery".to_string());
        let initial = page.initial_filter();
        let filters: Vec<String> = page
            .gallery
            .filters
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if Some(i) == initial {
                    format!("{}*", f.tag)
                } else {
                    f.tag.clone()
                }
            })
            .collect();
        lines.push(format!("{}Filters: {}", indent(1), filters.join(", ")));
        for (i, item) in page.gallery.items.iter().enumerate() {
            lines.push(format!(
                "{} {} [{}]",
                format_index(i + 1),
                item.title,
                item.category
            ));
        }
    }

    if !page.skills.is_empty() {
        lines.push(String::new());
        lines.push("Skills".to_string());
        for (i, card) in page.skills.iter().enumerate() {
            let progress = card.progress.as_deref().unwrap_or("(no bar)");
            lines.push(format!("{} {} {}", format_index(i + 1), card.name, progress));
        }
    }

    if !page.images.is_empty() {
        lines.push(String::new());
        lines.push("Images".to_string());
        for (i, img) in page.images.iter().enumerate() {
            match &img.data_src {
                Some(deferred) => lines.push(format!(
                    "{} {} \u{2192} {}",
                    format_index(i + 1),
                    img.id,
                    deferred
                )),
                None => lines.push(format!("{} {}", format_index(i + 1), img.id)),
            }
        }
    }

    if let Some(form) = &page.contact {
        lines.push(String::new());
        lines.push("Contact".to_string());
        lines.push(format!("{}POST {}", indent(1), form.endpoint));
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        lines.push(format!("{}Fields: {}", indent(1), names.join(", ")));
    }

    if let Some(hero) = &page.hero {
        lines.push(String::new());
        lines.push("Hero".to_string());
        lines.push(format!("{}Shapes: {}", indent(1), hero.shapes));
        if let Some(text) = &hero.typewriter {
            lines.push(format!("{}Typewriter: {}", indent(1), truncate_desc(text, 40)));
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check(page: &Page) {
    for line in format_check(page) {
        println!("{}", line);
    }
}

// ============================================================================
// Snapshot output
// ============================================================================

/// Format the current view state of a portfolio.
pub fn format_snapshot(p: &Portfolio) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Time: {}ms ({} pending)", p.now(), p.pending_tasks()));
    lines.push(format!("Scroll: {}", p.scroll_offset()));

    let nav = p.navigation();
    lines.push("Navigation".to_string());
    lines.push(format!(
        "{}Menu: {}",
        indent(1),
        if nav.menu_open { "open" } else { "closed" }
    ));
    lines.push(format!(
        "{}Navbar: {}",
        indent(1),
        if nav.scrolled { "scrolled" } else { "top" }
    ));
    let active = match (&nav.active_section, nav.active_link) {
        (Some(section), Some(i)) => format!("{} ({})", section, p.page().nav.links[i].href),
        (Some(section), None) => section.clone(),
        (None, _) => "none".to_string(),
    };
    lines.push(format!("{}Active: {}", indent(1), active));

    lines.push(format!(
        "Reveal: {}/{} revealed",
        p.revealer().revealed_count(),
        p.revealer().elements().len()
    ));

    if !p.gallery().items().is_empty() {
        lines.push(format!(
            "Gallery: {}",
            p.gallery().active_tag().unwrap_or("none")
        ));
        for (i, item) in p.gallery().items().iter().enumerate() {
            lines.push(format!(
                "{}{} {} [{}] {}",
                indent(1),
                format_index(i + 1),
                item.id,
                item.category,
                phase_label(item.phase)
            ));
        }
    }

    if !p.skills().bars().is_empty() {
        lines.push("Skills".to_string());
        for (i, bar) in p.skills().bars().iter().enumerate() {
            let state = match (bar.target, bar.width) {
                (None, _) => "(no bar)".to_string(),
                (Some(target), Some(_)) => format!("{target} (filled)"),
                (Some(target), None) => format!("{target} (empty)"),
            };
            lines.push(format!(
                "{}{} {} {}",
                indent(1),
                format_index(i + 1),
                bar.name,
                state
            ));
        }
    }

    if !p.lazy_images().images().is_empty() {
        lines.push(format!("Images: {} pending", p.lazy_images().pending()));
    }

    if let Some(contact) = p.contact() {
        lines.push("Contact".to_string());
        let button = if contact.is_in_flight() {
            format!("{} (disabled)", contact.submit_label)
        } else {
            contact.submit_label.clone()
        };
        lines.push(format!("{}Button: {}", indent(1), button));
        if let Some(status) = &contact.status {
            let kind = match status.kind {
                StatusKind::Success => "success",
                StatusKind::Error => "error",
            };
            lines.push(format!("{}Status: {} \"{}\"", indent(1), kind, status.message));
        }
        lines.push(format!("{}Submissions: {}", indent(1), contact.submissions));
    }

    if let Some(typewriter) = p.typewriter() {
        lines.push(format!("Typewriter: \"{}\"", typewriter.shown()));
    }

    let egg = p.easter_egg();
    lines.push(format!(
        "Easter egg: {}",
        match (egg.inverted, egg.overlay.is_some()) {
            (false, _) => "off".to_string(),
            (true, true) => format!("on, overlay open (x{})", egg.times_triggered),
            (true, false) => format!("on (x{})", egg.times_triggered),
        }
    ));

    lines
}

/// Print snapshot output to stdout.
pub fn print_snapshot(p: &Portfolio) {
    for line in format_snapshot(p) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
