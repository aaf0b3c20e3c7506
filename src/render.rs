//! Reconcile the view state back into markup.
//!
//! The interaction layer never keeps a DOM; this module writes the classes,
//! inline styles and attributes the handlers would have applied onto a fresh
//! rendering of the page. Useful for eyeballing a replay and for asserting
//! on the exact class names the stylesheet expects.
//!
//! ## Class vocabulary
//!
//! | Element | Classes / attributes |
//! |---------|----------------------|
//! | navbar | `navbar`, `scrolled` |
//! | toggle / menu | `nav-toggle` / `nav-menu`, `active` when open |
//! | nav link | `nav-link`, `active` for the current section |
//! | animatable | `fade-in`, `visible` once revealed, `transition-delay` |
//! | filter control | `filter-btn`, `active`, `data-filter` |
//! | gallery item | `portfolio-item`, `data-category`, `display`/`opacity`/`transform` |
//! | skill bar | `skill-progress`, `--progress`, `width` once filled |
//! | image | `src`, `data-src` until loaded |
//! | form status | `form-status`, `success` / `error` |
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the HTML output;
//! everything interpolated is escaped.

use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::app::Portfolio;
use crate::contact::StatusKind;
use crate::gallery::{ItemPhase, ItemView};
use crate::page::Role;
use crate::reveal::RevealState;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the whole page in its current state.
pub fn render_page(p: &Portfolio) -> Markup {
    let egg = p.easter_egg();
    let content = html! {
        (render_navbar(p))
        @if p.page().hero.is_some() {
            (render_hero(p))
        }
        main {
            @for section in &p.page().sections {
                section id=(section.id) data-top=(section.top) data-height=(section.height) {}
            }
            (render_blocks(p))
            (render_gallery(p))
            (render_skills(p))
            (render_images(p))
            @if p.contact().is_some() {
                (render_contact(p))
            }
        }
        @if let Some(link) = &egg.overlay {
            div.konami-overlay {
                p { "You found it!" }
                a href=(link) target="_blank" rel="noopener" { "Learn more" }
                button.konami-close type="button" { "Close" }
            }
        }
    };
    base_document("Portfolio", egg.inverted.then_some("konami-flip"), content)
}

/// Write the rendered page to `path`.
pub fn write_page(p: &Portfolio, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_page(p).into_string())?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn render_navbar(p: &Portfolio) -> Markup {
    let nav = p.navigation();
    let markup = &p.page().nav;
    html! {
        nav.navbar.scrolled[nav.scrolled] {
            @if markup.toggle {
                button.nav-toggle.active[nav.menu_open] type="button" aria-expanded=(if nav.menu_open { "true" } else { "false" }) {
                    span.bar {}
                    span.bar {}
                    span.bar {}
                }
            }
            @if markup.menu {
                ul.nav-menu.active[nav.menu_open] {
                    @for (i, link) in markup.links.iter().enumerate() {
                        li {
                            a.nav-link.active[nav.active_link == Some(i)] href=(link.href) {
                                (link.label)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_hero(p: &Portfolio) -> Markup {
    html! {
        section.hero {
            @for offset in p.parallax().offsets() {
                div.floating-shape
                    style={ "transform: translate(-50%, calc(-50% + " (offset) "px))" } {}
            }
            @if let Some(typewriter) = p.typewriter() {
                h1.hero-title { (typewriter.shown()) }
            }
        }
    }
}

/// `class` and `style` for an animatable element.
fn reveal_attrs(p: &Portfolio, id: &str) -> (String, Option<String>) {
    match p.revealer().get(id) {
        Some(el) => {
            let class = match el.state {
                RevealState::Revealed => "fade-in visible",
                RevealState::Hidden => "fade-in",
            };
            let delay = el
                .delay
                .map(|d| format!("transition-delay: {}s;", (d * 1000.0).round() / 1000.0));
            (class.to_string(), delay)
        }
        None => (String::new(), None),
    }
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::SectionHeader => "section-header",
        Role::PortfolioItem => "portfolio-item",
        Role::SkillCard => "skill-card",
        Role::AboutContent => "about-content",
        Role::ContactContent => "contact-content",
        Role::Plain => "block",
    }
}

fn render_blocks(p: &Portfolio) -> Markup {
    html! {
        @for block in &p.page().blocks {
            @let (reveal, style) = reveal_attrs(p, &block.id);
            div id=(block.id) class={ (role_class(block.role)) " " (reveal) } style=[style] {}
        }
    }
}

fn item_style(view: &ItemView, delay: Option<String>) -> Option<String> {
    let mut style = delay.unwrap_or_default();
    match view.phase {
        ItemPhase::Removed => style.push_str("display: none;"),
        ItemPhase::Entering => style.push_str("display: block;"),
        ItemPhase::Visible | ItemPhase::Leaving => {}
    }
    if let Some((opacity, offset)) = view.style() {
        style.push_str(&format!(
            "opacity: {opacity}; transform: translateY({offset}px);"
        ));
    }
    (!style.is_empty()).then_some(style)
}

fn render_gallery(p: &Portfolio) -> Markup {
    let gallery = p.gallery();
    let markup = &p.page().gallery;
    html! {
        @if !markup.filters.is_empty() {
            div.portfolio-filters {
                @for (i, filter) in markup.filters.iter().enumerate() {
                    button.filter-btn.active[gallery.active_index() == Some(i)]
                        type="button" data-filter=(filter.tag) {
                        (filter.label)
                    }
                }
            }
        }
        @if !markup.items.is_empty() {
            div.portfolio-grid {
                @for (item, view) in markup.items.iter().zip(gallery.items()) {
                    @let (reveal, delay) = reveal_attrs(p, &item.id);
                    div id=(item.id) class={ "portfolio-item " (reveal) }
                        data-category=(item.category)
                        style=[item_style(view, delay)] {
                        h3 { (item.title) }
                    }
                }
            }
        }
    }
}

fn render_skills(p: &Portfolio) -> Markup {
    html! {
        @if !p.skills().bars().is_empty() {
            div.skills-grid {
                @for bar in p.skills().bars() {
                    @let (reveal, style) = reveal_attrs(p, &bar.card_id);
                    div id=(bar.card_id) class={ "skill-card " (reveal) } style=[style] {
                        h3 { (bar.name) }
                        @if let Some(target) = bar.target {
                            @let width = bar.width.map(|w| format!(" width: {w};")).unwrap_or_default();
                            div.skill-bar {
                                div.skill-progress style={ "--progress: " (target.to_string()) ";" (width) } {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_images(p: &Portfolio) -> Markup {
    html! {
        @for img in p.lazy_images().images() {
            img id=(img.id) src=[img.src.as_deref()] data-src=[img.data_src.as_deref()] alt=(img.alt);
        }
    }
}

fn render_contact(p: &Portfolio) -> Markup {
    let Some(contact) = p.contact() else {
        return html! {};
    };
    let kind = contact.status.as_ref().map(|s| s.kind);
    html! {
        form id="contact-form" action=(contact.endpoint) method="post" {
            @for (name, value) in &contact.fields {
                @if name == "message" {
                    textarea name=(name) { (value) }
                } @else {
                    input name=(name) value=(value);
                }
            }
            div.form-status.success[kind == Some(StatusKind::Success)].error[kind == Some(StatusKind::Error)] {
                @if let Some(status) = &contact.status {
                    (status.message)
                }
            }
            button type="submit" disabled[contact.submit_disabled] { (contact.submit_label) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
