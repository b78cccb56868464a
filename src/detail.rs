//! Product detail page extraction.
//!
//! Sites describe fit and fabric in very different markup, so each site
//! picks one [`DetailExtractor`] implementation.

use crate::utils::{normalize_multiline, OrderedSet};
use itertools::Itertools;
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref P: Selector = Selector::parse("p").expect(E);
    static ref LI: Selector = Selector::parse("li").expect(E);
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "ol", "p", "pre", "section",
    "table", "tr", "ul",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "template", "noscript"];

pub trait DetailExtractor {
    /// Descriptive text of a detail document, `None` when nothing usable
    /// was found.
    fn extract(&self, doc: &Html) -> Option<String>;
}

/// Text pieces of `el` with whitespace collapsed, empty ones dropped,
/// joined by `separator`.
pub fn flatten_text(el: ElementRef<'_>, separator: &str) -> String {
    el.text()
        .map(|piece| piece.split_whitespace().join(" "))
        .filter(|piece| !piece.is_empty())
        .join(separator)
}

/// Renders `el` as lines: `<br>` and block element boundaries become
/// newlines, runs of source whitespace inside text become one space.
pub fn text_with_line_breaks(el: ElementRef<'_>) -> String {
    let mut text = String::new();
    push_children_text(el, &mut text);
    text.split('\n').map(str::trim).join("\n").trim().to_string()
}

fn push_children_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(piece) = child.value().as_text() {
            out.push_str(&regex!(r"\s+").replace_all(piece, " "));
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED_TAGS.contains(&name) {
                continue;
            }
            if name == "br" {
                out.push('\n');
                continue;
            }

            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push('\n');
            }
            push_children_text(child, out);
            if block {
                out.push('\n');
            }
        }
    }
}

fn list_text(list: ElementRef<'_>) -> Option<String> {
    let items = list
        .select(&LI)
        .map(|li| format!("- {}", flatten_text(li, " ")))
        .collect::<Vec<_>>();

    if items.is_empty() {
        None
    } else {
        Some(items.join("\n"))
    }
}

/// Collects the content strictly between the first two `marker` elements.
///
/// Paragraphs keep their line breaks, lists become `- ` prefixed lines and
/// any other element contributes its nested paragraphs. With fewer than two
/// markers the first `fallbacks` selector that matches supplies the text.
///
/// The walk only visits siblings of the first marker. When the second
/// marker is not one of them, collection runs to the last sibling.
#[derive(Debug)]
pub struct MarkerBounded {
    pub marker: Selector,
    pub fallbacks: Vec<Selector>,
}

impl MarkerBounded {
    fn between(&self, start: ElementRef<'_>, end: ElementRef<'_>) -> Option<String> {
        let mut chunks = vec![];

        for node in start.next_siblings() {
            if node.id() == end.id() {
                break;
            }
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };

            match el.value().name() {
                "p" => chunks.push(text_with_line_breaks(el)),
                "ul" | "ol" => chunks.extend(list_text(el)),
                _ => chunks.extend(el.select(&P).map(text_with_line_breaks)),
            }
        }

        let text = chunks
            .iter()
            .map(|chunk| chunk.trim())
            .filter(|chunk| !chunk.is_empty())
            .join("\n\n");
        normalize_multiline(&text)
    }

    fn fallback(&self, doc: &Html) -> Option<String> {
        let container = self
            .fallbacks
            .iter()
            .find_map(|selector| doc.select(selector).next())?;
        normalize_multiline(&text_with_line_breaks(container))
    }
}

impl DetailExtractor for MarkerBounded {
    fn extract(&self, doc: &Html) -> Option<String> {
        let mut markers = doc.select(&self.marker);
        match (markers.next(), markers.next()) {
            (Some(start), Some(end)) => self.between(start, end),
            _ => self.fallback(doc),
        }
    }
}

/// Joins the visible text of every `items` element plus the first `summary`
/// element, dropping repeated chunks.
#[derive(Debug)]
pub struct VisibleItems {
    pub items: Selector,
    pub summary: Selector,
    pub separator: &'static str,
}

fn is_hidden(el: &ElementRef<'_>) -> bool {
    let element = el.value();
    element.classes().any(|class| class == "hidden")
        || element.attr("aria-hidden") == Some("true")
        || element.attr("hidden").is_some()
}

impl DetailExtractor for VisibleItems {
    fn extract(&self, doc: &Html) -> Option<String> {
        let chunks = doc
            .select(&self.items)
            .chain(doc.select(&self.summary).take(1))
            .filter(|el| !is_hidden(el))
            .map(|el| flatten_text(el, " "))
            .filter(|text| !text.is_empty())
            .collect::<OrderedSet<_>>();

        if chunks.is_empty() {
            None
        } else {
            Some(chunks.iter().join(self.separator))
        }
    }
}
