use scraper::{Html, Node, Selector};
use url::Url;

use super::types::PageFields;
use crate::util::text::{collapse_whitespace, truncate_chars};

pub const MAX_CONTENT_CHARS: usize = 1000;
pub const MAX_LINKS: usize = 10;

// Elements whose text never renders.
const HIDDEN_TEXT_PARENTS: [&str; 3] = ["script", "style", "template"];

/// Pull the page fields out of `html`. The parser is lenient: malformed
/// markup yields a best-effort tree, never an error.
pub fn extract_fields(html: &str, base: &Url) -> PageFields {
    let doc = Html::parse_document(html);
    PageFields {
        title: extract_title(&doc),
        content: extract_content(&doc),
        links: extract_links(&doc, base),
        meta_description: extract_meta_description(&doc),
    }
}

fn extract_title(doc: &Html) -> String {
    let Ok(sel) = Selector::parse("title") else { return String::new() };
    doc.select(&sel)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_content(doc: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();
    for node in doc.root_element().descendants() {
        let Node::Text(text) = node.value() else { continue };
        let hidden = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => HIDDEN_TEXT_PARENTS.iter().any(|n| *n == el.name()),
            _ => false,
        });
        if hidden { continue; }
        let t = text.trim();
        if !t.is_empty() { pieces.push(t); }
    }
    let joined = collapse_whitespace(&pieces.join(" "));
    truncate_chars(&joined, MAX_CONTENT_CHARS)
}

fn extract_links(doc: &Html, base: &Url) -> Vec<String> {
    let Ok(sel) = Selector::parse("a[href]") else { return Vec::new() };
    doc.select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .take(MAX_LINKS)
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

/// Join `href` against the page URL; absolute hrefs come back unchanged.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if Url::parse(href).is_ok() { return Some(href.to_string()); }
    base.join(href).ok().map(String::from)
}

// Exact, case-sensitive match on the name attribute value.
fn extract_meta_description(doc: &Html) -> String {
    let Ok(sel) = Selector::parse("meta") else { return String::new() };
    doc.select(&sel)
        .find(|m| m.value().attr("name") == Some("description"))
        .and_then(|m| m.value().attr("content"))
        .map(str::to_string)
        .unwrap_or_default()
}
