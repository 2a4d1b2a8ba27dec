//! Page metadata extraction (title, meta tags, Open Graph, JSON-LD)

use crate::model::{OpenGraph, PageMetadata};
use crate::text::normalize_whitespace;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::selector;

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static KEYWORDS: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="keywords"]"#));
static AUTHOR: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="author"]"#));
static CANONICAL: Lazy<Selector> = Lazy::new(|| selector(r#"link[rel="canonical"]"#));
static HTML_TAG: Lazy<Selector> = Lazy::new(|| selector("html"));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector(r#"meta[property="og:description"]"#));
static OG_IMAGE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:image"]"#));
static OG_URL: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:url"]"#));
static OG_TYPE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:type"]"#));
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| selector(r#"script[type="application/ld+json"]"#));

/// Extracts page-level metadata from a rendered page
///
/// Every field is best-effort; a page with no metadata at all yields the
/// default (all-empty) structure. The Open Graph group is included only if
/// at least one of the five standard properties is present.
pub fn extract_metadata(document: &Html) -> PageMetadata {
    let open_graph = extract_open_graph(document);

    PageMetadata {
        title: extract_title(document),
        description: attr_content(document, &DESCRIPTION),
        keywords: extract_keywords(document),
        author: attr_content(document, &AUTHOR),
        canonical_url: first_attr(document, &CANONICAL, "href"),
        language: document_language(document),
        open_graph: if open_graph.is_empty() {
            None
        } else {
            Some(open_graph)
        },
        json_ld: extract_json_ld(document),
    }
}

/// Extracts the page title from the <title> tag
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

/// Comma-splits and trims the keywords meta tag
fn extract_keywords(document: &Html) -> Vec<String> {
    attr_content(document, &KEYWORDS)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Document language from the <html lang> attribute
fn document_language(document: &Html) -> Option<String> {
    first_attr(document, &HTML_TAG, "lang")
}

fn extract_open_graph(document: &Html) -> OpenGraph {
    OpenGraph {
        title: attr_content(document, &OG_TITLE),
        description: attr_content(document, &OG_DESCRIPTION),
        image: attr_content(document, &OG_IMAGE),
        url: attr_content(document, &OG_URL),
        og_type: attr_content(document, &OG_TYPE),
    }
}

/// Parses every JSON-LD script block independently
///
/// One malformed block must not block extraction of the others, so parse
/// failures are dropped silently.
fn extract_json_ld(document: &Html) -> Vec<serde_json::Value> {
    document
        .select(&JSON_LD)
        .filter_map(|script| {
            let content = script.text().collect::<String>();
            // Strip CDATA markers if present
            let content = content
                .trim()
                .trim_start_matches("<![CDATA[")
                .trim_end_matches("]]>")
                .trim()
                .to_string();
            serde_json::from_str::<serde_json::Value>(&content).ok()
        })
        .collect()
}

/// The `content` attribute of the first match, trimmed and non-empty
fn attr_content(document: &Html, sel: &Selector) -> Option<String> {
    first_attr(document, sel, "content")
}

fn first_attr(document: &Html, sel: &Selector, attr: &str) -> Option<String> {
    document
        .select(sel)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
