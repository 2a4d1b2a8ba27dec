//! Content extraction over a rendered page
//!
//! Everything in this module is a pure function of the rendered HTML:
//! running an extractor twice over the same document yields identical
//! output. Extraction never fails — malformed fragments degrade to empty
//! or partial results rather than errors.

mod classify;
mod code;
mod metadata;
mod semantic;

pub use classify::{declared_language_from_classes, detect_language};
pub use code::extract_code_samples;
pub use metadata::extract_metadata;
pub use semantic::extract_semantic;

use crate::config::DetectionConfig;
use crate::model::{CodeSample, PageMetadata, SemanticContent};
use crate::text::normalize_whitespace;
use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("body"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// Everything the pipeline pulls out of one rendered page
#[derive(Debug, Clone)]
pub struct DocumentExtract {
    pub text_content: String,
    pub semantic: SemanticContent,
    pub metadata: PageMetadata,
    pub code_samples: Vec<CodeSample>,
    /// Same-document candidate links, resolved to absolute URLs
    pub links: Vec<Url>,
}

/// Runs every extractor over a rendered page
///
/// The document is parsed once and shared by all extractors. Candidate
/// links are resolved here but not yet filtered; the frontier applies the
/// discovery rules.
pub fn extract_document(
    html: &str,
    base_url: &Url,
    detection: &DetectionConfig,
) -> DocumentExtract {
    let document = Html::parse_document(html);

    DocumentExtract {
        text_content: extract_text_content(&document),
        semantic: extract_semantic(&document),
        metadata: extract_metadata(&document),
        code_samples: extract_code_samples(&document, detection),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the normalized visible text of the page
///
/// Walks the body subtree (the whole document if there is no body),
/// skipping script, style, noscript, and template elements.
pub fn extract_text_content(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_visible_text(*root, &mut raw);
    normalize_whitespace(&raw)
}

fn collect_visible_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(&text);
                out.push(' ');
            }
            Node::Element(element) => {
                if !matches!(
                    element.name(),
                    "script" | "style" | "noscript" | "template"
                ) {
                    collect_visible_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Extracts candidate links from the rendered page
///
/// Hrefs are resolved against the page URL; resolution failures and
/// non-navigable schemes are dropped silently.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes and data: URIs
/// - fragment-only links (same page anchors)
/// - URLs that fail to resolve or are not HTTP(S)
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(resolved) if resolved.scheme() == "http" || resolved.scheme() == "https" => {
            Some(resolved)
        }
        _ => None,
    }
}

/// Parses a compile-time-constant CSS selector
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Normalized text content of a single element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
