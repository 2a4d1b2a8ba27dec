//! Code sample detection
//!
//! Candidates are found through a prioritized selector list covering the
//! common code-block conventions, then annotated with a declared or
//! statistically detected language, a caption-style context snippet, and
//! informational source metadata.

use crate::config::DetectionConfig;
use crate::model::CodeSample;
use crate::text::truncate_chars;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use uuid::Uuid;

use super::classify::{declared_language_from_classes, detect_language};
use super::{element_text, selector};

/// Context snippets are truncated to this many characters
const CONTEXT_LIMIT: usize = 100;

/// Class-name fragments that mark a line-number decoration
const LINE_NUMBER_MARKERS: &[&str] = &["line-number", "line-numbers", "linenos", "lineno"];

/// Candidate selectors, highest priority first
static CODE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "pre code",
        "pre",
        r#"code[class*="language-"]"#,
        ".highlight",
        ".code-block",
        ".codeblock",
        ".hljs",
    ]
    .iter()
    .map(|css| selector(css))
    .collect()
});

/// Finds candidate code blocks on a rendered page
///
/// A block is accepted if its trimmed text is non-empty; when several
/// selectors match the same text (nested `pre > code` structures), only
/// the first occurrence contributes.
pub fn extract_code_samples(document: &Html, detection: &DetectionConfig) -> Vec<CodeSample> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut samples = Vec::new();

    for sel in CODE_SELECTORS.iter() {
        for element in document.select(sel) {
            let code = element.text().collect::<String>().trim().to_string();
            if code.is_empty() || !seen.insert(code.clone()) {
                continue;
            }
            samples.push(build_sample(element, code, detection));
        }
    }

    samples
}

fn build_sample(element: ElementRef<'_>, code: String, detection: &DetectionConfig) -> CodeSample {
    let parent = element.parent().and_then(ElementRef::wrap);

    // Element's own classes first, then the parent's
    let declared_language = declared_language_from_classes(
        element
            .value()
            .classes()
            .chain(parent.iter().flat_map(|p| p.value().classes())),
    );

    let (detected_language, confidence) = if declared_language.is_none() {
        statistical_detection(&code, detection)
    } else {
        (None, None)
    };

    CodeSample {
        id: Uuid::new_v4().to_string(),
        declared_language,
        detected_language,
        confidence,
        context: context_snippet(element),
        source_element: Some(element_descriptor(&element)),
        line_numbers: line_numbers_nearby(&element),
        code,
    }
}

/// Runs the statistical classifier, gated on length and relevance
///
/// Too-short snippets and low-relevance guesses produce no detection at
/// all; a classifier failure is indistinguishable from "no detection".
fn statistical_detection(
    code: &str,
    detection: &DetectionConfig,
) -> (Option<String>, Option<f32>) {
    if code.chars().count() < detection.min_code_length {
        return (None, None);
    }

    match detect_language(code) {
        Some((language, relevance)) if relevance > detection.min_relevance => {
            let confidence = (relevance as f32 / 100.0).min(1.0);
            (Some(language), Some(confidence))
        }
        _ => (None, None),
    }
}

/// Caption text from the immediately preceding sibling, if it is a
/// heading or paragraph
fn context_snippet(element: ElementRef<'_>) -> Option<String> {
    let anchor = context_anchor(element);
    let previous = anchor.prev_siblings().find_map(ElementRef::wrap)?;

    if !matches!(
        previous.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p"
    ) {
        return None;
    }

    let text = element_text(&previous);
    if text.is_empty() {
        None
    } else {
        Some(truncate_chars(&text, CONTEXT_LIMIT))
    }
}

/// The element whose siblings carry the caption: for `pre > code` that is
/// the enclosing pre, otherwise the candidate itself
fn context_anchor(element: ElementRef<'_>) -> ElementRef<'_> {
    if element.value().name() == "code" {
        if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
            if parent.value().name() == "pre" {
                return parent;
            }
        }
    }
    element
}

/// Compact descriptor of the source element: tag name plus class list
fn element_descriptor(element: &ElementRef<'_>) -> String {
    let mut descriptor = element.value().name().to_string();
    for class in element.value().classes() {
        descriptor.push('.');
        descriptor.push_str(class);
    }
    descriptor
}

/// Whether a line-number decoration is present on the element, its
/// parent, or the preceding sibling
fn line_numbers_nearby(element: &ElementRef<'_>) -> Option<bool> {
    let mut candidates: Vec<ElementRef<'_>> = vec![*element];
    if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
        candidates.push(parent);
    }
    if let Some(previous) = element.prev_siblings().find_map(ElementRef::wrap) {
        candidates.push(previous);
    }

    let found = candidates.iter().any(|candidate| {
        candidate.value().classes().any(|class| {
            let class = class.to_ascii_lowercase();
            LINE_NUMBER_MARKERS
                .iter()
                .any(|marker| class.contains(marker))
        })
    });

    if found {
        Some(true)
    } else {
        None
    }
}
