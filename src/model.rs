//! Record types produced by the crawl pipeline
//!
//! An [`ExtractedPage`] is created exactly once per crawled URL, at the end
//! of a (possibly retried) fetch attempt, and never mutated afterward. The
//! serialized shape (camelCase field names) is the sole contract consumed
//! by downstream export, persistence, and UI layers.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One record per crawled URL, success or failure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    /// Opaque unique identifier, generated at creation
    pub id: String,

    /// Absolute, normalized URL this record was produced for
    pub url: String,

    /// Normalized full-page visible text (whitespace collapsed)
    pub text_content: String,

    /// Structured semantic content extracted from the rendered page
    pub semantic_content: SemanticContent,

    /// Page-level metadata (title, description, Open Graph, JSON-LD, ...)
    pub metadata: PageMetadata,

    /// Code blocks found on the page with best-effort language identification
    pub code_samples: Vec<CodeSample>,

    /// ISO-8601 creation time
    pub timestamp: String,

    /// Milliseconds spent rendering and extracting this page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_time_ms: Option<u64>,

    /// Non-empty exactly when the fetch/extract pipeline exhausted its
    /// retry bound for this URL
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ExtractedPage {
    /// Creates a success record from extracted content
    pub fn success(
        url: String,
        text_content: String,
        semantic_content: SemanticContent,
        metadata: PageMetadata,
        code_samples: Vec<CodeSample>,
        render_time_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            text_content,
            semantic_content,
            metadata,
            code_samples,
            timestamp: now_iso8601(),
            render_time_ms: Some(render_time_ms),
            errors: Vec::new(),
        }
    }

    /// Creates an error record for a URL that failed all retry attempts
    ///
    /// Error records carry empty content and metadata so the output
    /// collection stays uniform; the triggering error message is the only
    /// `errors` entry.
    pub fn error_record(url: String, error: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            text_content: String::new(),
            semantic_content: SemanticContent::default(),
            metadata: PageMetadata::default(),
            code_samples: Vec::new(),
            timestamp: now_iso8601(),
            render_time_ms: None,
            errors: vec![error],
        }
    }

    /// Returns true if this record represents a failed fetch
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Ordered semantic content extracted from a rendered page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticContent {
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub lists: Vec<ListBlock>,
    pub alt_texts: Vec<String>,
    pub aria_labels: Vec<String>,
    pub landmarks: Vec<Landmark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<TableBlock>>,
}

/// A heading element (h1-h6)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// An ordered or unordered list with its item strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    #[serde(rename = "type")]
    pub kind: ListKind,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// An element carrying an explicit ARIA role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Trimmed text content, truncated to 200 characters
    pub content: String,
}

/// A table as a 2-D grid of cell strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    pub rows: Vec<Vec<String>>,
}

/// Page-level metadata; every field is best-effort
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    /// Document language from the <html lang> attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Present only if at least one og:* property was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    /// Parsed JSON-LD blocks; malformed blocks are silently dropped
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_ld: Vec<serde_json::Value>,
}

/// The five standard Open Graph properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
}

impl OpenGraph {
    /// Returns true if none of the five properties were found
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.url.is_none()
            && self.og_type.is_none()
    }
}

/// A candidate code block with best-effort language identification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSample {
    pub id: String,
    pub code: String,
    /// Language stated by page markup (class names); trusted over detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_language: Option<String>,
    /// Language inferred by the statistical classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    /// Classifier confidence in [0, 1]; set only with `detected_language`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Up to 100 characters of the preceding heading or paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Compact descriptor of the source element (tag name plus classes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_element: Option<String>,
    /// Whether a line-number decoration is present nearby
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<bool>,
}

/// Transient progress snapshot, emitted once per processed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlProgress {
    /// Identifier of the crawl run that produced this snapshot
    pub source_id: String,
    pub pages_processed: usize,
    /// Estimate; may grow as new links are discovered
    pub total_pages: usize,
    pub current_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components_found: Option<usize>,
}

/// Current time as an ISO-8601 string with millisecond precision
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
