//! Semantic content extraction (headings, paragraphs, lists, a11y attributes)

use crate::model::{Heading, Landmark, ListBlock, ListKind, SemanticContent, TableBlock};
use crate::text::{normalize_whitespace, truncate_chars};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::{element_text, selector};

/// Landmark text content is truncated to this many characters
const LANDMARK_CONTENT_LIMIT: usize = 200;

static HEADINGS: Lazy<Selector> = Lazy::new(|| selector("h1, h2, h3, h4, h5, h6"));
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| selector("p"));
static LISTS: Lazy<Selector> = Lazy::new(|| selector("ul, ol"));
static IMAGES_WITH_ALT: Lazy<Selector> = Lazy::new(|| selector("img[alt]"));
static ARIA_LABELLED: Lazy<Selector> = Lazy::new(|| selector("[aria-label]"));
static ROLES: Lazy<Selector> = Lazy::new(|| selector("[role]"));
static TABLES: Lazy<Selector> = Lazy::new(|| selector("table"));
static TABLE_ROWS: Lazy<Selector> = Lazy::new(|| selector("tr"));
static TABLE_CELLS: Lazy<Selector> = Lazy::new(|| selector("th, td"));

/// Extracts the structured semantic content of a rendered page
///
/// All sequences preserve document order, and every text value passes
/// through the shared whitespace normalization.
pub fn extract_semantic(document: &Html) -> SemanticContent {
    let tables = extract_tables(document);

    SemanticContent {
        headings: extract_headings(document),
        paragraphs: extract_paragraphs(document),
        lists: extract_lists(document),
        alt_texts: extract_alt_texts(document),
        aria_labels: extract_aria_labels(document),
        landmarks: extract_landmarks(document),
        tables: if tables.is_empty() {
            None
        } else {
            Some(tables)
        },
    }
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    document
        .select(&HEADINGS)
        .filter_map(|element| {
            let level = heading_level(&element)?;
            let text = element_text(&element);
            if text.is_empty() {
                return None;
            }
            Some(Heading {
                level,
                text,
                id: element
                    .value()
                    .attr("id")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            })
        })
        .collect()
}

/// Heading level from the tag name (h1 -> 1, ..., h6 -> 6)
fn heading_level(element: &ElementRef<'_>) -> Option<u8> {
    element
        .value()
        .name()
        .strip_prefix('h')
        .and_then(|digit| digit.parse().ok())
        .filter(|level| (1..=6).contains(level))
}

fn extract_paragraphs(document: &Html) -> Vec<String> {
    document
        .select(&PARAGRAPHS)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .collect()
}

fn extract_lists(document: &Html) -> Vec<ListBlock> {
    document
        .select(&LISTS)
        .filter_map(|element| {
            let kind = match element.value().name() {
                "ol" => ListKind::Ordered,
                _ => ListKind::Unordered,
            };

            // Direct children only; nested lists produce their own blocks
            let items: Vec<String> = element
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .map(|child| element_text(&child))
                .filter(|text| !text.is_empty())
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(ListBlock { kind, items })
            }
        })
        .collect()
}

fn extract_alt_texts(document: &Html) -> Vec<String> {
    document
        .select(&IMAGES_WITH_ALT)
        .filter_map(|element| element.value().attr("alt"))
        .map(normalize_whitespace)
        .filter(|alt| !alt.is_empty())
        .collect()
}

fn extract_aria_labels(document: &Html) -> Vec<String> {
    document
        .select(&ARIA_LABELLED)
        .filter_map(|element| element.value().attr("aria-label"))
        .map(normalize_whitespace)
        .filter(|label| !label.is_empty())
        .collect()
}

fn extract_landmarks(document: &Html) -> Vec<Landmark> {
    document
        .select(&ROLES)
        .filter_map(|element| {
            let role = element.value().attr("role")?.trim();
            if role.is_empty() {
                return None;
            }
            Some(Landmark {
                role: role.to_string(),
                label: element
                    .value()
                    .attr("aria-label")
                    .map(normalize_whitespace)
                    .filter(|s| !s.is_empty()),
                content: truncate_chars(&element_text(&element), LANDMARK_CONTENT_LIMIT),
            })
        })
        .collect()
}

fn extract_tables(document: &Html) -> Vec<TableBlock> {
    document
        .select(&TABLES)
        .filter_map(|table| {
            let rows: Vec<Vec<String>> = table
                .select(&TABLE_ROWS)
                .map(|row| {
                    row.select(&TABLE_CELLS)
                        .map(|cell| element_text(&cell))
                        .collect()
                })
                .filter(|cells: &Vec<String>| !cells.is_empty())
                .collect();

            if rows.is_empty() {
                None
            } else {
                Some(TableBlock { rows })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_headings_with_levels_and_ids() {
        let html = r#"<body>
            <h1 id="top">Button</h1>
            <h2>  Usage  </h2>
            <h3 id="">Props</h3>
        </body>"#;
        let content = extract_semantic(&parse(html));

        assert_eq!(content.headings.len(), 3);
        assert_eq!(content.headings[0].level, 1);
        assert_eq!(content.headings[0].text, "Button");
        assert_eq!(content.headings[0].id.as_deref(), Some("top"));
        assert_eq!(content.headings[1].level, 2);
        assert_eq!(content.headings[1].text, "Usage");
        assert!(content.headings[1].id.is_none());
        // Empty id attribute is treated as absent
        assert!(content.headings[2].id.is_none());
    }

    #[test]
    fn test_empty_headings_skipped() {
        let content = extract_semantic(&parse("<body><h2>   </h2><h2>Real</h2></body>"));
        assert_eq!(content.headings.len(), 1);
    }

    #[test]
    fn test_paragraphs_filter_empty() {
        let html = "<body><p>First</p><p>   </p><p>Second</p></body>";
        let content = extract_semantic(&parse(html));
        assert_eq!(content.paragraphs, vec!["First", "Second"]);
    }

    #[test]
    fn test_ordered_and_unordered_lists() {
        let html = r#"<body>
            <ul><li>one</li><li>two</li><li>  </li></ul>
            <ol><li>first</li></ol>
        </body>"#;
        let content = extract_semantic(&parse(html));

        assert_eq!(content.lists.len(), 2);
        assert_eq!(content.lists[0].kind, ListKind::Unordered);
        assert_eq!(content.lists[0].items, vec!["one", "two"]);
        assert_eq!(content.lists[1].kind, ListKind::Ordered);
        assert_eq!(content.lists[1].items, vec!["first"]);
    }

    #[test]
    fn test_nested_list_yields_separate_blocks() {
        let html = "<body><ul><li>outer <ul><li>inner</li></ul></li></ul></body>";
        let content = extract_semantic(&parse(html));
        assert_eq!(content.lists.len(), 2);
        // The outer item's text includes the nested content
        assert_eq!(content.lists[0].items, vec!["outer inner"]);
        assert_eq!(content.lists[1].items, vec!["inner"]);
    }

    #[test]
    fn test_alt_texts_non_empty_only() {
        let html = r#"<body>
            <img src="a.png" alt="Primary button">
            <img src="b.png" alt="">
            <img src="c.png">
        </body>"#;
        let content = extract_semantic(&parse(html));
        assert_eq!(content.alt_texts, vec!["Primary button"]);
    }

    #[test]
    fn test_aria_labels() {
        let html = r#"<body>
            <button aria-label="Close dialog">x</button>
            <span aria-label="  "></span>
        </body>"#;
        let content = extract_semantic(&parse(html));
        assert_eq!(content.aria_labels, vec!["Close dialog"]);
    }

    #[test]
    fn test_landmarks_with_label_and_truncation() {
        let long = "x".repeat(300);
        let html = format!(
            r#"<body><nav role="navigation" aria-label="Main">{long}</nav></body>"#
        );
        let content = extract_semantic(&parse(&html));

        assert_eq!(content.landmarks.len(), 1);
        let landmark = &content.landmarks[0];
        assert_eq!(landmark.role, "navigation");
        assert_eq!(landmark.label.as_deref(), Some("Main"));
        assert_eq!(landmark.content.chars().count(), 200);
    }

    #[test]
    fn test_tables_as_grids() {
        let html = r#"<body><table>
            <tr><th>Prop</th><th>Type</th></tr>
            <tr><td>variant</td><td>string</td></tr>
        </table></body>"#;
        let content = extract_semantic(&parse(html));

        let tables = content.tables.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].rows,
            vec![
                vec!["Prop".to_string(), "Type".to_string()],
                vec!["variant".to_string(), "string".to_string()],
            ]
        );
    }

    #[test]
    fn test_no_tables_is_none() {
        let content = extract_semantic(&parse("<body><p>text</p></body>"));
        assert!(content.tables.is_none());
    }

    #[test]
    fn test_idempotent_extraction() {
        let html = r#"<body><h1>T</h1><p>p</p><ul><li>i</li></ul></body>"#;
        let document = parse(html);
        assert_eq!(extract_semantic(&document), extract_semantic(&document));
    }
}
