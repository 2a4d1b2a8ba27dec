//! Code-language identification
//!
//! Two mechanisms, in trust order: a declared language taken from markup
//! class names, and a statistical fallback driven by a weighted rule
//! table. The table is data (ordered `(language, pattern, weight)`
//! entries) rather than inlined conditionals, so each rule can be tested
//! on its own.

use once_cell::sync::Lazy;
use regex::Regex;

/// Language tokens recognized as bare class names
const LANGUAGE_VOCABULARY: &[&str] = &[
    "javascript",
    "typescript",
    "jsx",
    "tsx",
    "css",
    "html",
    "json",
    "python",
    "bash",
    "shell",
];

/// Scans class names for a declared language
///
/// Recognizes `language-<x>` and `hljs-<x>` prefixes, plus exact matches
/// against the fixed vocabulary. The first match wins. Callers scan the
/// element's own classes first, then the parent's.
pub fn declared_language_from_classes<'a, I>(classes: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    for class in classes {
        let class = class.to_ascii_lowercase();

        if let Some(suffix) = class.strip_prefix("language-") {
            if !suffix.is_empty() {
                return Some(suffix.to_string());
            }
        }

        if let Some(suffix) = class.strip_prefix("hljs-") {
            if !suffix.is_empty() {
                return Some(suffix.to_string());
            }
        }

        if LANGUAGE_VOCABULARY.contains(&class.as_str()) {
            return Some(class);
        }
    }

    None
}

/// One weighted pattern of the statistical classifier
struct ClassifierRule {
    language: &'static str,
    pattern: &'static str,
    weight: u32,
}

/// The classifier rule table, in tie-break order
///
/// A language's relevance is the sum of the weights of its matching
/// rules; each rule counts at most once. Earlier languages win ties.
const RULES: &[ClassifierRule] = &[
    // JSON
    ClassifierRule { language: "json", pattern: r"(?m)^\s*[\{\[]", weight: 1 },
    ClassifierRule { language: "json", pattern: r#""[A-Za-z0-9_@$-]+"\s*:"#, weight: 3 },
    ClassifierRule { language: "json", pattern: r#":\s*"[^"]*""#, weight: 2 },
    ClassifierRule { language: "json", pattern: r":\s*(true|false|null|-?\d)", weight: 1 },
    // HTML
    ClassifierRule { language: "html", pattern: r"(?i)<!doctype", weight: 3 },
    ClassifierRule {
        language: "html",
        pattern: r"</(div|span|p|a|ul|ol|li|html|body|head|header|footer|section|nav|button|table)>",
        weight: 2,
    },
    ClassifierRule {
        language: "html",
        pattern: r"<(div|span|p|a|ul|ol|li|img|input|button|section|nav|link|meta)\b",
        weight: 2,
    },
    ClassifierRule { language: "html", pattern: r#"<\w+\s+[a-z-]+=["']"#, weight: 2 },
    // TSX (typed component markup)
    ClassifierRule { language: "tsx", pattern: r"<[A-Z][A-Za-z0-9]*", weight: 2 },
    ClassifierRule { language: "tsx", pattern: r"\binterface\s+\w+Props\b", weight: 3 },
    ClassifierRule { language: "tsx", pattern: r":\s*(string|number|boolean|React\.\w+)", weight: 2 },
    // JSX
    ClassifierRule { language: "jsx", pattern: r"<[A-Z][A-Za-z0-9]*", weight: 2 },
    ClassifierRule { language: "jsx", pattern: r"</[A-Z][A-Za-z0-9]*>", weight: 2 },
    ClassifierRule { language: "jsx", pattern: r"\bclassName=", weight: 2 },
    ClassifierRule { language: "jsx", pattern: r"=\{[^}]*\}", weight: 2 },
    ClassifierRule { language: "jsx", pattern: r"\buse(State|Effect|Ref|Memo|Callback)\b", weight: 2 },
    // TypeScript
    ClassifierRule { language: "typescript", pattern: r"\binterface\s+\w+\s*\{", weight: 4 },
    ClassifierRule { language: "typescript", pattern: r"\btype\s+\w+\s*=", weight: 2 },
    ClassifierRule { language: "typescript", pattern: r":\s*(string|number|boolean|void|any)\b", weight: 2 },
    ClassifierRule { language: "typescript", pattern: r"\benum\s+\w+", weight: 2 },
    // JavaScript
    ClassifierRule { language: "javascript", pattern: r"\b(const|let|var)\s+\w+\s*=", weight: 2 },
    ClassifierRule { language: "javascript", pattern: r"=>", weight: 2 },
    ClassifierRule { language: "javascript", pattern: r"\bfunction\s+\w*\s*\(", weight: 2 },
    ClassifierRule { language: "javascript", pattern: r"\b(require\(|module\.exports|console\.log)", weight: 2 },
    ClassifierRule { language: "javascript", pattern: r#"\bimport\s+.+\s+from\s+['"]"#, weight: 3 },
    ClassifierRule { language: "javascript", pattern: r"\b(document|window)\.\w+", weight: 2 },
    // CSS
    ClassifierRule { language: "css", pattern: r"[.#][\w-]+\s*\{", weight: 3 },
    ClassifierRule { language: "css", pattern: r"[\w-]+\s*:\s*[^;{}]+;", weight: 3 },
    ClassifierRule { language: "css", pattern: r"@(media|import|keyframes|supports)\b", weight: 2 },
    ClassifierRule { language: "css", pattern: r"\b\d+(px|rem|em|vh|vw)\b", weight: 2 },
    // Python
    ClassifierRule { language: "python", pattern: r"(?m)^\s*def\s+\w+\s*\(", weight: 3 },
    ClassifierRule { language: "python", pattern: r"(?m)^\s*(import|from)\s+[\w.]+", weight: 2 },
    ClassifierRule { language: "python", pattern: r"\bself\b", weight: 1 },
    ClassifierRule { language: "python", pattern: r"(?m)^\s*class\s+\w+.*:", weight: 2 },
    ClassifierRule { language: "python", pattern: r"\bprint\(", weight: 1 },
    // Bash
    ClassifierRule { language: "bash", pattern: r"(?m)^#!\s*/[\w/]*/(ba|z)?sh", weight: 3 },
    ClassifierRule { language: "bash", pattern: r"(?m)^\s*\$\s+\w+", weight: 3 },
    ClassifierRule { language: "bash", pattern: r"\b(sudo|chmod|mkdir|echo|curl|grep)\s+", weight: 2 },
    ClassifierRule {
        language: "bash",
        pattern: r"\b(npm|npx|yarn|pnpm|pip|cargo|brew|apt)\s+(install|add|run|get)\b",
        weight: 3,
    },
    ClassifierRule { language: "bash", pattern: r"(?m)^\s*(export|source)\s+\w+", weight: 2 },
];

/// Rules with their regexes compiled once
///
/// A pattern that fails to compile is dropped rather than propagated;
/// detection degrades, the crawl does not.
static COMPILED_RULES: Lazy<Vec<(&'static str, Regex, u32)>> = Lazy::new(|| {
    RULES
        .iter()
        .filter_map(|rule| {
            Regex::new(rule.pattern)
                .ok()
                .map(|regex| (rule.language, regex, rule.weight))
        })
        .collect()
});

/// Statistical language detection over a code snippet
///
/// Returns the best-guess language and its relevance score, or None when
/// no rule matched at all. Thresholding (minimum length, minimum
/// relevance) is the caller's decision.
pub fn detect_language(code: &str) -> Option<(String, u32)> {
    // Insertion order doubles as tie-break order
    let mut scores: Vec<(&'static str, u32)> = Vec::new();

    for (language, regex, weight) in COMPILED_RULES.iter() {
        if !regex.is_match(code) {
            continue;
        }
        let language = *language;
        let weight = *weight;
        match scores.iter_mut().find(|(lang, _)| *lang == language) {
            Some((_, score)) => *score += weight,
            None => scores.push((language, weight)),
        }
    }

    let mut best: Option<(&'static str, u32)> = None;
    for (language, score) in scores {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((language, score)),
        }
    }

    best.filter(|(_, score)| *score > 0)
        .map(|(language, score)| (language.to_string(), score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_language_prefix() {
        let classes = vec!["language-python"];
        assert_eq!(
            declared_language_from_classes(classes).as_deref(),
            Some("python")
        );
    }

    #[test]
    fn test_declared_hljs_prefix() {
        let classes = vec!["hljs", "hljs-typescript"];
        assert_eq!(
            declared_language_from_classes(classes).as_deref(),
            Some("typescript")
        );
    }

    #[test]
    fn test_declared_exact_vocabulary_token() {
        let classes = vec!["code-block", "jsx"];
        assert_eq!(
            declared_language_from_classes(classes).as_deref(),
            Some("jsx")
        );
    }

    #[test]
    fn test_declared_first_match_wins() {
        let classes = vec!["language-tsx", "language-css"];
        assert_eq!(
            declared_language_from_classes(classes).as_deref(),
            Some("tsx")
        );
    }

    #[test]
    fn test_declared_case_insensitive() {
        let classes = vec!["Language-JSON"];
        assert_eq!(
            declared_language_from_classes(classes).as_deref(),
            Some("json")
        );
    }

    #[test]
    fn test_no_declaration() {
        let classes = vec!["highlight", "pretty"];
        assert!(declared_language_from_classes(classes).is_none());
    }

    #[test]
    fn test_bare_hljs_is_not_a_language() {
        let classes = vec!["hljs"];
        assert!(declared_language_from_classes(classes).is_none());
    }

    #[test]
    fn test_detect_javascript() {
        let code = "const add = (a, b) => a + b;\nconsole.log(add(1, 2));";
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "javascript");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_python() {
        let code = "import os\n\ndef main():\n    print(os.getcwd())";
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "python");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_json() {
        let code = r#"{"name": "button", "private": true}"#;
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "json");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_html() {
        let code = r#"<div class="hero"><p>Welcome</p></div>"#;
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "html");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_css() {
        let code = ".button {\n  color: #fff;\n  padding: 8px;\n}";
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "css");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_jsx() {
        let code = r#"<Button onClick={handleClick}>Click me</Button>"#;
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "jsx");
        assert!(relevance > 5);
    }

    #[test]
    fn test_detect_typescript_interface() {
        let code = "interface Props {\n  label: string;\n  disabled: boolean;\n}";
        let (language, _) = detect_language(code).unwrap();
        assert_eq!(language, "typescript");
    }

    #[test]
    fn test_detect_bash_install_command() {
        let code = "$ npm install @acme/design-system\n$ npm run build";
        let (language, relevance) = detect_language(code).unwrap();
        assert_eq!(language, "bash");
        assert!(relevance > 5);
    }

    #[test]
    fn test_plain_prose_scores_low() {
        let result = detect_language("This sentence is ordinary prose with no code in it");
        // Either no match at all or a score far below any sane threshold
        if let Some((_, relevance)) = result {
            assert!(relevance <= 5);
        }
    }

    #[test]
    fn test_rule_table_patterns_all_compile() {
        // The compiled table silently drops broken patterns; assert that
        // none actually are broken so rules cannot vanish unnoticed.
        assert_eq!(COMPILED_RULES.len(), RULES.len());
    }
}
