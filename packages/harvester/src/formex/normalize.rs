//! Output normalization passes.
//!
//! Assembly appends blank separator lines liberally; these passes reduce
//! the result to canonical spacing. They run in a fixed order, each
//! assuming the previous pass's invariant, and reach a fixed point after
//! one application.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of blank lines beyond one.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Consecutive horizontal rules with only blank lines between.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RULE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(---+\n)(\s*\n)*---+").expect("valid regex"));

/// A horizontal rule immediately preceding a heading line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RULE_BEFORE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---+\n(?:\s*\n)*(#{1,6} )").expect("valid regex"));

/// Normalize assembled Markdown.
///
/// In order: collapse blank-line runs to a single blank line, collapse
/// repeated horizontal rules into one, and drop a rule that directly
/// precedes a heading (headings carry their own visual weight).
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = BLANK_RUNS.replace_all(text, "\n\n").into_owned();

    loop {
        let next = RULE_RUNS.replace_all(&out, "---").into_owned();
        if next == out {
            break;
        }
        out = next;
    }

    out = RULE_BEFORE_HEADING.replace_all(&out, "$1").into_owned();

    let mut out = out.trim_end().to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_runs_collapsed() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb\n");
    }

    #[test]
    fn test_single_blank_line_kept() {
        assert_eq!(normalize("a\n\nb"), "a\n\nb\n");
    }

    #[test]
    fn test_consecutive_rules_collapsed() {
        let out = normalize("Some content\n\n---\n\n---\n\nMore content");
        assert_eq!(out.matches("---").count(), 1);
    }

    #[test]
    fn test_three_rules_collapse_to_one() {
        let out = normalize("Content\n---\n\n---\n\n---\nMore content");
        assert_eq!(out.matches("---").count(), 1);
    }

    #[test]
    fn test_separated_rules_preserved() {
        let out = normalize("Content\n---\nSection 1\n---\nSection 2");
        assert_eq!(out.matches("---").count(), 2);
    }

    #[test]
    fn test_rule_before_heading_removed() {
        let out = normalize("Some content\n\n---\n\n# ANNEXES\n\nMore content");
        assert!(!out.contains("---"));
        assert!(out.contains("# ANNEXES"));
    }

    #[test]
    fn test_rule_before_h2_removed() {
        let out = normalize("Article content\n\n---\n\n## Enacting Terms\n\nTerms here");
        assert!(!out.contains("---"));
        assert!(out.contains("## Enacting Terms"));
    }

    #[test]
    fn test_rule_before_plain_text_preserved() {
        let out = normalize("Article 52\n\n---\n\nThis Regulation shall be binding");
        assert!(out.contains("---"));
        assert!(out.contains("This Regulation shall be binding"));
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "a\n\n\n\nb\n---\n\n---\n\n## Heading\n\ntext",
            "---\n\n---\n\n---",
            "",
            "plain text",
            "x\n\n---\n\n# H\n\n---\n\n---\n\ny",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_trailing_newline_exactly_one() {
        assert_eq!(normalize("text\n\n\n"), "text\n");
        assert_eq!(normalize("text"), "text\n");
    }
}
