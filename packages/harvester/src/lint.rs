//! Markdown lint diagnostics for converted documents.
//!
//! Detection only: the converter is responsible for generating correct
//! output, and these rules exist to make a regression visible, not to
//! rewrite files after the fact.

use std::sync::LazyLock;

use regex::Regex;

/// Severity of a lint issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must be fixed; fails the lint run.
    Error,
    /// Should be fixed.
    Warning,
    /// Informational.
    Info,
}

/// A single lint finding.
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// 1-based line number.
    pub line: usize,
    /// Rule identifier (e.g., "FORMAT001").
    pub rule: &'static str,
    /// Human-readable description.
    pub message: &'static str,
    /// Severity class.
    pub severity: Severity,
    /// Excerpt of the offending line.
    pub excerpt: String,
}

/// Result of linting one document.
#[derive(Debug, Default)]
pub struct LintReport {
    /// All findings in line order.
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    /// Count of error-severity findings.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Count of warning-severity findings.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Count of info-severity findings.
    #[must_use]
    pub fn infos(&self) -> usize {
        self.count(Severity::Info)
    }

    /// Whether no issues were found at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Standalone backslash left over from a line-break artifact.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STRAY_BACKSLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\\\s*$").expect("valid regex"));

/// Excessively long horizontal rule.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LONG_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{20,}$").expect("valid regex"));

/// Div marker from an unconverted HTML structure.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIV_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:{3,}").expect("valid regex"));

/// Attribute syntax like `{.class}` or `{#id}`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ATTRIBUTE_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[.#][^}]+\}").expect("valid regex"));

/// EUR-Lex modification marker (▼M1, ▼B, …).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MODIFICATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"▼[A-Z]\d*").expect("valid regex"));

/// An enumeration marker alone on its line, separated from its content.
/// A bulleted marker-only line is legal output (item with empty body);
/// an unbulleted one means marker and content were split upstream.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORPHANED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\([a-z]+\)\s*$").expect("valid regex"));

/// Lint a Markdown document.
#[must_use]
pub fn lint_markdown(content: &str) -> LintReport {
    let mut report = LintReport::default();

    for (idx, raw_line) in content.lines().enumerate() {
        let line = idx + 1;
        let stripped = raw_line.trim_end();

        if STRAY_BACKSLASH.is_match(stripped) {
            report.issues.push(issue(
                line,
                "PANDOC001",
                "Standalone backslash (line break artifact)",
                Severity::Warning,
                stripped,
            ));
        }

        if LONG_RULE.is_match(stripped) {
            report.issues.push(issue(
                line,
                "PANDOC002",
                "Excessively long horizontal rule (should be ---)",
                Severity::Warning,
                stripped,
            ));
        }

        if DIV_MARKER.is_match(stripped) {
            report.issues.push(issue(
                line,
                "PANDOC003",
                "Div marker (unconverted HTML structure)",
                Severity::Error,
                stripped,
            ));
        }

        if ATTRIBUTE_SYNTAX.is_match(stripped) {
            report.issues.push(issue(
                line,
                "PANDOC004",
                "Attribute syntax (unconverted class/id)",
                Severity::Warning,
                stripped,
            ));
        }

        if stripped.to_lowercase().contains("onclick=") {
            report.issues.push(issue(
                line,
                "HTML001",
                "HTML onclick attribute in markdown",
                Severity::Error,
                stripped,
            ));
        }

        if MODIFICATION_MARKER.is_match(stripped) {
            report.issues.push(issue(
                line,
                "EURLEX001",
                "EUR-Lex modification marker (should be removed)",
                Severity::Info,
                stripped,
            ));
        }

        if ORPHANED_MARKER.is_match(stripped) {
            report.issues.push(issue(
                line,
                "FORMAT001",
                "Empty list item marker (content on wrong line)",
                Severity::Warning,
                stripped,
            ));
        }
    }

    report
}

fn issue(
    line: usize,
    rule: &'static str,
    message: &'static str,
    severity: Severity,
    content: &str,
) -> LintIssue {
    LintIssue {
        line,
        rule,
        message,
        severity,
        excerpt: content.chars().take(60).collect(),
    }
}
