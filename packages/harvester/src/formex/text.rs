//! Inline text extraction from Formex elements.
//!
//! The extractor flattens a markup subtree into inline text, applying
//! Markdown formatting for emphasis, bracketing footnotes, and substituting
//! quotation characters. Wrapper elements like `<DATE>` and `<REF.DOC.OJ>`
//! are recursed into rather than read via `.text()` alone: their content
//! often sits in nested children, and skipping them silently drops dates.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::Node;

use super::tag::Tag;
use crate::xml::{find_child, get_tag_name};

/// Spacing before trailing punctuation left over from element boundaries.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;.])$").expect("valid regex"));

/// Clean and normalize extracted text.
///
/// Collapses all whitespace runs (including non-breaking spaces) to single
/// spaces, trims, and removes stray spacing before trailing punctuation.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    TRAILING_PUNCT.replace(&collapsed, "$1").into_owned()
}

/// Map a `CODE` attribute value to its quotation character.
pub(crate) fn quote_char(code: Option<&str>) -> Option<char> {
    match code? {
        "2018" => Some('\u{2018}'),
        "2019" => Some('\u{2019}'),
        "201C" => Some('\u{201C}'),
        "201D" => Some('\u{201D}'),
        _ => None,
    }
}

/// Extract all text from an element recursively.
///
/// Dispatches on the child's tag identity:
/// - `NOTE` content is bracketed as `\[...\]`; the escaping prevents a
///   footnote adjacent to parenthetical text from parsing as a Markdown
///   link.
/// - `DATE`, `REF.DOC.OJ` and `FT` pass through verbatim, recursively.
/// - `HT` wraps its content according to its `TYPE` attribute.
/// - Quotation elements emit the Unicode character named by their `CODE`
///   attribute; a quotation element that itself has element children is a
///   quoted-section container, not a marker, and is recursed into.
/// - Anything else is recursed into unchanged, so unknown wrappers never
///   lose content.
///
/// Tail text after each child always follows that child's contribution.
#[must_use]
pub fn extract_text(node: Node<'_, '_>) -> String {
    let mut out = String::new();

    if let Some(text) = node.text() {
        out.push_str(text);
    }

    for child in node.children() {
        if child.is_element() {
            match Tag::of(child) {
                Tag::Note => {
                    let inner = extract_text(child);
                    let inner = inner.trim();
                    if !inner.is_empty() {
                        out.push_str(" \\[");
                        out.push_str(inner);
                        out.push_str("\\]");
                    }
                }
                Tag::Date | Tag::RefDocOj | Tag::Ft => {
                    out.push_str(&extract_text(child));
                }
                Tag::Ht => {
                    let inner = extract_text(child);
                    match child.attribute("TYPE") {
                        Some("ITALIC") => {
                            out.push('*');
                            out.push_str(&inner);
                            out.push('*');
                        }
                        Some("BOLD") => {
                            out.push_str("**");
                            out.push_str(&inner);
                            out.push_str("**");
                        }
                        // UC and anything unrecognized pass through unchanged.
                        _ => out.push_str(&inner),
                    }
                }
                Tag::QuotS | Tag::QuotE | Tag::QuotStart | Tag::QuotEnd => {
                    if child.children().any(|c| c.is_element()) {
                        out.push_str(&extract_text(child));
                    } else if let Some(q) = quote_char(child.attribute("CODE")) {
                        out.push(q);
                    }
                }
                Tag::Other => {
                    tracing::debug!(
                        tag = get_tag_name(child),
                        "no explicit handler, extracting generically"
                    );
                    out.push_str(&extract_text(child));
                }
                _ => out.push_str(&extract_text(child)),
            }
        }

        if let Some(tail) = child.tail() {
            out.push_str(tail);
        }
    }

    out
}

/// Verbatim paragraph number from a `PARAG`'s `NO.PARAG` child, if any.
pub(crate) fn paragraph_number(parag: Node<'_, '_>) -> Option<String> {
    let no_parag = find_child(parag, "NO.PARAG")?;
    let number = clean_text(&extract_text(no_parag));
    (!number.is_empty()).then_some(number)
}
