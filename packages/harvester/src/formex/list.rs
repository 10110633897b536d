//! Enumerated list rendering.
//!
//! List items keep their numbering markers verbatim: legal numbering
//! ("23a", "(ca)") is not sequential, so markers are never recomputed from
//! an index. Every item line carries a `- ` bullet prefix so that
//! heterogeneous markers ("(a)", "(i)", "1.") stay members of one Markdown
//! list instead of collapsing into the first item's paragraph.

use roxmltree::Node;

use super::tag::Tag;
use super::text::{clean_text, extract_text};
use crate::xml::{find_child, find_children};

/// Indentation unit for one list nesting level.
pub(crate) const INDENT: &str = "    ";

/// Numbering style of a list, from its `TYPE` attribute.
///
/// Used only for formatting decisions and diagnostics, never for
/// renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingStyle {
    /// Lettered items: (a), (b), (ca).
    Alphabetic,
    /// Arabic-numbered items: 1., 2.
    Arabic,
    /// Roman-numbered items: (i), (ii).
    Roman,
    /// No usable `TYPE` attribute.
    Unspecified,
}

impl NumberingStyle {
    /// Read the style from a `LIST` element's `TYPE` attribute.
    #[must_use]
    pub fn from_list(list: Node<'_, '_>) -> Self {
        match list.attribute("TYPE") {
            Some("alpha" | "ALPHA") => Self::Alphabetic,
            Some("arab" | "ARAB") => Self::Arabic,
            Some("roman" | "ROMAN") => Self::Roman,
            _ => Self::Unspecified,
        }
    }
}

/// Verbatim numbering marker of an item's `NP`, if present.
pub(crate) fn item_marker(np: Node<'_, '_>) -> Option<String> {
    let no_p = find_child(np, "NO.P")?;
    let marker = clean_text(&extract_text(no_p));
    (!marker.is_empty()).then_some(marker)
}

/// Body text of an item's `NP`.
///
/// Prefers an explicit `TXT` child; otherwise gathers the text stream
/// following the numbering marker. Nested lists (direct or behind a `P`
/// wrapper) are left out here: they are rendered structurally by the
/// caller, while any plain text around them is still kept.
pub(crate) fn item_body(np: Node<'_, '_>) -> String {
    if let Some(txt) = find_child(np, "TXT") {
        return clean_text(&extract_text(txt));
    }

    let mut parts = String::new();
    if let Some(text) = np.text() {
        parts.push_str(text);
    }
    for child in np.children() {
        if child.is_element() {
            match Tag::of(child) {
                Tag::NoP | Tag::List => {}
                Tag::P if find_child(child, "LIST").is_some() => {}
                _ => parts.push_str(&extract_text(child)),
            }
        }
        if let Some(tail) = child.tail() {
            parts.push_str(tail);
        }
    }
    clean_text(&parts)
}

/// Render a `LIST` element as bullet-prefixed Markdown lines.
///
/// One line per item, `<indent>- <marker> <body>`, markers verbatim.
/// Nested lists found either directly under the item's `NP` or inside an
/// intermediate `P` wrapper indent one unit deeper.
#[must_use]
pub fn format_list(list: Node<'_, '_>, indent_level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let indent = INDENT.repeat(indent_level);
    let style = NumberingStyle::from_list(list);
    tracing::trace!(?style, "formatting list");

    for item in find_children(list, "ITEM") {
        let Some(np) = find_child(item, "NP") else {
            // Item without the NP wrapper: best-effort plain bullet.
            let text = clean_text(&extract_text(item));
            if !text.is_empty() {
                lines.push(format!("{indent}- {text}"));
            } else {
                tracing::debug!("skipping empty list item");
            }
            continue;
        };

        let body = item_body(np);
        match (item_marker(np), body.is_empty()) {
            (Some(marker), false) => lines.push(format!("{indent}- {marker} {body}")),
            (Some(marker), true) => lines.push(format!("{indent}- {marker}")),
            (None, false) => lines.push(format!("{indent}- {body}")),
            (None, true) => tracing::debug!("skipping empty list item"),
        }

        for p in find_children(np, "P") {
            for nested in find_children(p, "LIST") {
                lines.extend(format_list(nested, indent_level + 1));
            }
        }
        for nested in find_children(np, "LIST") {
            lines.extend(format_list(nested, indent_level + 1));
        }
    }

    lines
}
