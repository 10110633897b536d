//! Document assembly: a full Formex act to Markdown.
//!
//! The assembler drives a fixed top-down traversal (title, preamble,
//! recitals, enacting terms, articles, annexes, signature block) and
//! delegates list and amendment bodies to the dedicated formatters.
//! Conversion is a pure function of the parsed tree: no I/O, no shared
//! mutable state, so documents can be converted in parallel with zero
//! coordination.

use std::collections::HashSet;

use roxmltree::{Document, Node};

use super::amendment::{format_amendment_list, format_quoted_section};
use super::list::{format_list, item_marker};
use super::normalize::normalize;
use super::tag::Tag;
use super::text::{clean_text, extract_text, paragraph_number, quote_char};
use crate::error::Result;
use crate::xml::{element_children, find_by_path, find_child, find_children};

/// Convert a parsed Formex document to Markdown.
#[must_use]
pub fn convert(doc: &Document<'_>) -> String {
    let root = doc.root_element();
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = document_title(root) {
        lines.push(format!("# {title}"));
        lines.push(String::new());
    }

    let preamble = descendant(root, Tag::Preamble);

    if let Some(init) = preamble.and_then(|p| find_child(p, "PREAMBLE.INIT")) {
        let text = clean_text(&extract_text(init));
        if !text.is_empty() {
            lines.push("## Preamble".to_string());
            lines.push(String::new());
            lines.push(text);
            lines.push(String::new());
        }
    }

    if let Some(gr_visa) = descendant(root, Tag::GrVisa) {
        for visa in find_children(gr_visa, "VISA") {
            let text = clean_text(&extract_text(visa));
            if !text.is_empty() {
                lines.push(format!("*{text}*"));
                lines.push(String::new());
            }
        }
    }

    lines.extend(recital_lines(root));

    if let Some(fin) = preamble.and_then(|p| find_child(p, "PREAMBLE.FINAL")) {
        let text = clean_text(&extract_text(fin));
        if !text.is_empty() {
            lines.push(format!("**{text}**"));
            lines.push(String::new());
        }
    }

    if descendant(root, Tag::EnactingTerms).is_some() {
        lines.push("## Enacting Terms".to_string());
        lines.push(String::new());
    }

    lines.extend(article_lines(root));
    lines.extend(annex_lines(root));

    if let Some(final_block) = descendant(root, Tag::Final) {
        lines.push("---".to_string());
        lines.push(String::new());
        for p in final_block
            .descendants()
            .filter(|n| n.is_element() && Tag::of(*n) == Tag::P)
        {
            let text = clean_text(&extract_text(p));
            if !text.is_empty() {
                lines.push(text);
                lines.push(String::new());
            }
        }
    }

    normalize(&lines.join("\n"))
}

/// Parse Formex XML and convert it to Markdown.
///
/// # Errors
/// Returns an error if the XML is not well-formed.
pub fn convert_str(xml: &str) -> Result<String> {
    let doc = Document::parse(xml)?;
    Ok(convert(&doc))
}

fn descendant<'a, 'input>(root: Node<'a, 'input>, tag: Tag) -> Option<Node<'a, 'input>> {
    root.descendants()
        .find(|n| n.is_element() && Tag::of(*n) == tag)
}

/// Document title from `TITLE/TI`, joining its `P` children.
fn document_title(root: Node<'_, '_>) -> Option<String> {
    let ti = find_by_path(descendant(root, Tag::Title)?, "TI")?;
    let parts: Vec<String> = find_children(ti, "P")
        .map(|p| clean_text(&extract_text(p)))
        .filter(|t| !t.is_empty())
        .collect();
    if parts.is_empty() {
        let text = clean_text(&extract_text(ti));
        return (!text.is_empty()).then_some(text);
    }
    Some(parts.join(" "))
}

/// Recitals ("Whereas" clauses) as a bulleted list, numbering verbatim.
fn recital_lines(root: Node<'_, '_>) -> Vec<String> {
    let Some(gr_consid) = descendant(root, Tag::GrConsid) else {
        return Vec::new();
    };

    let mut lines = vec!["## Recitals".to_string(), String::new()];

    for consid in find_children(gr_consid, "CONSID") {
        let Some(np) = find_child(consid, "NP") else {
            let text = clean_text(&extract_text(consid));
            if !text.is_empty() {
                lines.push(format!("- {text}"));
                lines.push(String::new());
            }
            continue;
        };

        let marker = item_marker(np);
        let text = match find_child(np, "TXT") {
            Some(txt) => clean_text(&extract_text(txt)),
            None => {
                let mut text = clean_text(&extract_text(np));
                if let Some(m) = &marker {
                    if text.starts_with(m.as_str()) {
                        text = text[m.len()..].trim_start().to_string();
                    }
                }
                text
            }
        };
        if text.is_empty() {
            continue;
        }
        match marker {
            Some(m) => lines.push(format!("- {m} {text}")),
            None => lines.push(format!("- {text}")),
        }
        lines.push(String::new());
    }

    lines
}

/// Indices of every `ARTICLE` that lives inside a quoted section.
///
/// These are replacement content for other acts; rendering them again as
/// standalone articles would duplicate legally distinct text. Identity is
/// tracked by the arena node index, established in one upfront walk.
fn quoted_article_ids(root: Node<'_, '_>) -> HashSet<u32> {
    let mut ids = HashSet::new();
    for quot in root
        .descendants()
        .filter(|n| n.is_element() && Tag::of(*n) == Tag::QuotS)
    {
        for article in quot
            .descendants()
            .filter(|n| n.is_element() && Tag::of(*n) == Tag::Article)
        {
            ids.insert(article.id().get());
        }
    }
    ids
}

fn article_lines(root: Node<'_, '_>) -> Vec<String> {
    let quoted = quoted_article_ids(root);
    let mut lines = Vec::new();

    for article in root
        .descendants()
        .filter(|n| n.is_element() && Tag::of(*n) == Tag::Article)
    {
        if quoted.contains(&article.id().get()) {
            continue;
        }
        lines.extend(single_article_lines(article));
    }

    lines
}

fn single_article_lines(article: Node<'_, '_>) -> Vec<String> {
    let mut lines = Vec::new();

    let heading = find_child(article, "TI.ART")
        .map(|n| clean_text(&extract_text(n)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Article".to_string());
    lines.push(format!("### {heading}"));

    if let Some(sti_art) = find_child(article, "STI.ART") {
        let subtitle = match find_child(sti_art, "P") {
            Some(p) => clean_text(&extract_text(p)),
            None => clean_text(&extract_text(sti_art)),
        };
        if !subtitle.is_empty() {
            lines.push(format!("**{subtitle}**"));
        }
    }
    lines.push(String::new());

    for parag in find_children(article, "PARAG") {
        let mut number = paragraph_number(parag);
        for alinea in find_children(parag, "ALINEA") {
            let mut body = alinea_lines(alinea);
            if let Some(first) = body.first_mut() {
                if let Some(num) = number.take() {
                    if !first.starts_with(num.as_str()) {
                        *first = format!("{num} {first}");
                    }
                }
            }
            lines.extend(body);
        }
    }

    for alinea in find_children(article, "ALINEA") {
        lines.extend(alinea_lines(alinea));
    }

    lines
}

/// Render one `ALINEA` body: paragraphs, enumerations (with amendment
/// handling), and inline quoted runs, in document order.
fn alinea_lines(alinea: Node<'_, '_>) -> Vec<String> {
    let mut lines = Vec::new();

    let has_structure = element_children(alinea)
        .any(|c| matches!(Tag::of(c), Tag::P | Tag::List | Tag::QuotS | Tag::QuotStart));
    if !has_structure {
        let text = clean_text(&extract_text(alinea));
        if !text.is_empty() {
            lines.push(text);
            lines.push(String::new());
        }
        return lines;
    }

    // Text preceding the first child element.
    if let Some(text) = alinea.text() {
        let text = clean_text(text);
        if !text.is_empty() {
            lines.push(text);
            lines.push(String::new());
        }
    }

    let children: Vec<Node<'_, '_>> = element_children(alinea).collect();
    let mut i = 0;
    while i < children.len() {
        let child = children[i];
        match Tag::of(child) {
            Tag::P => {
                lines.extend(paragraph_lines(child));
                push_tail(child, &mut lines);
            }
            Tag::List => {
                let list_lines = format_amendment_list(child, Some(alinea), 0);
                if !list_lines.is_empty() {
                    lines.extend(list_lines);
                    lines.push(String::new());
                }
                // Siblings up to the next LIST were consumed as following
                // quoted content.
                while i + 1 < children.len() && Tag::of(children[i + 1]) != Tag::List {
                    i += 1;
                }
            }
            Tag::QuotStart | Tag::QuotS
                if !child.children().any(|c| c.is_element()) =>
            {
                // Inline quoted run bracketed by marker elements.
                let mut parts: Vec<String> = Vec::new();
                if let Some(q) = quote_char(child.attribute("CODE")) {
                    parts.push(q.to_string());
                }
                if let Some(tail) = child.tail() {
                    parts.push(tail.to_string());
                }
                let mut closed = None;
                i += 1;
                while i < children.len() {
                    let inner = children[i];
                    if matches!(Tag::of(inner), Tag::QuotEnd | Tag::QuotE) {
                        if let Some(q) = quote_char(inner.attribute("CODE")) {
                            parts.push(q.to_string());
                        }
                        closed = Some(inner);
                        break;
                    }
                    parts.push(clean_text(&extract_text(inner)));
                    i += 1;
                }
                let text = clean_text(&parts.join(" "));
                if !text.is_empty() {
                    lines.push(format!("> {text}"));
                    lines.push(String::new());
                }
                if let Some(end) = closed {
                    push_tail(end, &mut lines);
                }
            }
            Tag::QuotS => {
                // A quoted section sitting directly in the paragraph body.
                let block = format_quoted_section(child, "");
                if !block.is_empty() {
                    lines.extend(block);
                    lines.push(String::new());
                }
                push_tail(child, &mut lines);
            }
            _ => {
                let text = clean_text(&extract_text(child));
                if !text.is_empty() {
                    lines.push(text);
                    lines.push(String::new());
                }
                push_tail(child, &mut lines);
            }
        }
        i += 1;
    }

    lines
}

/// Render a `P` child of an alinea: plain paragraph, or text plus nested
/// enumerations (the list wins structurally, the text still comes first).
fn paragraph_lines(p: Node<'_, '_>) -> Vec<String> {
    let mut lines = Vec::new();

    if find_child(p, "LIST").is_none() {
        let text = clean_text(&extract_text(p));
        if !text.is_empty() {
            lines.push(text);
            lines.push(String::new());
        }
        return lines;
    }

    if let Some(text) = p.text() {
        let text = clean_text(text);
        if !text.is_empty() {
            lines.push(text);
            lines.push(String::new());
        }
    }
    for list in find_children(p, "LIST") {
        let list_lines = format_amendment_list(list, Some(p), 0);
        if !list_lines.is_empty() {
            lines.extend(list_lines);
            lines.push(String::new());
        }
    }

    lines
}

/// Tail text travels with the surrounding content stream.
fn push_tail(node: Node<'_, '_>, lines: &mut Vec<String>) {
    if let Some(tail) = node.tail() {
        let tail = clean_text(tail);
        if !tail.is_empty() {
            lines.push(tail);
            lines.push(String::new());
        }
    }
}

fn annex_lines(root: Node<'_, '_>) -> Vec<String> {
    let mut lines = Vec::new();

    for annex in root
        .descendants()
        .filter(|n| n.is_element() && Tag::of(*n) == Tag::Annex)
    {
        // An annex inside a quoted section is replacement content and is
        // rendered under its amendment instruction instead.
        if annex
            .ancestors()
            .skip(1)
            .any(|a| a.is_element() && Tag::of(a) == Tag::QuotS)
        {
            continue;
        }

        let title = descendant(annex, Tag::TiAnnex)
            .map(|n| clean_text(&extract_text(n)))
            .filter(|t| !t.is_empty())
            .or_else(|| {
                find_by_path(annex, "TITLE/TI")
                    .map(|ti| clean_text(&extract_text(ti)))
                    .filter(|t| !t.is_empty())
            })
            .unwrap_or_else(|| "ANNEX".to_string());
        lines.push(format!("## {title}"));
        lines.push(String::new());

        for node in annex.descendants().filter(|n| n.is_element()) {
            match Tag::of(node) {
                Tag::P if annex_paragraph_stands_alone(node, annex) => {
                    let text = if find_child(node, "LIST").is_some() {
                        clean_text(&extract_text_without_lists(node))
                    } else {
                        clean_text(&extract_text(node))
                    };
                    if !text.is_empty() {
                        lines.push(text);
                        lines.push(String::new());
                    }
                }
                Tag::List if !has_ancestor_tag(node, annex, Tag::List) => {
                    let list_lines = format_list(node, 0);
                    if !list_lines.is_empty() {
                        lines.extend(list_lines);
                        lines.push(String::new());
                    }
                }
                _ => {}
            }
        }
    }

    lines
}

/// Whether an annex `P` should be emitted as its own paragraph: not part
/// of a list item and not part of the annex title already rendered.
fn annex_paragraph_stands_alone(p: Node<'_, '_>, annex: Node<'_, '_>) -> bool {
    !has_ancestor_tag(p, annex, Tag::List)
        && !has_ancestor_tag(p, annex, Tag::TiAnnex)
        && !has_ancestor_tag(p, annex, Tag::Title)
}

fn has_ancestor_tag(node: Node<'_, '_>, stop: Node<'_, '_>, tag: Tag) -> bool {
    for ancestor in node.ancestors().skip(1) {
        if ancestor == stop {
            return false;
        }
        if ancestor.is_element() && Tag::of(ancestor) == tag {
            return true;
        }
    }
    false
}

/// Inline extraction that leaves out `LIST` subtrees (rendered separately).
fn extract_text_without_lists(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    if let Some(text) = node.text() {
        out.push_str(text);
    }
    for child in node.children() {
        if child.is_element() && Tag::of(child) != Tag::List {
            out.push_str(&extract_text_without_lists(child));
        }
        if let Some(tail) = child.tail() {
            out.push_str(tail);
        }
    }
    out
}
