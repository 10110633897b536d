//! Amendment instruction rendering.
//!
//! Amending acts enumerate instructions like "(50) Article 49 is replaced
//! by the following:" and then carry the literal replacement text in a
//! `QUOT.S` quoted section. The replacement may be a full document
//! substructure (articles with titles, numbered paragraphs, nested lists),
//! which must come out as blockquoted structure under its instruction and
//! never as standalone top-level content.
//!
//! Three item-body shapes exist:
//!
//! ```text
//! <ITEM><NP><NO.P>(1)</NO.P><TXT>…replaced by:</TXT>
//!   <P><QUOT.S>…replacement…</QUOT.S></P></NP></ITEM>   quoted section
//! <ITEM><NP><NO.P>(2)</NO.P><TXT>…amended as follows:</TXT>
//!   <P><LIST>…</LIST></P></NP></ITEM>                    nested instructions
//! <ITEM><NP><NO.P>(3)</NO.P><TXT>…is deleted.</TXT></NP></ITEM>
//! ```

use roxmltree::Node;

use super::list::{format_list, item_marker, INDENT};
use super::tag::Tag;
use super::text::{clean_text, extract_text, paragraph_number, quote_char};
use crate::xml::{element_children, find_child, find_children, get_tag_name};

/// Render an amendment-style `LIST`: bulleted instruction lines plus
/// blockquoted replacement content from quoted sections.
///
/// `parent` is the element holding the list; when given, quoted content
/// that follows the list as siblings (replacement text bracketed by
/// `QUOT.START`/`QUOT.END` markers) is captured as well.
#[must_use]
pub fn format_amendment_list(
    list: Node<'_, '_>,
    parent: Option<Node<'_, '_>>,
    indent_level: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    let indent = INDENT.repeat(indent_level);

    for item in find_children(list, "ITEM") {
        let np = find_child(item, "NP").or_else(|| {
            item.descendants()
                .find(|n| n.is_element() && Tag::of(*n) == Tag::Np)
        });
        let Some(np) = np else {
            let text = clean_text(&extract_text(item));
            if !text.is_empty() {
                lines.push(format!("{indent}- {text}"));
            } else {
                tracing::debug!(
                    tag = get_tag_name(item),
                    "skipping amendment item without content"
                );
            }
            continue;
        };

        let instruction = instruction_text(np);
        match (item_marker(np), instruction.is_empty()) {
            (Some(marker), false) => lines.push(format!("{indent}- {marker} {instruction}")),
            (Some(marker), true) => lines.push(format!("{indent}- {marker}")),
            (None, false) => lines.push(format!("{indent}- {instruction}")),
            (None, true) => {}
        }

        for p in find_children(np, "P") {
            let nested: Vec<Node<'_, '_>> = find_children(p, "LIST").collect();
            if !nested.is_empty() {
                // Nested instructions take structural priority; plain text
                // sitting next to them is still emitted.
                if let Some(text) = p.text() {
                    let text = clean_text(text);
                    if !text.is_empty() {
                        lines.push(format!("{}{text}", INDENT.repeat(indent_level + 1)));
                    }
                }
                for nested_list in nested {
                    lines.extend(format_amendment_list(nested_list, Some(p), indent_level + 1));
                }
                continue;
            }

            if let Some(quot) = find_child(p, "QUOT.S") {
                let block = format_quoted_section(quot, &indent);
                if !block.is_empty() {
                    lines.extend(block);
                    lines.push(String::new());
                }
                continue;
            }

            // Ordinary text body: plain continuation under the instruction.
            let text = clean_text(&extract_text(p));
            if !text.is_empty() {
                lines.push(format!("{}{text}", INDENT.repeat(indent_level + 1)));
                lines.push(String::new());
            }
        }

        for nested in find_children(np, "LIST") {
            lines.extend(format_amendment_list(nested, Some(np), indent_level + 1));
        }
    }

    if let Some(parent) = parent {
        for (quoted, text) in following_quoted_content(parent, list) {
            if text.is_empty() {
                continue;
            }
            if quoted {
                lines.push(format!("{indent}> {text}"));
            } else {
                lines.push(format!("{indent}{text}"));
            }
        }
    }

    lines
}

/// Instruction sentence of an amendment item: the `TXT` child if present,
/// else the text trailing the numbering marker.
fn instruction_text(np: Node<'_, '_>) -> String {
    if let Some(txt) = find_child(np, "TXT") {
        return clean_text(&extract_text(txt));
    }
    find_child(np, "NO.P")
        .and_then(|no_p| no_p.tail())
        .map(clean_text)
        .unwrap_or_default()
}

/// Render the children of a `QUOT.S` quoted section as blockquote lines.
///
/// Successive paragraphs are separated by a blank blockquote line (`>`);
/// concatenating two paragraphs onto one line would lose a legally
/// meaningful paragraph break. An empty section yields no lines at all.
pub(crate) fn format_quoted_section(quot: Node<'_, '_>, indent: &str) -> Vec<String> {
    let mut blocks: Vec<Vec<String>> = Vec::new();

    for child in element_children(quot) {
        match Tag::of(child) {
            Tag::Parag => {
                let mut number = paragraph_number(child);
                for alinea in find_children(child, "ALINEA") {
                    let text = clean_text(&extract_text(alinea));
                    if text.is_empty() {
                        continue;
                    }
                    blocks.push(vec![quoted_line(indent, ">", &mut number, &text)]);
                }
            }
            Tag::Article | Tag::Division => {
                let article = format_quoted_article(child, indent, 1);
                if !article.is_empty() {
                    blocks.push(article);
                }
            }
            Tag::List => {
                let list_lines: Vec<String> = format_list(child, 0)
                    .into_iter()
                    .map(|line| format!("{indent}> {line}"))
                    .collect();
                if !list_lines.is_empty() {
                    blocks.push(list_lines);
                }
            }
            Tag::QuotStart | Tag::QuotEnd | Tag::QuotE => {}
            _ => {
                let text = clean_text(&extract_text(child));
                if !text.is_empty() {
                    blocks.push(vec![format!("{indent}> {text}")]);
                }
            }
        }
    }

    join_quoted_blocks(blocks, indent, ">")
}

/// Render an `ARTICLE` nested inside a quoted section as blockquoted
/// structure: italic title line, bold subtitle line, then paragraph bodies
/// with their verbatim numbers. Structural children nest one `>` deeper.
pub(crate) fn format_quoted_article(
    article: Node<'_, '_>,
    indent: &str,
    depth: usize,
) -> Vec<String> {
    let quote = ">".repeat(depth);
    let mut blocks: Vec<Vec<String>> = Vec::new();

    if let Some(ti_art) = find_child(article, "TI.ART") {
        let title = clean_text(&extract_text(ti_art));
        if !title.is_empty() {
            blocks.push(vec![format!("{indent}{quote} *{title}*")]);
        }
    }

    if let Some(sti_art) = find_child(article, "STI.ART") {
        let subtitle = match find_child(sti_art, "P") {
            Some(p) => clean_text(&extract_text(p)),
            None => clean_text(&extract_text(sti_art)),
        };
        if !subtitle.is_empty() {
            blocks.push(vec![format!("{indent}{quote} **{subtitle}**")]);
        }
    }

    for child in element_children(article) {
        match Tag::of(child) {
            Tag::Parag => {
                let mut number = paragraph_number(child);
                for alinea in find_children(child, "ALINEA") {
                    blocks.extend(quoted_alinea_blocks(alinea, indent, &quote, &mut number));
                }
            }
            Tag::Alinea => {
                let mut number = None;
                blocks.extend(quoted_alinea_blocks(child, indent, &quote, &mut number));
            }
            Tag::Article | Tag::Division => {
                let nested = format_quoted_article(child, indent, depth + 1);
                if !nested.is_empty() {
                    blocks.push(nested);
                }
            }
            _ => {}
        }
    }

    join_quoted_blocks(blocks, indent, &quote)
}

/// Paragraph-level blocks of a quoted `ALINEA`: plain text, `P` children,
/// and nested lists, all carrying the blockquote prefix.
fn quoted_alinea_blocks(
    alinea: Node<'_, '_>,
    indent: &str,
    quote: &str,
    number: &mut Option<String>,
) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();

    let has_structure =
        element_children(alinea).any(|c| matches!(Tag::of(c), Tag::P | Tag::List));
    if !has_structure {
        let text = clean_text(&extract_text(alinea));
        if !text.is_empty() {
            blocks.push(vec![quoted_line(indent, quote, number, &text)]);
        }
        return blocks;
    }

    if let Some(text) = alinea.text() {
        let text = clean_text(text);
        if !text.is_empty() {
            blocks.push(vec![quoted_line(indent, quote, number, &text)]);
        }
    }

    for child in element_children(alinea) {
        match Tag::of(child) {
            Tag::P => {
                let wraps_list = find_child(child, "LIST").is_some();
                if wraps_list {
                    if let Some(text) = child.text() {
                        let text = clean_text(text);
                        if !text.is_empty() {
                            blocks.push(vec![quoted_line(indent, quote, number, &text)]);
                        }
                    }
                    for list in find_children(child, "LIST") {
                        blocks.extend(quoted_list_block(list, indent, quote));
                    }
                } else {
                    let text = clean_text(&extract_text(child));
                    if !text.is_empty() {
                        blocks.push(vec![quoted_line(indent, quote, number, &text)]);
                    }
                }
            }
            Tag::List => blocks.extend(quoted_list_block(child, indent, quote)),
            _ => {}
        }
    }

    blocks
}

fn quoted_list_block(list: Node<'_, '_>, indent: &str, quote: &str) -> Vec<Vec<String>> {
    let lines: Vec<String> = format_list(list, 0)
        .into_iter()
        .map(|line| format!("{indent}{quote} {line}"))
        .collect();
    if lines.is_empty() {
        Vec::new()
    } else {
        vec![lines]
    }
}

/// Build one blockquoted paragraph line, consuming the pending paragraph
/// number on first use.
fn quoted_line(indent: &str, quote: &str, number: &mut Option<String>, text: &str) -> String {
    match number.take() {
        Some(num) if !text.starts_with(num.as_str()) => format!("{indent}{quote} {num} {text}"),
        _ => format!("{indent}{quote} {text}"),
    }
}

/// Join paragraph blocks with blank blockquote separator lines.
fn join_quoted_blocks(blocks: Vec<Vec<String>>, indent: &str, quote: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, block) in blocks.into_iter().enumerate() {
        if i > 0 {
            lines.push(format!("{indent}{quote}"));
        }
        lines.extend(block);
    }
    lines
}

/// Quoted content that follows `after` among `parent`'s children.
///
/// Some amending acts place replacement text as siblings of the
/// instruction list, bracketed by `QUOT.START`/`QUOT.END` markers.
/// Returns `(quoted, text)` pairs in document order, stopping at the next
/// `LIST` (the next instruction).
pub(crate) fn following_quoted_content(
    parent: Node<'_, '_>,
    after: Node<'_, '_>,
) -> Vec<(bool, String)> {
    let mut out = Vec::new();
    let mut seen_after = false;
    let mut in_quote = false;
    let mut current: Vec<String> = Vec::new();

    for child in parent.children() {
        if child == after {
            seen_after = true;
            continue;
        }
        if !seen_after || !child.is_element() {
            continue;
        }

        match Tag::of(child) {
            Tag::List => break,
            Tag::QuotS | Tag::QuotStart => {
                in_quote = true;
                if let Some(q) = quote_char(child.attribute("CODE")) {
                    current.push(q.to_string());
                }
                if let Some(tail) = child.tail() {
                    current.push(tail.to_string());
                }
            }
            Tag::QuotE | Tag::QuotEnd => {
                if let Some(q) = quote_char(child.attribute("CODE")) {
                    current.push(q.to_string());
                }
                if !current.is_empty() {
                    let text = clean_text(&current.concat());
                    if !text.is_empty() {
                        out.push((true, text));
                    }
                    current.clear();
                }
                in_quote = false;
                if let Some(tail) = child.tail() {
                    let tail = clean_text(tail);
                    if !tail.is_empty() {
                        out.push((false, tail));
                    }
                }
            }
            Tag::P => {
                let text = clean_text(&extract_text(child));
                if text.is_empty() {
                    continue;
                }
                if in_quote {
                    current.push(text);
                } else {
                    // A bare paragraph between instructions is replacement
                    // text whose quote markers sit inside it.
                    out.push((true, text));
                }
            }
            Tag::Alinea => {
                for p in child
                    .descendants()
                    .filter(|n| n.is_element() && Tag::of(*n) == Tag::P)
                {
                    let text = clean_text(&extract_text(p));
                    if !text.is_empty() {
                        out.push((true, text));
                    }
                }
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn format(xml: &str) -> Vec<String> {
        let doc = Document::parse(xml).unwrap();
        format_amendment_list(doc.root_element(), None, 0)
    }

    #[test]
    fn test_instruction_with_replacement_article() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(50)</NO.P>
                    <TXT>Article 49 is replaced by the following:</TXT>
                    <P><QUOT.S>
                        <ARTICLE>
                            <TI.ART>Article 49</TI.ART>
                            <STI.ART>Review</STI.ART>
                            <PARAG>
                                <NO.PARAG>1.</NO.PARAG>
                                <ALINEA>The Commission shall review by <DATE ISO="20260521">21 May 2026</DATE>.</ALINEA>
                            </PARAG>
                        </ARTICLE>
                    </QUOT.S></P>
                </NP></ITEM>
            </LIST>"#,
        );
        let text = lines.join("\n");

        assert_eq!(lines[0], "- (50) Article 49 is replaced by the following:");
        assert!(text.contains("> *Article 49*"), "missing title: {text}");
        assert!(text.contains("> **Review**"), "missing subtitle: {text}");
        assert!(
            text.contains("> 1. The Commission shall review by 21 May 2026."),
            "missing paragraph with date: {text}"
        );
        // One blank line closes the blockquote block.
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_quoted_paragraphs_get_blank_separators() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(2)</NO.P>
                    <TXT>paragraph 3 is replaced by the following:</TXT>
                    <P><QUOT.S>
                        <PARAG><ALINEA>First replacement paragraph.</ALINEA></PARAG>
                        <PARAG><ALINEA>Second replacement paragraph.</ALINEA></PARAG>
                    </QUOT.S></P>
                </NP></ITEM>
            </LIST>"#,
        );
        let first = lines
            .iter()
            .position(|l| l.contains("First replacement"))
            .unwrap();
        assert_eq!(lines[first + 1], ">");
        assert!(lines[first + 2].contains("Second replacement"));
    }

    #[test]
    fn test_empty_quoted_section_emits_nothing() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(3)</NO.P>
                    <TXT>is deleted.</TXT>
                    <P><QUOT.S>   </QUOT.S></P>
                </NP></ITEM>
            </LIST>"#,
        );
        assert_eq!(lines, vec!["- (3) is deleted."]);
    }

    #[test]
    fn test_nested_amendment_instructions() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(2)</NO.P>
                    <TXT>Article 12 is amended as follows:</TXT>
                    <P><LIST>
                        <ITEM><NP>
                            <NO.P>(a)</NO.P>
                            <TXT>paragraph 1 is replaced by the following:</TXT>
                            <P><QUOT.S>
                                <PARAG><ALINEA>1. New text of the paragraph.</ALINEA></PARAG>
                            </QUOT.S></P>
                        </NP></ITEM>
                    </LIST></P>
                </NP></ITEM>
            </LIST>"#,
        );
        let text = lines.join("\n");
        assert_eq!(lines[0], "- (2) Article 12 is amended as follows:");
        assert!(text.contains("    - (a) paragraph 1 is replaced by the following:"));
        assert!(text.contains("    > 1. New text of the paragraph."));
    }

    #[test]
    fn test_quoted_article_with_list() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(7)</NO.P>
                    <TXT>Article 5 is replaced by the following:</TXT>
                    <P><QUOT.S>
                        <ARTICLE>
                            <TI.ART>Article 5</TI.ART>
                            <PARAG>
                                <ALINEA>Member States shall:
                                    <LIST>
                                        <ITEM><NP><NO.P>(a)</NO.P><TXT>do one thing;</TXT></NP></ITEM>
                                        <ITEM><NP><NO.P>(b)</NO.P><TXT>do another.</TXT></NP></ITEM>
                                    </LIST>
                                </ALINEA>
                            </PARAG>
                        </ARTICLE>
                    </QUOT.S></P>
                </NP></ITEM>
            </LIST>"#,
        );
        let text = lines.join("\n");
        assert!(text.contains("> *Article 5*"));
        assert!(text.contains("> Member States shall:"));
        assert!(text.contains("> - (a) do one thing;"));
        assert!(text.contains("> - (b) do another."));
    }

    #[test]
    fn test_plain_body_without_quot_is_not_blockquoted() {
        let lines = format(
            r#"<LIST>
                <ITEM><NP>
                    <NO.P>(4)</NO.P>
                    <TXT>the following point is added:</TXT>
                    <P>Explanatory continuation text.</P>
                </NP></ITEM>
            </LIST>"#,
        );
        assert_eq!(lines[0], "- (4) the following point is added:");
        assert_eq!(lines[1], "    Explanatory continuation text.");
        assert!(!lines[1].starts_with('>'));
    }

    #[test]
    fn test_following_quoted_content_after_list() {
        let xml = r#"<ALINEA>
            <LIST>
                <ITEM><NP><NO.P>(1)</NO.P><TXT>the title is replaced by:</TXT></NP></ITEM>
            </LIST>
            <QUOT.START CODE="2018"/>
            <P>Replacement title text</P>
            <QUOT.END CODE="2019"/>
        </ALINEA>"#;
        let doc = Document::parse(xml).unwrap();
        let alinea = doc.root_element();
        let list = crate::xml::find_child(alinea, "LIST").unwrap();

        let content = following_quoted_content(alinea, list);
        assert_eq!(content.len(), 1);
        assert!(content[0].0, "content should be quoted");
        assert!(content[0].1.contains("Replacement title text"));
    }

    #[test]
    fn test_following_content_stops_at_next_list() {
        let xml = r#"<ALINEA>
            <LIST><ITEM><NP><NO.P>(1)</NO.P><TXT>first instruction</TXT></NP></ITEM></LIST>
            <P>between text</P>
            <LIST><ITEM><NP><NO.P>(2)</NO.P><TXT>second instruction</TXT></NP></ITEM></LIST>
        </ALINEA>"#;
        let doc = Document::parse(xml).unwrap();
        let alinea = doc.root_element();
        let first_list = crate::xml::find_child(alinea, "LIST").unwrap();

        let content = following_quoted_content(alinea, first_list);
        assert_eq!(content.len(), 1);
        assert!(content[0].1.contains("between text"));
        assert!(!content.iter().any(|(_, t)| t.contains("second instruction")));
    }

    #[test]
    fn test_deep_quote_nesting_prefix() {
        let doc = Document::parse(
            r#"<ARTICLE>
                <TI.ART>Article 1</TI.ART>
                <DIVISION>
                    <TI.ART>Nested heading</TI.ART>
                    <ALINEA>Nested body.</ALINEA>
                </DIVISION>
            </ARTICLE>"#,
        )
        .unwrap();
        let lines = format_quoted_article(doc.root_element(), "", 1);
        let text = lines.join("\n");
        assert!(text.contains("> *Article 1*"));
        assert!(text.contains(">> *Nested heading*"), "got: {text}");
        assert!(text.contains(">> Nested body."));
    }
}
