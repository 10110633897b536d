//! Formex 4 structural converter.
//!
//! Converts the parsed XML tree of an EU legal act into normalized
//! Markdown, preserving legal structure: title, recitals, articles,
//! numbered paragraphs, nested enumerations, annexes, and quoted
//! amendment blocks. The converter is a pure function from tree to text:
//! it performs no I/O and holds no state across documents.

mod amendment;
mod document;
mod list;
mod normalize;
mod tag;
mod text;

pub use amendment::format_amendment_list;
pub use document::{convert, convert_str};
pub use list::{format_list, NumberingStyle};
pub use normalize::normalize;
pub use tag::Tag;
pub use text::{clean_text, extract_text};
