//! EUR-Lex Harvester - Download EU legislation and convert to Markdown.
//!
//! This crate downloads EU legal acts from EUR-Lex in Formex 4 XML format
//! and converts them to structured Markdown, preserving legal structure:
//! titles, recitals, articles, nested enumerations, annexes, and quoted
//! amendment blocks.
//!
//! # Example
//!
//! ```
//! use eurlex_harvester::{config, formex};
//!
//! // Validate a CELEX number
//! assert!(config::validate_celex("32024R1183").is_ok());
//!
//! // Convert Formex XML to Markdown
//! let xml = "<ACT><TITLE><TI><P>Test Regulation</P></TI></TITLE></ACT>";
//! let markdown = formex::convert_str(xml).unwrap();
//! assert!(markdown.starts_with("# Test Regulation"));
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client with retry and backoff
//! - [`notice`]: EUR-Lex notice resolution to cellar URLs
//! - [`content`]: Formex ZIP downloading and extraction
//! - [`formex`]: The structural converter (XML tree to Markdown)
//! - [`lint`]: Markdown lint diagnostics
//! - [`manifest`]: Batch manifest handling
//! - [`writer`]: Markdown output writing
//! - [`xml`]: XML utilities
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod formex;
pub mod harvester;
pub mod http;
pub mod lint;
pub mod manifest;
pub mod notice;
pub mod writer;
pub mod xml;

// Re-export main functions
pub use harvester::{download_document, harvest};

// Re-export commonly used items
pub use config::validate_celex;
pub use error::{HarvesterError, Result};
pub use formex::{convert, convert_str};
