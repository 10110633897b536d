//! Main harvester service that ties all components together.

use reqwest::blocking::Client;

use crate::config::validate_celex;
use crate::content::{download_formex_zip, extract_main_xml};
use crate::error::Result;
use crate::formex;
use crate::http::create_client;
use crate::notice::resolve_formex_url;

/// Download the Formex XML of an act.
///
/// Resolves the notice, fetches the Formex ZIP from the cellar, and
/// extracts the main document.
///
/// # Arguments
/// * `celex` - The CELEX number (e.g., "32024R1183")
///
/// # Errors
/// Returns an error on an invalid CELEX number, download failure, or an
/// archive without a usable XML member.
pub fn download_document(celex: &str) -> Result<String> {
    validate_celex(celex)?;
    let client = create_client()?;
    download_document_with(&client, celex, None)
}

/// Download the Formex XML of an act using an existing client.
///
/// When `cellar_url` is given (from a pinned manifest entry) the notice
/// resolution round trips are skipped.
///
/// # Errors
/// Same failure modes as [`download_document`].
pub fn download_document_with(
    client: &Client,
    celex: &str,
    cellar_url: Option<&str>,
) -> Result<String> {
    let url = match cellar_url {
        Some(url) => url.to_string(),
        None => resolve_formex_url(client, celex)?,
    };
    let zip_bytes = download_formex_zip(client, celex, &url)?;
    extract_main_xml(&zip_bytes, celex)
}

/// Download an act and convert it to Markdown.
///
/// # Errors
/// Returns an error on download failure or malformed XML.
pub fn harvest(celex: &str) -> Result<String> {
    let xml = download_document(celex)?;
    formex::convert_str(&xml)
}
