//! Formex archive downloading and extraction.
//!
//! The cellar serves a ZIP of Formex XML files per act. The main document
//! carries `.000` in its member name; annex and cover files follow.

use std::io::{Cursor, Read};

use reqwest::blocking::Client;
use zip::ZipArchive;

use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, download_bytes_accept};

/// Download the Formex ZIP for a CELEX number from its cellar URL.
///
/// # Errors
/// Returns `FormexDownload` with context when the request fails.
pub fn download_formex_zip(client: &Client, celex: &str, cellar_url: &str) -> Result<Vec<u8>> {
    download_bytes_accept(client, cellar_url, Some("application/zip")).map_err(|e| {
        if let HarvesterError::Http(source) = e {
            HarvesterError::FormexDownload {
                celex: celex.to_string(),
                source,
            }
        } else {
            e
        }
    })
}

/// Extract the main document XML from a Formex ZIP.
///
/// Prefers the lowest-numbered member carrying the `.000` main-document
/// convention (annex files number higher); falls back to the first XML
/// member.
///
/// # Errors
/// Returns `EmptyArchive` when the ZIP holds no XML member, or a ZIP
/// error when the archive is unreadable.
pub fn extract_main_xml(zip_bytes: &[u8], celex: &str) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;

    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    let main_name = names
        .iter()
        .find(|name| name.ends_with(".xml") && name.contains(".000"))
        .or_else(|| names.iter().find(|name| name.ends_with(".xml")))
        .cloned()
        .ok_or_else(|| HarvesterError::EmptyArchive(celex.to_string()))?;

    tracing::debug!(celex, member = %main_name, "Extracting main document");

    let mut file = archive.by_name(&main_name)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    Ok(bytes_to_string(&bytes, &format!("Formex XML for {celex}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(members: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in members {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_main_xml_prefers_000_member() {
        let zip = build_zip(&[
            ("L_202401183EN.000201.fmx.xml", "<ANNEX/>"),
            ("L_202401183EN.000101.fmx.xml", "<ACT/>"),
        ]);
        let xml = extract_main_xml(&zip, "32024R1183").unwrap();
        // The lowest-numbered document is the act itself.
        assert_eq!(xml, "<ACT/>");
    }

    #[test]
    fn test_extract_main_xml_fallback_first_xml() {
        let zip = build_zip(&[("readme.txt", "not xml"), ("doc.fmx.xml", "<ACT/>")]);
        let xml = extract_main_xml(&zip, "32024R1183").unwrap();
        assert_eq!(xml, "<ACT/>");
    }

    #[test]
    fn test_extract_main_xml_empty_archive() {
        let zip = build_zip(&[("readme.txt", "not xml")]);
        let err = extract_main_xml(&zip, "32024R1183").unwrap_err();
        assert!(matches!(err, HarvesterError::EmptyArchive(_)));
    }

    #[test]
    fn test_extract_main_xml_garbage_bytes() {
        let err = extract_main_xml(b"not a zip at all", "32024R1183").unwrap_err();
        assert!(matches!(err, HarvesterError::ZipExtract(_)));
    }
}
