//! EUR-Lex notice resolution.
//!
//! The XML notice for a CELEX number references the Formex (FMX4) edition
//! of the act. Resolution runs in two hops: the notice names an Official
//! Journal manifest (`…ENG.fmx4`), and that manifest names the cellar
//! resource holding the Formex ZIP.

use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;

use crate::config::{cellar_url, notice_url, oj_formex_url};
use crate::error::{HarvesterError, Result};
use crate::http::{bytes_to_string, download_bytes};

/// Official Journal Formex manifest reference inside a notice.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FMX4_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"resource/oj/([A-Z]_\d+)\.ENG\.fmx4").expect("valid regex"));

/// Cellar resource identifier inside a manifest.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CELLAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"resource/cellar/([0-9a-f-]+\.\d+(?:\.\d+)?)").expect("valid regex")
});

/// Download the XML notice for a CELEX number.
///
/// # Errors
/// Returns `NoticeDownload` with context when the request fails.
pub fn download_notice(client: &Client, celex: &str) -> Result<String> {
    let url = notice_url(celex);
    let bytes = download_bytes(client, &url).map_err(|e| {
        if let HarvesterError::Http(source) = e {
            HarvesterError::NoticeDownload {
                celex: celex.to_string(),
                source,
            }
        } else {
            e
        }
    })?;

    Ok(bytes_to_string(&bytes, &format!("notice for {celex}")))
}

/// Extract the Official Journal reference from notice content.
pub fn find_oj_reference(notice: &str) -> Option<String> {
    FMX4_PATTERN
        .captures(notice)
        .map(|caps| caps[1].to_string())
}

/// Extract the cellar identifier from manifest content.
pub fn find_cellar_id(manifest: &str) -> Option<String> {
    CELLAR_PATTERN
        .captures(manifest)
        .map(|caps| caps[1].to_string())
}

/// Resolve the cellar URL of the Formex ZIP for a CELEX number.
///
/// # Errors
/// Returns `FormexNotFound` if either hop yields no reference, or a
/// download error from the underlying requests.
pub fn resolve_formex_url(client: &Client, celex: &str) -> Result<String> {
    let notice = download_notice(client, celex)?;

    let oj_ref = find_oj_reference(&notice)
        .ok_or_else(|| HarvesterError::FormexNotFound(celex.to_string()))?;
    tracing::debug!(celex, %oj_ref, "Found Formex manifest reference");

    let manifest_bytes = download_bytes(client, &oj_formex_url(&oj_ref))?;
    let manifest = bytes_to_string(&manifest_bytes, &format!("Formex manifest for {celex}"));

    let cellar_id = find_cellar_id(&manifest)
        .ok_or_else(|| HarvesterError::FormexNotFound(celex.to_string()))?;
    tracing::debug!(celex, %cellar_id, "Resolved cellar resource");

    Ok(cellar_url(&cellar_id))
}
