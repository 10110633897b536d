//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Base URL for EUR-Lex legal content (English).
pub const EURLEX_BASE_URL: &str = "https://eur-lex.europa.eu/legal-content/EN";

/// Base URL for Official Journal resources on the Publications Office.
pub const OJ_BASE_URL: &str = "http://publications.europa.eu/resource/oj";

/// Base URL for cellar resources on the Publications Office.
pub const CELLAR_BASE_URL: &str = "http://publications.europa.eu/resource/cellar";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large Formex archives and slow
/// responses while the Publications Office assembles a document.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// CELEX pattern: sector digit, 4-digit year, document type letter(s),
/// 4-digit number (e.g., 32024R1183, 32025D0849).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CELEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{4}[A-Z]{1,2}\d{4}$").expect("valid regex"));

/// Validate CELEX number format.
///
/// # Arguments
/// * `celex` - The CELEX number to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(HarvesterError::InvalidCelex)` if invalid
///
/// # Examples
/// ```
/// use eurlex_harvester::config::validate_celex;
///
/// assert!(validate_celex("32024R1183").is_ok());
/// assert!(validate_celex("32025D0849").is_ok());
/// assert!(validate_celex("INVALID").is_err());
/// ```
pub fn validate_celex(celex: &str) -> Result<()> {
    if CELEX_PATTERN.is_match(celex) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidCelex(celex.to_string()))
    }
}

/// Build the XML notice URL for a CELEX number.
///
/// # Panics
/// Debug builds panic if `celex` doesn't match the expected format.
pub fn notice_url(celex: &str) -> String {
    debug_assert!(
        CELEX_PATTERN.is_match(celex),
        "celex should be validated before calling notice_url"
    );
    format!("{EURLEX_BASE_URL}/TXT/XML/?uri=CELEX:{celex}")
}

/// Build the public EUR-Lex page URL for a CELEX number.
pub fn eurlex_url(celex: &str) -> String {
    format!("{EURLEX_BASE_URL}/TXT/?uri=CELEX:{celex}")
}

/// Build the Formex manifest URL for an Official Journal reference
/// (e.g., "L_202401183").
pub fn oj_formex_url(oj_ref: &str) -> String {
    format!("{OJ_BASE_URL}/{oj_ref}.ENG.fmx4")
}

/// Build the cellar resource URL for a cellar identifier.
pub fn cellar_url(cellar_id: &str) -> String {
    format!("{CELLAR_BASE_URL}/{cellar_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_celex_valid() {
        assert!(validate_celex("32024R1183").is_ok());
        assert!(validate_celex("32024R2979").is_ok());
        assert!(validate_celex("32025D0849").is_ok());
        assert!(validate_celex("32019PC0010").is_ok()); // two-letter type
    }

    #[test]
    fn test_validate_celex_invalid() {
        assert!(validate_celex("").is_err());
        assert!(validate_celex("32024R118").is_err()); // 3-digit number
        assert!(validate_celex("32024r1183").is_err()); // lowercase type
        assert!(validate_celex("02024R1183").is_err()); // zero sector
        assert!(validate_celex("32024R11833").is_err()); // 5-digit number
        assert!(validate_celex("3202R1183").is_err()); // short year
    }

    #[test]
    fn test_notice_url() {
        assert_eq!(
            notice_url("32024R1183"),
            "https://eur-lex.europa.eu/legal-content/EN/TXT/XML/?uri=CELEX:32024R1183"
        );
    }

    #[test]
    fn test_eurlex_url() {
        assert_eq!(
            eurlex_url("32024R1183"),
            "https://eur-lex.europa.eu/legal-content/EN/TXT/?uri=CELEX:32024R1183"
        );
    }

    #[test]
    fn test_oj_formex_url() {
        assert_eq!(
            oj_formex_url("L_202401183"),
            "http://publications.europa.eu/resource/oj/L_202401183.ENG.fmx4"
        );
    }

    #[test]
    fn test_cellar_url() {
        assert_eq!(
            cellar_url("a49e0d36-0d85-11ef-a251-01aa75ed71a1.0006.02"),
            "http://publications.europa.eu/resource/cellar/a49e0d36-0d85-11ef-a251-01aa75ed71a1.0006.02"
        );
    }
}
