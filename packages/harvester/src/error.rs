//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid CELEX number format.
    #[error("Invalid CELEX number: '{0}'. Expected sector, year, type and number (e.g., 32024R1183)")]
    InvalidCelex(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the EUR-Lex notice.
    #[error("Failed to download notice for {celex}: {source}")]
    NoticeDownload {
        celex: String,
        #[source]
        source: reqwest::Error,
    },

    /// Failed to download the Formex archive.
    #[error("Failed to download Formex archive for {celex}: {source}")]
    FormexDownload {
        celex: String,
        #[source]
        source: reqwest::Error,
    },

    /// The notice does not reference a Formex edition.
    #[error("No Formex manifest found in notice for {0}")]
    FormexNotFound(String),

    /// The Formex archive contains no XML document.
    #[error("No XML document found in Formex archive for {0}")]
    EmptyArchive(String),

    /// All retry attempts failed.
    #[error("Retries exhausted after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// A batch manifest entry is missing its cellar id.
    #[error("Missing cellar_id for {0}; run discovery and update the manifest")]
    MissingCellarId(String),

    /// Lint found blocking issues.
    #[error("Lint found {0} error(s)")]
    LintErrors(usize),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// ZIP archive reading failed.
    #[error("ZIP extraction failed: {0}")]
    ZipExtract(#[from] zip::result::ZipError),

    /// YAML manifest parsing failed.
    #[error("Manifest parsing failed: {0}")]
    Manifest(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
