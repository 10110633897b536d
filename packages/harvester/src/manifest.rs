//! Batch manifest (documents.yaml).
//!
//! The batch pipeline is fully deterministic: every document it touches
//! comes from the manifest, keyed by CELEX number with a pre-discovered
//! cellar identifier. A missing cellar id is a hard error with
//! instructions, not a silent skip.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::cellar_url;
use crate::error::{HarvesterError, Result};

/// One document in the batch manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// CELEX number (e.g., "32024R1183").
    pub celex: String,

    /// Human-readable slug (e.g., "2024_1183_eIDAS2_Amending").
    pub name: String,

    /// Cellar identifier of the Formex ZIP, discovered once and pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cellar_id: Option<String>,

    /// Output directory relative to the batch output root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl DocumentEntry {
    /// Cellar URL for this entry.
    ///
    /// # Errors
    /// Returns `MissingCellarId` when the manifest has no pinned id.
    pub fn cellar_url(&self) -> Result<String> {
        self.cellar_id
            .as_deref()
            .map(cellar_url)
            .ok_or_else(|| HarvesterError::MissingCellarId(self.celex.clone()))
    }
}

/// The full batch manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Documents to process, in order.
    pub documents: Vec<DocumentEntry>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    ///
    /// # Errors
    /// Returns an IO error if the file is unreadable, or a manifest error
    /// if the YAML does not match the schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Find an entry by CELEX number.
    #[must_use]
    pub fn find(&self, celex: &str) -> Option<&DocumentEntry> {
        self.documents.iter().find(|d| d.celex == celex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
documents:
  - celex: 32024R1183
    name: 2024_1183_eIDAS2_Amending
    cellar_id: a49e0d36-0d85-11ef-a251-01aa75ed71a1.0006.02
    output_dir: 01_regulation
  - celex: 32024R2979
    name: 2024_2979_Integrity_Core_Functions
"#;

    #[test]
    fn test_manifest_parses() {
        let manifest: Manifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.documents.len(), 2);
        assert_eq!(manifest.documents[0].celex, "32024R1183");
        assert_eq!(
            manifest.documents[0].output_dir.as_deref(),
            Some("01_regulation")
        );
        assert!(manifest.documents[1].cellar_id.is_none());
    }

    #[test]
    fn test_manifest_find() {
        let manifest: Manifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        assert!(manifest.find("32024R2979").is_some());
        assert!(manifest.find("32099R0001").is_none());
    }

    #[test]
    fn test_cellar_url_with_id() {
        let manifest: Manifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        let url = manifest.documents[0].cellar_url().unwrap();
        assert_eq!(
            url,
            "http://publications.europa.eu/resource/cellar/a49e0d36-0d85-11ef-a251-01aa75ed71a1.0006.02"
        );
    }

    #[test]
    fn test_cellar_url_missing_id() {
        let manifest: Manifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        let err = manifest.documents[1].cellar_url().unwrap_err();
        assert!(matches!(err, HarvesterError::MissingCellarId(_)));
        assert!(err.to_string().contains("32024R2979"));
    }

    #[test]
    fn test_manifest_round_trip() {
        let manifest: Manifest = serde_yaml_ng::from_str(SAMPLE).unwrap();
        let yaml = serde_yaml_ng::to_string(&manifest).unwrap();
        let reparsed: Manifest = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(manifest, reparsed);
    }

    #[test]
    fn test_manifest_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.documents.len(), 2);
    }

    #[test]
    fn test_manifest_load_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/documents.yaml")).unwrap_err();
        assert!(matches!(err, HarvesterError::Io(_)));
    }
}
