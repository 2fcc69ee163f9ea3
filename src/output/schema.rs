//! Conversion report schema
//!
//! The report is the single structure handed back to the calling CI pipeline.
//! Every run produces one, including failed runs: a failure populates
//! `error_message` instead of aborting the process, so the pipeline can
//! branch on outputs rather than exit codes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a detect or convert run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Whether the package was classified as the boilerplate template
    pub is_boilerplate: bool,

    /// Path of the located package (archive or extracted tree)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_package_path: Option<PathBuf>,

    /// Paths declared by the original filter manifest
    pub page_paths: Vec<String>,

    /// Path of the converted archive, set only after a conversion ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_package_path: Option<PathBuf>,

    /// Manifest paths after placeholder substitution
    pub converted_page_paths: Vec<String>,

    /// Set instead of raising when the pipeline fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Wall-clock time of the run in milliseconds
    pub processing_time_ms: u64,
}

impl ConversionReport {
    /// Builds a failure report carrying only the error message
    pub fn failed(message: String) -> Self {
        Self {
            error_message: Some(message),
            ..Self::default()
        }
    }

    /// Flattens the report into CI key/value outputs
    ///
    /// `page_paths` is comma-joined and `converted_page_paths` is a JSON
    /// array string, matching what downstream workflow steps expect.
    pub fn ci_outputs(&self) -> Vec<(&'static str, String)> {
        let converted_json =
            serde_json::to_string(&self.converted_page_paths).unwrap_or_else(|_| "[]".to_string());

        vec![
            ("is_boilerplate", self.is_boilerplate.to_string()),
            (
                "content_package_path",
                self.content_package_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            ("page_paths", self.page_paths.join(",")),
            (
                "converted_package_path",
                self.converted_package_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            ("converted_page_paths", converted_json),
            (
                "error_message",
                self.error_message.clone().unwrap_or_default(),
            ),
        ]
    }
}
