//! Configuration management for packmorph
//!
//! Settings load from environment variables with sensible defaults, so the
//! tool can run unconfigured inside a CI step and still be overridden per
//! invocation through CLI flags (flags win over environment).
//!
//! # Environment Variables
//!
//! - `PACKMORPH_CONTENTS_DIR`: Working directory holding the package zip or
//!   extracted tree - default: current directory
//! - `PACKMORPH_REPO_NAME`: Target repository name used as the replacement
//!   token during conversion - no default
//! - `PACKMORPH_PAGE_PATHS`: Comma-separated path list supplied by an
//!   upstream step; when set, classification skips re-parsing the manifest
//! - `PACKMORPH_POLICY`: Classifier policy (strict|permissive) - default:
//!   "permissive"
//! - `PACKMORPH_LOG_LEVEL`: Logging level - default: "info"

use crate::classify::Policy;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for packmorph
///
/// Constructed with `Default::default()`, which loads from `PACKMORPH_*`
/// environment variables with fallback defaults. CLI handlers overlay
/// flag values on top before validating.
#[derive(Debug, Clone)]
pub struct PackmorphConfig {
    /// Directory containing the package zip or extracted tree
    pub contents_dir: PathBuf,

    /// Target repository name (required for conversion only)
    pub repo_name: Option<String>,

    /// Pre-extracted path list from an upstream step, if any
    pub page_paths: Option<Vec<String>>,

    /// Classifier policy
    pub policy: Policy,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for PackmorphConfig {
    fn default() -> Self {
        let contents_dir = env::var("PACKMORPH_CONTENTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let repo_name = env::var("PACKMORPH_REPO_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let page_paths = env::var("PACKMORPH_PAGE_PATHS")
            .ok()
            .map(|s| split_page_paths(&s))
            .filter(|paths| !paths.is_empty());

        let policy = env::var("PACKMORPH_POLICY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let log_level = env::var("PACKMORPH_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            contents_dir,
            repo_name,
            page_paths,
            policy,
            log_level,
        }
    }
}

impl PackmorphConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the log level is unknown or the repository
    /// name cannot be used as a path segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        if let Some(name) = &self.repo_name {
            // The name becomes a folder name and a manifest path segment.
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "Repository name must not be empty".to_string(),
                ));
            }
            if name.contains(['/', '\\']) || name.contains(char::is_whitespace) {
                return Err(ConfigError::ValidationFailed(format!(
                    "Repository name must not contain slashes or whitespace: {:?}",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for PackmorphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Packmorph Configuration:")?;
        writeln!(f, "  Contents Dir: {}", self.contents_dir.display())?;
        writeln!(
            f,
            "  Repo Name: {}",
            self.repo_name.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            f,
            "  Page Paths Override: {}",
            self.page_paths
                .as_ref()
                .map(|p| p.len().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;
        writeln!(f, "  Policy: {}", self.policy)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

/// Splits a comma-separated path list, dropping empty segments
pub fn split_page_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
