//! Pipeline error types
//!
//! Every fatal condition the detection/conversion pipeline can hit maps to a
//! variant here. Handlers catch these at the top level and report them through
//! the `error_message` output so the calling CI pipeline can branch on results
//! instead of exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, detecting, or converting a package
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Working directory is missing, or contains neither a zip archive nor
    /// an extracted `jcr_root`/`META-INF` tree
    #[error("No content package found in: {0}")]
    InputNotFound(PathBuf),

    /// Package has no `META-INF/vault/filter.xml`
    #[error("Filter manifest not found in package: {0}")]
    ManifestNotFound(PathBuf),

    /// Manifest exists but could not be read
    #[error("Failed to read filter manifest {path}: {source}")]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Conversion was requested without a target repository name
    #[error("Repository name is required for conversion")]
    RepositoryNameMissing,

    /// Converted archive could not be staged or written
    #[error("Failed to repackage content: {0}")]
    Repackage(String),

    /// Archive could not be opened or extracted
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            PipelineError::InputNotFound(path) => {
                format!(
                    "Error: No content package found\nPath: {}\n\n\
                    Help: The working directory must contain either:\n\
                    - a content package zip archive, or\n\
                    - an already-extracted tree with jcr_root/ and META-INF/ directories\n\n\
                    Check that the upstream step downloaded or extracted the package here.",
                    path.display()
                )
            }
            PipelineError::ManifestNotFound(path) => {
                format!(
                    "Error: Filter manifest not found\nPackage: {}\n\n\
                    Help: A content package must carry META-INF/vault/filter.xml.\n\
                    This file is not a valid content package without it.",
                    path.display()
                )
            }
            PipelineError::ManifestUnreadable { path, source } => {
                format!(
                    "Error: Filter manifest could not be read\nPath: {}\n\n\
                    Help: The manifest exists but reading it failed. Check file\n\
                    permissions and that the archive is not corrupted.\n\n\
                    Details: {}",
                    path.display(),
                    source
                )
            }
            PipelineError::RepositoryNameMissing => {
                "Error: Repository name missing\n\n\
                Help: Conversion needs a target repository name. Provide it via\n\
                --repo-name or the PACKMORPH_REPO_NAME environment variable."
                    .to_string()
            }
            PipelineError::Repackage(msg) => {
                format!(
                    "Error: Failed to repackage content\n\n\
                    Help: Writing the converted archive failed. Check free disk\n\
                    space and write permissions on the working directory.\n\n\
                    Details: {}",
                    msg
                )
            }
            PipelineError::Archive(err) => {
                format!(
                    "Error: Archive error\n\n\
                    Help: The package zip could not be opened or extracted.\n\
                    It may be truncated or not a zip archive at all.\n\n\
                    Details: {}",
                    err
                )
            }
            PipelineError::Io(err) => {
                format!(
                    "Error: I/O error\n\n\
                    Help: A filesystem operation failed. Check permissions and\n\
                    available disk space.\n\n\
                    Details: {}",
                    err
                )
            }
        }
    }
}
