//! Converted package repackaging
//!
//! Copies the relevant package subtrees into a scoped staging directory and
//! compresses them into a fresh zip archive. Staging space is always removed,
//! on failure as well as success; a failed removal is only a warning and never
//! masks the primary result.

use crate::error::PipelineError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// The two subtrees a content package consists of
pub const PACKAGE_SUBTREES: [&str; 2] = ["jcr_root", "META-INF"];

/// Recursively copies a directory tree
pub(crate) fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under its root");
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Repackages a post-rewrite tree into a new zip archive
///
/// Copies `jcr_root/` and `META-INF/` from `tree` into a fresh staging
/// directory, compresses the staged content at maximum deflate compression
/// into `dest_dir/archive_name`, and returns the archive path.
///
/// # Errors
///
/// `PipelineError::Repackage` when staging or writing the archive fails.
pub fn repackage(
    tree: &Path,
    dest_dir: &Path,
    archive_name: &str,
) -> Result<PathBuf, PipelineError> {
    let staging = TempDir::new()
        .map_err(|e| PipelineError::Repackage(format!("failed to create staging dir: {}", e)))?;

    let stage_result = stage_subtrees(tree, staging.path())
        .and_then(|_| write_archive(staging.path(), &dest_dir.join(archive_name)));

    // Cleanup happens regardless of outcome; a failure here is non-fatal.
    if let Err(err) = staging.close() {
        warn!(error = %err, "Failed to remove staging directory");
    }

    let archive_path = stage_result?;

    let size_bytes = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
    info!(
        archive = %archive_path.display(),
        size_bytes,
        "Wrote converted package archive"
    );

    Ok(archive_path)
}

fn stage_subtrees(tree: &Path, staging: &Path) -> Result<(), PipelineError> {
    for subtree in PACKAGE_SUBTREES {
        let src = tree.join(subtree);
        if src.is_dir() {
            copy_tree(&src, &staging.join(subtree)).map_err(|e| {
                PipelineError::Repackage(format!("failed to stage {}: {}", subtree, e))
            })?;
        }
    }
    Ok(())
}

fn write_archive(staging: &Path, archive_path: &Path) -> Result<PathBuf, PipelineError> {
    let file = fs::File::create(archive_path).map_err(|e| {
        PipelineError::Repackage(format!("failed to create {}: {}", archive_path.display(), e))
    })?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    for entry in WalkDir::new(staging).min_depth(1) {
        let entry = entry.map_err(|e| PipelineError::Repackage(e.to_string()))?;
        let rel = entry
            .path()
            .strip_prefix(staging)
            .expect("walkdir yields paths under its root");
        // Zip entry names always use forward slashes.
        let name = rel.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| PipelineError::Repackage(e.to_string()))?;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| PipelineError::Repackage(e.to_string()))?;
            let mut source = fs::File::open(entry.path())
                .map_err(|e| PipelineError::Repackage(e.to_string()))?;
            io::copy(&mut source, &mut writer)
                .map_err(|e| PipelineError::Repackage(e.to_string()))?;
        }
    }

    writer
        .finish()
        .map_err(|e| PipelineError::Repackage(e.to_string()))?;

    Ok(archive_path.to_path_buf())
}
