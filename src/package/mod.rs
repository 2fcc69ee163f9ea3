//! Package source location
//!
//! A content package shows up in the working directory either as a zip
//! archive or as an already-extracted `jcr_root`/`META-INF` tree, depending
//! on what the upstream CI step produced. This module figures out which one
//! is present and can materialize either into a scratch directory for
//! conversion.

use crate::error::PipelineError;
use crate::repackage::{copy_tree, PACKAGE_SUBTREES};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A located content package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A content package zip archive
    Archive(PathBuf),
    /// An extracted tree containing `jcr_root/` and `META-INF/`
    Tree(PathBuf),
}

impl PackageSource {
    /// Locates the content package inside a working directory
    ///
    /// A zip archive takes precedence over an extracted tree; when several
    /// zips are present the lexicographically first one is used so repeated
    /// runs are deterministic.
    ///
    /// # Errors
    ///
    /// `InputNotFound` when the directory is missing or contains neither
    /// source kind.
    pub fn locate(dir: &Path) -> Result<Self, PipelineError> {
        if !dir.is_dir() {
            return Err(PipelineError::InputNotFound(dir.to_path_buf()));
        }

        let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("zip"))
                        .unwrap_or(false)
            })
            .collect();
        archives.sort();

        if let Some(archive) = archives.into_iter().next() {
            debug!(archive = %archive.display(), "Located package archive");
            return Ok(PackageSource::Archive(archive));
        }

        if PACKAGE_SUBTREES
            .iter()
            .all(|subtree| dir.join(subtree).is_dir())
        {
            debug!(tree = %dir.display(), "Located extracted package tree");
            return Ok(PackageSource::Tree(dir.to_path_buf()));
        }

        Err(PipelineError::InputNotFound(dir.to_path_buf()))
    }

    /// Path of the located source (archive file or tree root)
    pub fn path(&self) -> &Path {
        match self {
            PackageSource::Archive(path) => path,
            PackageSource::Tree(path) => path,
        }
    }

    /// Materializes the package content into `dest`
    ///
    /// Archives are extracted in full; trees have their `jcr_root/` and
    /// `META-INF/` subtrees copied. The original source is never modified,
    /// so conversion always operates on a scratch copy.
    pub fn materialize(&self, dest: &Path) -> Result<(), PipelineError> {
        match self {
            PackageSource::Archive(zip_path) => {
                let file = fs::File::open(zip_path)?;
                let mut archive = zip::ZipArchive::new(file)?;
                archive.extract(dest)?;
            }
            PackageSource::Tree(dir) => {
                for subtree in PACKAGE_SUBTREES {
                    let src = dir.join(subtree);
                    if src.is_dir() {
                        copy_tree(&src, &dest.join(subtree))?;
                    }
                }
            }
        }
        Ok(())
    }
}
