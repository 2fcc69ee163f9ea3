//! Vault filter manifest access
//!
//! The filter manifest (`META-INF/vault/filter.xml`) is the only file the
//! detector needs to read: it enumerates the content paths a package claims.
//! This module locates the manifest inside either source kind and parses it.

pub mod parser;

pub use parser::extract_filter_paths;

use crate::error::PipelineError;
use crate::package::PackageSource;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Location of the filter manifest inside a content package
pub const FILTER_MANIFEST_PATH: &str = "META-INF/vault/filter.xml";

/// A parsed filter manifest: the raw text plus the extracted path entries
///
/// The raw text is kept so a later rewrite can preserve everything the
/// parser did not care about.
#[derive(Debug, Clone)]
pub struct FilterManifest {
    pub text: String,
    pub paths: Vec<String>,
}

impl FilterManifest {
    /// Parses manifest text into path entries
    pub fn parse(text: String) -> Self {
        let paths = extract_filter_paths(&text);
        Self { text, paths }
    }

    /// Reads and parses the filter manifest from a package source
    ///
    /// For an archive source the manifest is read straight out of the zip
    /// without extracting the rest of the package. For a tree source it is
    /// read from disk.
    ///
    /// # Errors
    ///
    /// `ManifestNotFound` when the manifest does not exist in either
    /// location, `ManifestUnreadable` when reading it fails.
    pub fn read_from(source: &PackageSource) -> Result<Self, PipelineError> {
        let text = match source {
            PackageSource::Archive(zip_path) => read_from_archive(zip_path)?,
            PackageSource::Tree(dir) => read_from_tree(dir)?,
        };

        let manifest = Self::parse(text);
        debug!(
            source = %source.path().display(),
            paths = manifest.paths.len(),
            "Parsed filter manifest"
        );
        Ok(manifest)
    }
}

fn read_from_archive(zip_path: &Path) -> Result<String, PipelineError> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut entry = match archive.by_name(FILTER_MANIFEST_PATH) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(PipelineError::ManifestNotFound(zip_path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|source| PipelineError::ManifestUnreadable {
            path: zip_path.join(FILTER_MANIFEST_PATH),
            source,
        })?;
    Ok(text)
}

fn read_from_tree(dir: &Path) -> Result<String, PipelineError> {
    let manifest_path = dir.join(FILTER_MANIFEST_PATH);
    if !manifest_path.is_file() {
        return Err(PipelineError::ManifestNotFound(dir.to_path_buf()));
    }

    fs::read_to_string(&manifest_path).map_err(|source| PipelineError::ManifestUnreadable {
        path: manifest_path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workspaceFilter version="1.0">
    <filter root="/content/sta-xwalk-boilerplate/tools"/>
    <filter root="/content/sta-xwalk-boilerplate/block-collection"/>
</workspaceFilter>"#;

    fn write_zip_with_manifest(dir: &Path, manifest: Option<&str>) -> std::path::PathBuf {
        let zip_path = dir.join("package.zip");
        let file = fs::File::create(&zip_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        if let Some(text) = manifest {
            writer.start_file(FILTER_MANIFEST_PATH, options).unwrap();
            writer.write_all(text.as_bytes()).unwrap();
        }
        writer.start_file("jcr_root/content/.content.xml", options).unwrap();
        writer.write_all(b"<jcr:root/>").unwrap();
        writer.finish().unwrap();
        zip_path
    }

    #[test]
    fn test_read_from_tree() {
        let temp = TempDir::new().unwrap();
        let vault = temp.path().join("META-INF/vault");
        fs::create_dir_all(&vault).unwrap();
        fs::write(vault.join("filter.xml"), MANIFEST).unwrap();

        let source = PackageSource::Tree(temp.path().to_path_buf());
        let manifest = FilterManifest::read_from(&source).unwrap();

        assert_eq!(manifest.paths.len(), 2);
        assert_eq!(manifest.text, MANIFEST);
    }

    #[test]
    fn test_read_from_tree_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let source = PackageSource::Tree(temp.path().to_path_buf());

        let result = FilterManifest::read_from(&source);
        assert!(matches!(result, Err(PipelineError::ManifestNotFound(_))));
    }

    #[test]
    fn test_read_from_archive() {
        let temp = TempDir::new().unwrap();
        let zip_path = write_zip_with_manifest(temp.path(), Some(MANIFEST));

        let source = PackageSource::Archive(zip_path);
        let manifest = FilterManifest::read_from(&source).unwrap();

        assert_eq!(
            manifest.paths,
            vec![
                "/content/sta-xwalk-boilerplate/tools",
                "/content/sta-xwalk-boilerplate/block-collection",
            ]
        );
    }

    #[test]
    fn test_read_from_archive_missing_manifest() {
        let temp = TempDir::new().unwrap();
        let zip_path = write_zip_with_manifest(temp.path(), None);

        let source = PackageSource::Archive(zip_path);
        let result = FilterManifest::read_from(&source);
        assert!(matches!(result, Err(PipelineError::ManifestNotFound(_))));
    }
}
