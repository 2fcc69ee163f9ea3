//! Conversion pipeline orchestration
//!
//! `ConversionService` drives the whole flow: locate the package source,
//! extract the filter manifest, classify, and (for conversion) rewrite,
//! rename, and repackage. Each step strictly follows the previous one; there
//! are no retries. Rewrite, rename, and repackage together form one
//! best-effort unit: a failure anywhere in it reports the run as failed even
//! though earlier steps already touched the staging copy.
//!
//! Two invariants the steps must uphold:
//! - classification always uses the original, unmodified manifest
//! - the located source is never mutated; conversion works on a staged copy

use crate::classify::is_boilerplate;
use crate::config::PackmorphConfig;
use crate::error::PipelineError;
use crate::manifest::{FilterManifest, FILTER_MANIFEST_PATH};
use crate::output::ConversionReport;
use crate::package::PackageSource;
use crate::repackage::repackage;
use crate::rewrite::{rename_tree, rewrite_manifest, rewrite_paths};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tempfile::TempDir;
use tracing::{info, warn};

/// High-level service running the detect / convert pipeline
#[derive(Debug)]
pub struct ConversionService {
    config: PackmorphConfig,
}

impl ConversionService {
    /// Creates a new service from configuration
    pub fn new(config: PackmorphConfig) -> Self {
        Self { config }
    }

    /// Detects whether the working directory holds a boilerplate package
    ///
    /// Locates the package, extracts its declared paths (or uses the
    /// configured `page_paths` override from an upstream step), and
    /// classifies them. No files are modified.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError` when the package or its manifest cannot be
    /// located or read.
    pub async fn detect(&self) -> Result<ConversionReport, PipelineError> {
        let start = Instant::now();

        let source = PackageSource::locate(&self.config.contents_dir)?;
        let paths = self.declared_paths(&source)?;
        let boilerplate = is_boilerplate(&paths, self.config.policy);

        info!(
            package = %source.path().display(),
            paths = paths.len(),
            policy = %self.config.policy,
            is_boilerplate = boilerplate,
            "Detection completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(ConversionReport {
            is_boilerplate: boilerplate,
            content_package_path: Some(source.path().to_path_buf()),
            page_paths: paths,
            processing_time_ms: start.elapsed().as_millis() as u64,
            ..ConversionReport::default()
        })
    }

    /// Detects and, for a boilerplate package, converts it for the target
    /// repository
    ///
    /// A non-boilerplate package is a successful no-op: the report carries
    /// `is_boilerplate: false` and no conversion outputs. For a boilerplate
    /// package the source is materialized into a staging directory, the
    /// manifest rewritten, the content folders renamed, and the result
    /// repackaged as `{repo_name}.zip` next to the source.
    ///
    /// # Errors
    ///
    /// `RepositoryNameMissing` when no repository name is configured, plus
    /// every error `detect` can produce, plus `Repackage` when writing the
    /// converted archive fails.
    pub async fn convert(&self) -> Result<ConversionReport, PipelineError> {
        let start = Instant::now();

        let repo_name = self
            .config
            .repo_name
            .clone()
            .ok_or(PipelineError::RepositoryNameMissing)?;

        let source = PackageSource::locate(&self.config.contents_dir)?;
        // Classification reads the manifest as shipped; rewriting only ever
        // happens on the staged copy below.
        let manifest = FilterManifest::read_from(&source)?;
        let paths = match &self.config.page_paths {
            Some(supplied) => supplied.clone(),
            None => manifest.paths.clone(),
        };

        if !is_boilerplate(&paths, self.config.policy) {
            info!(
                package = %source.path().display(),
                "Package is not a boilerplate template, nothing to convert"
            );
            return Ok(ConversionReport {
                is_boilerplate: false,
                content_package_path: Some(source.path().to_path_buf()),
                page_paths: paths,
                processing_time_ms: start.elapsed().as_millis() as u64,
                ..ConversionReport::default()
            });
        }

        info!(
            package = %source.path().display(),
            repo_name = %repo_name,
            "Converting boilerplate package"
        );

        let archive_path = self.run_conversion(&source, &manifest, &repo_name)?;
        let converted_paths = rewrite_paths(&paths, &repo_name);

        info!(
            archive = %archive_path.display(),
            "Conversion completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(ConversionReport {
            is_boilerplate: true,
            content_package_path: Some(source.path().to_path_buf()),
            page_paths: paths,
            converted_package_path: Some(archive_path),
            converted_page_paths: converted_paths,
            error_message: None,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Rewrite + rename + repackage on a staged copy of the source
    fn run_conversion(
        &self,
        source: &PackageSource,
        manifest: &FilterManifest,
        repo_name: &str,
    ) -> Result<PathBuf, PipelineError> {
        let staging = TempDir::new()?;

        let result = self.convert_staged(source, manifest, repo_name, staging.path());

        // Cleanup failure must not mask the conversion outcome.
        if let Err(err) = staging.close() {
            warn!(error = %err, "Failed to remove conversion staging directory");
        }

        result
    }

    fn convert_staged(
        &self,
        source: &PackageSource,
        manifest: &FilterManifest,
        repo_name: &str,
        staging: &std::path::Path,
    ) -> Result<PathBuf, PipelineError> {
        source.materialize(staging)?;

        let rewritten = rewrite_manifest(&manifest.text, repo_name);
        fs::write(staging.join(FILTER_MANIFEST_PATH), rewritten)?;

        rename_tree(&staging.join("jcr_root"), repo_name)?;

        repackage(
            staging,
            &self.config.contents_dir,
            &format!("{}.zip", repo_name),
        )
    }

    fn declared_paths(&self, source: &PackageSource) -> Result<Vec<String>, PipelineError> {
        match &self.config.page_paths {
            Some(supplied) => Ok(supplied.clone()),
            None => Ok(FilterManifest::read_from(source)?.paths),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Policy;
    use std::path::Path;
    use tempfile::TempDir;

    const BOILERPLATE_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workspaceFilter version="1.0">
    <filter root="/content/sta-xwalk-boilerplate/tools"/>
    <filter root="/content/sta-xwalk-boilerplate/block-collection"/>
    <filter root="/content/dam/sta-xwalk-boilerplate/block-collection"/>
</workspaceFilter>"#;

    fn config_for(dir: &Path, repo_name: Option<&str>) -> PackmorphConfig {
        PackmorphConfig {
            contents_dir: dir.to_path_buf(),
            repo_name: repo_name.map(|s| s.to_string()),
            page_paths: None,
            policy: Policy::Permissive,
            log_level: "info".to_string(),
        }
    }

    fn build_boilerplate_tree(dir: &Path) {
        let vault = dir.join("META-INF/vault");
        fs::create_dir_all(&vault).unwrap();
        fs::write(vault.join("filter.xml"), BOILERPLATE_MANIFEST).unwrap();

        for content_dir in [
            "jcr_root/content/sta-xwalk-boilerplate/tools",
            "jcr_root/content/sta-xwalk-boilerplate/block-collection",
            "jcr_root/content/dam/sta-xwalk-boilerplate/block-collection",
        ] {
            let path = dir.join(content_dir);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join(".content.xml"), "<jcr:root/>").unwrap();
        }
    }

    #[tokio::test]
    async fn test_detect_boilerplate_tree() {
        let temp = TempDir::new().unwrap();
        build_boilerplate_tree(temp.path());

        let service = ConversionService::new(config_for(temp.path(), None));
        let report = service.detect().await.unwrap();

        assert!(report.is_boilerplate);
        assert_eq!(report.page_paths.len(), 3);
        assert_eq!(
            report.content_package_path,
            Some(temp.path().to_path_buf())
        );
        assert!(report.converted_package_path.is_none());
    }

    #[tokio::test]
    async fn test_detect_missing_input() {
        let service = ConversionService::new(config_for(
            Path::new("/nonexistent/contents/dir"),
            None,
        ));

        let result = service.detect().await;
        assert!(matches!(result, Err(PipelineError::InputNotFound(_))));
    }

    #[tokio::test]
    async fn test_detect_uses_page_paths_override() {
        let temp = TempDir::new().unwrap();
        build_boilerplate_tree(temp.path());

        let mut config = config_for(temp.path(), None);
        config.page_paths = Some(vec!["/content/acme/foo".to_string()]);

        let service = ConversionService::new(config);
        let report = service.detect().await.unwrap();

        assert!(!report.is_boilerplate);
        assert_eq!(report.page_paths, vec!["/content/acme/foo"]);
    }

    #[tokio::test]
    async fn test_convert_boilerplate_tree() {
        let temp = TempDir::new().unwrap();
        build_boilerplate_tree(temp.path());

        let service = ConversionService::new(config_for(temp.path(), Some("acme")));
        let report = service.convert().await.unwrap();

        assert!(report.is_boilerplate);
        assert_eq!(
            report.converted_page_paths,
            vec![
                "/content/acme/tools",
                "/content/acme/block-collection",
                "/content/dam/acme/block-collection",
            ]
        );

        let archive_path = report.converted_package_path.unwrap();
        assert_eq!(archive_path, temp.path().join("acme.zip"));

        // The original tree must be untouched
        assert!(temp
            .path()
            .join("jcr_root/content/sta-xwalk-boilerplate/tools")
            .is_dir());

        // The converted archive carries the rewritten manifest and folders
        let mut archive =
            zip::ZipArchive::new(fs::File::open(&archive_path).unwrap()).unwrap();
        let mut manifest = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("META-INF/vault/filter.xml").unwrap(),
            &mut manifest,
        )
        .unwrap();
        assert!(manifest.contains(r#"root="/content/acme/tools""#));
        assert!(!manifest.contains("sta-xwalk-boilerplate"));

        assert!(archive
            .by_name("jcr_root/content/acme/tools/.content.xml")
            .is_ok());
        drop(archive);
    }

    #[tokio::test]
    async fn test_convert_non_boilerplate_is_noop() {
        let temp = TempDir::new().unwrap();
        let vault = temp.path().join("META-INF/vault");
        fs::create_dir_all(&vault).unwrap();
        fs::write(
            vault.join("filter.xml"),
            r#"<workspaceFilter version="1.0"><filter root="/content/acme/foo"/></workspaceFilter>"#,
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("jcr_root/content/acme/foo")).unwrap();

        let service = ConversionService::new(config_for(temp.path(), Some("acme")));
        let report = service.convert().await.unwrap();

        assert!(!report.is_boilerplate);
        assert!(report.converted_package_path.is_none());
        assert!(report.converted_page_paths.is_empty());
        assert!(!temp.path().join("acme.zip").exists());
    }

    #[tokio::test]
    async fn test_convert_requires_repo_name() {
        let temp = TempDir::new().unwrap();
        build_boilerplate_tree(temp.path());

        let service = ConversionService::new(config_for(temp.path(), None));
        let result = service.convert().await;

        assert!(matches!(
            result,
            Err(PipelineError::RepositoryNameMissing)
        ));
    }
}
