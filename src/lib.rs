//! packmorph - boilerplate content package detection and conversion
//!
//! This library detects whether a content package is a generic boilerplate
//! template and, when asked, converts it for a target repository: manifest
//! path references are rewritten, content folders renamed, and the result
//! repackaged as a fresh zip archive.
//!
//! # Core Concepts
//!
//! - **Package source**: a content package zip archive, or an
//!   already-extracted `jcr_root`/`META-INF` tree
//! - **Filter manifest**: `META-INF/vault/filter.xml`, the XML document
//!   enumerating the content paths a package declares
//! - **Classification**: deciding from the declared paths whether the
//!   package is the boilerplate template (strict or permissive policy)
//! - **Conversion**: rewriting the placeholder repository name to the real
//!   one in the manifest and the folder tree, then repackaging
//!
//! # Example Usage
//!
//! ```ignore
//! use packmorph::{ConversionService, PackmorphConfig};
//!
//! async fn convert_package() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = PackmorphConfig::default();
//!     config.repo_name = Some("acme".to_string());
//!
//!     let service = ConversionService::new(config);
//!     let report = service.convert().await?;
//!
//!     if report.is_boilerplate {
//!         println!("Converted: {:?}", report.converted_package_path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`package`]: package source location and extraction
//! - [`manifest`]: filter manifest reading and parsing
//! - [`classify`]: boilerplate classification policies
//! - [`rewrite`]: placeholder rewriting and folder renames
//! - [`repackage`]: staged copy and archive creation
//! - [`pipeline`]: the orchestrating service

// Public modules
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod package;
pub mod pipeline;
pub mod repackage;
pub mod rewrite;
pub mod util;

// Re-export key types for convenient access
pub use classify::{is_boilerplate, Policy, BOILERPLATE_NAME, BOILERPLATE_PATHS};
pub use config::{ConfigError, PackmorphConfig};
pub use error::PipelineError;
pub use manifest::{FilterManifest, FILTER_MANIFEST_PATH};
pub use output::ConversionReport;
pub use package::PackageSource;
pub use pipeline::ConversionService;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
