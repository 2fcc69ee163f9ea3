//! Placeholder rewriting
//!
//! Rewrites filter manifest entries and renames content folders from the
//! generic boilerplate placeholder to the target repository name. The manifest
//! rewrite is textual and only touches `root="..."` attribute values, so the
//! rest of the document comes through byte-identical.

use crate::classify::BOILERPLATE_NAME;
use regex::{Captures, Regex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rewrites every path-bearing `root` attribute containing the boilerplate
/// placeholder to use `repo_name` instead
///
/// All occurrences inside an attribute value are replaced, regardless of the
/// surrounding tag syntax. Idempotent once no placeholder remains.
pub fn rewrite_manifest(text: &str, repo_name: &str) -> String {
    let attr_re = Regex::new(r#"root="([^"]*)""#).expect("valid regex");

    attr_re
        .replace_all(text, |caps: &Captures| {
            let value = &caps[1];
            if value.contains(BOILERPLATE_NAME) {
                format!(r#"root="{}""#, value.replace(BOILERPLATE_NAME, repo_name))
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Applies the same placeholder substitution to an already-extracted path list
pub fn rewrite_paths(paths: &[String], repo_name: &str) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.replace(BOILERPLATE_NAME, repo_name))
        .collect()
}

/// Renames boilerplate content folders under `jcr_root` to the repository name
///
/// Inspects `content/sta-xwalk-boilerplate` and
/// `content/dam/sta-xwalk-boilerplate`; each one present is renamed in place.
/// Absence of either is a no-op, not an error. Returns the renames performed.
pub fn rename_tree(jcr_root: &Path, repo_name: &str) -> io::Result<Vec<(PathBuf, PathBuf)>> {
    let mut renamed = Vec::new();

    for parent in ["content", "content/dam"] {
        let old = jcr_root.join(parent).join(BOILERPLATE_NAME);
        if old.is_dir() {
            let new = jcr_root.join(parent).join(repo_name);
            fs::rename(&old, &new)?;
            debug!(from = %old.display(), to = %new.display(), "Renamed content folder");
            renamed.push((old, new));
        }
    }

    Ok(renamed)
}
