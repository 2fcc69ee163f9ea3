//! Filter manifest parsing
//!
//! Extracts the `root` attribute of every `<filter>` element from a vault
//! filter manifest. Real-world manifests show up in several tag styles, some
//! of them not well-formed XML, so the parser applies a set of tolerant regex
//! patterns over the whole text and merges the results.

use regex::Regex;
use std::collections::HashSet;

/// Supported `<filter>` tag shapes, from most to least specific:
/// self-closing, empty-body, content-bearing, and tags carrying extra
/// attributes before `root`.
const FILTER_PATTERNS: [&str; 4] = [
    r#"<filter\s+root="([^"]+)"\s*/>"#,
    r#"<filter\s+root="([^"]+)"\s*>\s*</filter>"#,
    r#"<filter\s+root="([^"]+)"\s*>"#,
    r#"<filter\s[^>]*?root="([^"]+)""#,
];

/// Extracts filter root paths from manifest text
///
/// Each pattern is applied across the whole document; matches are merged in
/// document order and de-duplicated by exact string equality.
pub fn extract_filter_paths(text: &str) -> Vec<String> {
    let mut matches: Vec<(usize, String)> = Vec::new();
    for pattern in FILTER_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        for cap in re.captures_iter(text) {
            let group = cap.get(1).expect("pattern has a capture group");
            matches.push((group.start(), group.as_str().to_string()));
        }
    }
    matches.sort_by_key(|(start, _)| *start);

    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    for (_, path) in matches {
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    }
    paths
}
