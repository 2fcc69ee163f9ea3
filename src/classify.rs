//! Boilerplate package classification
//!
//! Decides, from the paths declared in a package's filter manifest, whether
//! the package is the generic boilerplate template that should be converted
//! for the target repository. Classification is pure: no I/O, no failure mode.

/// Placeholder repository name carried by the boilerplate template
pub const BOILERPLATE_NAME: &str = "sta-xwalk-boilerplate";

/// The three filter paths the boilerplate template declares
pub const BOILERPLATE_PATHS: [&str; 3] = [
    "/content/sta-xwalk-boilerplate/tools",
    "/content/sta-xwalk-boilerplate/block-collection",
    "/content/dam/sta-xwalk-boilerplate/block-collection",
];

/// Classification policy
///
/// `Strict` requires the manifest to declare exactly the three boilerplate
/// paths and nothing else. `Permissive` also accepts manifests that carry the
/// three reference paths among extras, or that are dominated by
/// boilerplate-named entries. Permissive is the default for compatibility
/// with packages produced by older template versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    Strict,
    #[default]
    Permissive,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Strict => "strict",
            Policy::Permissive => "permissive",
        }
    }
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Policy::Strict),
            "permissive" => Ok(Policy::Permissive),
            other => Err(format!(
                "Invalid policy: {}. Valid options: strict, permissive",
                other
            )),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the given manifest paths identify a boilerplate package
///
/// Invariant under reordering of `paths`. Empty input always classifies
/// false under both policies.
pub fn is_boilerplate(paths: &[String], policy: Policy) -> bool {
    if paths.is_empty() {
        return false;
    }

    match policy {
        Policy::Strict => {
            paths.len() == 3
                && BOILERPLATE_PATHS
                    .iter()
                    .all(|reference| paths.iter().any(|p| p == reference))
        }
        Policy::Permissive => {
            let all_references_present = BOILERPLATE_PATHS
                .iter()
                .all(|reference| paths.iter().any(|p| p == reference));
            if all_references_present {
                return true;
            }

            let tagged = paths
                .iter()
                .filter(|p| p.contains(BOILERPLATE_NAME))
                .count();
            // At least 2 boilerplate-named entries making up >= 60% of the
            // total. Integer comparison avoids 0.6 rounding artifacts.
            tagged >= 2 && tagged * 5 >= paths.len() * 3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_paths() -> Vec<String> {
        BOILERPLATE_PATHS.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_strict_matches_exact_set() {
        assert!(is_boilerplate(&reference_paths(), Policy::Strict));
    }

    #[test]
    fn test_strict_rejects_extra_entries() {
        let mut paths = reference_paths();
        paths.push("/content/sta-xwalk-boilerplate/extra".to_string());
        assert!(!is_boilerplate(&paths, Policy::Strict));
    }

    #[test]
    fn test_strict_rejects_partial_set() {
        let paths = vec![
            "/content/sta-xwalk-boilerplate/tools".to_string(),
            "/content/sta-xwalk-boilerplate/block-collection".to_string(),
        ];
        assert!(!is_boilerplate(&paths, Policy::Strict));
    }

    #[test]
    fn test_permissive_accepts_reference_set() {
        assert!(is_boilerplate(&reference_paths(), Policy::Permissive));
    }

    #[test]
    fn test_permissive_accepts_references_with_extras() {
        let mut paths = reference_paths();
        paths.push("/content/unrelated".to_string());
        paths.push("/conf/unrelated".to_string());
        assert!(is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_permissive_accepts_dominant_tagged_entries() {
        // 3 of 5 entries tagged, exactly the 60% threshold
        let paths = vec![
            "/content/sta-xwalk-boilerplate/a".to_string(),
            "/content/sta-xwalk-boilerplate/b".to_string(),
            "/content/dam/sta-xwalk-boilerplate/c".to_string(),
            "/content/other".to_string(),
            "/conf/other".to_string(),
        ];
        assert!(is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_permissive_rejects_minority_tagged_entries() {
        // 2 of 4 entries tagged is only 50%
        let paths = vec![
            "/content/sta-xwalk-boilerplate/a".to_string(),
            "/content/sta-xwalk-boilerplate/b".to_string(),
            "/content/other".to_string(),
            "/conf/other".to_string(),
        ];
        assert!(!is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_permissive_rejects_single_tagged_entry() {
        let paths = vec!["/content/sta-xwalk-boilerplate/a".to_string()];
        assert!(!is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_unrelated_path_is_not_boilerplate() {
        let paths = vec!["/content/acme/foo".to_string()];
        assert!(!is_boilerplate(&paths, Policy::Strict));
        assert!(!is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_empty_input_is_never_boilerplate() {
        assert!(!is_boilerplate(&[], Policy::Strict));
        assert!(!is_boilerplate(&[], Policy::Permissive));
    }

    #[test]
    fn test_classification_is_order_invariant() {
        let mut paths = reference_paths();
        paths.reverse();
        assert!(is_boilerplate(&paths, Policy::Strict));
        assert!(is_boilerplate(&paths, Policy::Permissive));
    }

    #[test]
    fn test_policy_round_trip() {
        assert_eq!("strict".parse::<Policy>().unwrap(), Policy::Strict);
        assert_eq!("Permissive".parse::<Policy>().unwrap(), Policy::Permissive);
        assert!("lenient".parse::<Policy>().is_err());
        assert_eq!(Policy::Strict.to_string(), "strict");
    }
}
