//! Property tests for relative path handling and tilde expansion.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use site_deploy::domain::services::relative_to;
use site_deploy::infrastructure::fs::expand_tilde;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,10}").unwrap()
}

fn components() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `relative_to(root, root/rel)` gives back `rel`.
    #[test]
    fn property_relative_to_inverts_join(root in components(), rel in components()) {
        let root: PathBuf = std::iter::once("/".to_string()).chain(root).collect();
        let rel: PathBuf = rel.iter().collect();

        prop_assert_eq!(relative_to(&root, &root.join(&rel)).unwrap(), rel);
    }

    /// PROPERTY: A path outside the root is always rejected.
    #[test]
    fn property_relative_to_rejects_siblings(
        root in segment(),
        other in segment(),
        rel in components(),
    ) {
        prop_assume!(root != other);
        let root = Path::new("/srv").join(&root);
        let path = Path::new("/srv").join(&other).join(rel.iter().collect::<PathBuf>());

        prop_assert!(relative_to(&root, &path).is_err());
    }

    /// PROPERTY: The root itself is never a file below the root.
    #[test]
    fn property_relative_to_rejects_root(root in components()) {
        let root: PathBuf = std::iter::once("/".to_string()).chain(root).collect();

        prop_assert!(relative_to(&root, &root).is_err());
    }

    /// PROPERTY: Tilde paths land under home; other paths are untouched.
    #[test]
    fn property_expand_tilde(rel in components()) {
        let home = Path::new("/home/deploy");
        let rel: PathBuf = rel.iter().collect();

        prop_assert_eq!(expand_tilde(&Path::new("~").join(&rel), Some(home)), home.join(&rel));

        let absolute = Path::new("/etc").join(&rel);
        prop_assert_eq!(expand_tilde(&absolute, Some(home)), absolute.clone());
        prop_assert_eq!(expand_tilde(&Path::new("~").join(&rel), None), Path::new("~").join(&rel));
    }
}
