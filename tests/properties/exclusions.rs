//! Property tests for exclusion rules and copy planning.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use site_deploy::domain::services::{PathPlanner, WorkingDirectories};
use site_deploy::ExclusionRules;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_.-]{1,12}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|parts| parts.iter().collect())
}

fn dirs() -> WorkingDirectories {
    WorkingDirectories {
        source: PathBuf::from("/srv/staging/site.com"),
        destination: PathBuf::from("/srv/live/site.com"),
        backup: PathBuf::from("/srv/live/Rollback/temp-site.com"),
    }
}

fn flip_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A path containing a rule is excluded whatever the case of either side.
    #[test]
    fn property_rule_matches_regardless_of_case(
        prefix in "[a-z0-9]{0,6}",
        rule in "[A-Za-z_]{1,8}",
        suffix in "[a-z0-9]{0,6}",
    ) {
        let rules = ExclusionRules::new([rule.as_str()]);
        let path = PathBuf::from(format!("dir/{prefix}{}{suffix}.html", flip_case(&rule)));

        let expected = rule.to_lowercase();
        prop_assert!(rules.is_excluded(&path));
        prop_assert_eq!(rules.matching_rule(&path), Some(expected.as_str()));
    }

    /// PROPERTY: The empty rule set never excludes anything.
    #[test]
    fn property_no_rules_never_exclude(path in relative_path()) {
        prop_assert!(!ExclusionRules::none().is_excluded(&path));
    }

    /// PROPERTY: Planning splits the source files exactly into copied and excluded.
    #[test]
    fn property_plan_partitions_source_files(
        paths in proptest::collection::btree_set(relative_path(), 0..16),
        rules in proptest::collection::vec("[a-z_]{1,4}", 0..3),
    ) {
        let dirs = dirs();
        let exclusions = ExclusionRules::new(&rules);
        let planner = PathPlanner::new(exclusions.clone());
        let files: Vec<PathBuf> = paths.iter().map(|p| dirs.source.join(p)).collect();

        let mapping = planner.plan(&dirs, &files).unwrap();

        prop_assert_eq!(mapping.len() + mapping.excluded().len(), paths.len());
        for relative in &paths {
            let source = dirs.source.join(relative);
            if exclusions.is_excluded(relative) {
                prop_assert!(mapping.destination_of(&source).is_none());
                prop_assert!(mapping.excluded().contains(relative));
            } else {
                let expected = dirs.destination.join(relative);
                prop_assert_eq!(mapping.destination_of(&source), Some(expected.as_path()));
            }
        }
    }

    /// PROPERTY: Every planned destination stays inside the live directory.
    #[test]
    fn property_plan_stays_inside_destination(
        paths in proptest::collection::btree_set(relative_path(), 1..16),
    ) {
        let dirs = dirs();
        let files: Vec<PathBuf> = paths.iter().map(|p| dirs.source.join(p)).collect();

        let mapping = PathPlanner::new(ExclusionRules::none()).plan(&dirs, &files).unwrap();

        let sources: BTreeSet<&Path> = mapping.iter().map(|(src, _)| src).collect();
        prop_assert_eq!(sources.len(), paths.len());
        for (_, dst) in mapping.iter() {
            prop_assert!(dst.starts_with(&dirs.destination));
        }
    }
}
