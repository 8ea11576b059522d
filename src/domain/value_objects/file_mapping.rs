//! File mapping value object - the copy plan of one deployment attempt.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Source file → destination file, iterated in sorted order.
///
/// Built once per attempt by the path planner and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMapping {
    entries: BTreeMap<PathBuf, PathBuf>,
    excluded: Vec<PathBuf>,
}

impl FileMapping {
    pub(crate) fn from_parts(entries: BTreeMap<PathBuf, PathBuf>, excluded: Vec<PathBuf>) -> Self {
        Self { entries, excluded }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source/destination pairs in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(src, dst)| (src.as_path(), dst.as_path()))
    }

    pub fn destination_of(&self, source: &Path) -> Option<&Path> {
        self.entries.get(source).map(PathBuf::as_path)
    }

    /// Relative paths dropped by exclusion rules
    pub fn excluded(&self) -> &[PathBuf] {
        &self.excluded
    }

    /// Every parent directory implied by the destination paths
    pub fn destination_dirs(&self) -> BTreeSet<&Path> {
        self.entries
            .values()
            .filter_map(|dst| dst.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect()
    }
}
