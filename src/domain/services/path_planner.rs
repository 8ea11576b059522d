//! Path planning service
//!
//! Pure domain logic that turns a deployment target into working directories
//! and a source → destination copy plan. No I/O happens here; the caller
//! enumerates source files through a session and hands them in.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::{DeploymentTarget, ExclusionRules, FileMapping};

/// Prefix of the per-domain backup directory under the backup root
pub const BACKUP_DIR_PREFIX: &str = "temp-";

/// Errors from relative path computation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("'{}' is not inside '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("'{}' does not name a file below its root", path.display())]
    Malformed { path: PathBuf },

    #[error(
        "backup directory '{}' overlaps destination '{}'",
        backup.display(),
        destination.display()
    )]
    OverlappingDirectories { destination: PathBuf, backup: PathBuf },
}

/// The three directories one deployment attempt works in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectories {
    /// Staged site on the source host
    pub source: PathBuf,
    /// Live site on the destination host
    pub destination: PathBuf,
    /// Snapshot of the live site, also on the destination host
    pub backup: PathBuf,
}

/// Maps staged files to their live locations
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    exclusions: ExclusionRules,
}

impl PathPlanner {
    pub fn new(exclusions: ExclusionRules) -> Self {
        Self { exclusions }
    }

    pub fn exclusions(&self) -> &ExclusionRules {
        &self.exclusions
    }

    /// Derive working directories for `target`.
    ///
    /// The backup directory may not sit inside the destination (it would be
    /// snapshotted into itself) nor contain it.
    pub fn directories(&self, target: &DeploymentTarget) -> Result<WorkingDirectories, PathError> {
        let domain = target.domain();
        let dirs = WorkingDirectories {
            source: target.source_root().join(domain),
            destination: target.destination_root().join(domain),
            backup: target
                .backup_root()
                .join(format!("{BACKUP_DIR_PREFIX}{domain}")),
        };

        if dirs.backup.starts_with(&dirs.destination) || dirs.destination.starts_with(&dirs.backup)
        {
            return Err(PathError::OverlappingDirectories {
                destination: dirs.destination,
                backup: dirs.backup,
            });
        }

        Ok(dirs)
    }

    /// Build the copy plan for the enumerated `source_files`.
    pub fn plan<I, P>(
        &self,
        dirs: &WorkingDirectories,
        source_files: I,
    ) -> Result<FileMapping, PathError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries = BTreeMap::new();
        let mut excluded = Vec::new();

        for file in source_files {
            let file = file.as_ref();
            let relative = relative_to(&dirs.source, file)?;

            if let Some(rule) = self.exclusions.matching_rule(&relative) {
                tracing::debug!(path = %relative.display(), rule, "excluded from deployment");
                excluded.push(relative);
                continue;
            }

            entries.insert(file.to_path_buf(), dirs.destination.join(&relative));
        }

        excluded.sort();
        Ok(FileMapping::from_parts(entries, excluded))
    }
}

/// Path of `path` relative to `root`, rejecting anything that escapes it.
pub fn relative_to(root: &Path, path: &Path) -> Result<PathBuf, PathError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PathError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let well_formed = relative.components().next().is_some()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !well_formed {
        return Err(PathError::Malformed {
            path: path.to_path_buf(),
        });
    }

    Ok(relative.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> DeploymentTarget {
        DeploymentTarget::new("example.com", "/stg", "/live", "/live/Rollback").unwrap()
    }

    #[test]
    fn directories_follow_host_layout() {
        let dirs = PathPlanner::default().directories(&target()).unwrap();
        assert_eq!(dirs.source, PathBuf::from("/stg/example.com"));
        assert_eq!(dirs.destination, PathBuf::from("/live/example.com"));
        assert_eq!(dirs.backup, PathBuf::from("/live/Rollback/temp-example.com"));
    }

    #[test]
    fn backup_inside_destination_is_rejected() {
        let target = DeploymentTarget::new("Rollback", "/stg", "/live", "/live/Rollback").unwrap();
        let err = PathPlanner::default().directories(&target).unwrap_err();
        assert!(matches!(err, PathError::OverlappingDirectories { .. }));
    }

    #[test]
    fn plan_maps_relative_paths_under_destination() {
        let planner = PathPlanner::default();
        let dirs = planner.directories(&target()).unwrap();
        let mapping = planner
            .plan(
                &dirs,
                [
                    "/stg/example.com/index.html",
                    "/stg/example.com/css/site.css",
                ],
            )
            .unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.destination_of(Path::new("/stg/example.com/css/site.css")),
            Some(Path::new("/live/example.com/css/site.css"))
        );
    }

    #[test]
    fn plan_skips_excluded_files() {
        let planner = PathPlanner::default();
        let dirs = planner.directories(&target()).unwrap();
        let mapping = planner
            .plan(
                &dirs,
                [
                    "/stg/example.com/ok.txt",
                    "/stg/example.com/data_error_.txt",
                ],
            )
            .unwrap();

        let sources: Vec<_> = mapping.iter().map(|(s, _)| s.to_path_buf()).collect();
        assert_eq!(sources, vec![PathBuf::from("/stg/example.com/ok.txt")]);
        assert_eq!(mapping.excluded(), &[PathBuf::from("data_error_.txt")]);
    }

    #[test]
    fn plan_is_deterministic() {
        let planner = PathPlanner::default();
        let dirs = planner.directories(&target()).unwrap();
        let forward = planner
            .plan(&dirs, ["/stg/example.com/b", "/stg/example.com/a"])
            .unwrap();
        let backward = planner
            .plan(&dirs, ["/stg/example.com/a", "/stg/example.com/b"])
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn plan_rejects_files_outside_source() {
        let planner = PathPlanner::default();
        let dirs = planner.directories(&target()).unwrap();
        let err = planner.plan(&dirs, ["/elsewhere/x.txt"]).unwrap_err();
        assert!(matches!(err, PathError::OutsideRoot { .. }));
    }

    #[test]
    fn relative_to_rejects_root_itself_and_parent_components() {
        let root = Path::new("/stg/site");
        assert!(matches!(
            relative_to(root, root),
            Err(PathError::Malformed { .. })
        ));
        assert!(matches!(
            relative_to(root, Path::new("/stg/site/../escape.txt")),
            Err(PathError::Malformed { .. })
        ));
        assert_eq!(
            relative_to(root, Path::new("/stg/site/a/b.txt")).unwrap(),
            PathBuf::from("a/b.txt")
        );
    }
}
