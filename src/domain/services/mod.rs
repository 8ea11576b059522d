//! Domain Services
//!
//! Stateless domain logic with no I/O.

mod path_planner;

pub use path_planner::{relative_to, PathError, PathPlanner, WorkingDirectories, BACKUP_DIR_PREFIX};
