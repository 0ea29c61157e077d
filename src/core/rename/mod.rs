//! Batch renaming of files by regular expression.
//!
//! Input paths are validated, mapped to new names through a [`Pattern`],
//! checked for destinations claimed twice or already taken on disk, and then
//! renamed one by one. See [`rename_files`] for the full pipeline.

mod collision;
mod execute;
pub mod fs;
mod pattern;
mod plan;
mod report;
mod run;

pub use collision::{
    detect_collisions, resolve_collisions, Collision, CollisionPolicy, CollisionResolution,
};
pub use execute::{check_availability, execute_renames};
pub use fs::{FileSystem, LocalFs};
pub use pattern::Pattern;
pub use plan::{build_plan, check_files, validate_files, FileValidity, RenameOperation};
pub use report::{RecordingReporter, ReportEvent, Reporter};
pub use run::rename_files;
