//! Input validation and rename planning.

use super::fs::{strip_cur_dir, FileSystem};
use super::pattern::Pattern;
use crate::utils::collections::partition;
use rayon::prelude::*;
use std::path::PathBuf;

/// A source path and the path it would be renamed to.
///
/// `destination` is `None` when the source's base name does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
}

impl RenameOperation {
    pub fn new(source: PathBuf, destination: Option<PathBuf>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Build the operation for `source` under `pattern`.
    pub fn for_path(pattern: &Pattern, source: PathBuf) -> Self {
        let destination = pattern.renamed_path(&source);
        Self::new(source, destination)
    }

    /// True when the operation would actually move the file.
    pub fn is_effective(&self) -> bool {
        match &self.destination {
            Some(destination) => destination.as_path() != strip_cur_dir(&self.source),
            None => false,
        }
    }
}

/// Whether a path existed when it was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidity {
    pub path: PathBuf,
    pub is_valid: bool,
}

/// Stat every input concurrently. Results follow input order.
pub fn check_files(fs: &dyn FileSystem, files: &[PathBuf]) -> Vec<FileValidity> {
    files
        .par_iter()
        .map(|path| FileValidity {
            path: path.clone(),
            is_valid: fs.exists(path),
        })
        .collect()
}

/// Split inputs into `(valid, invalid)` paths, each in input order.
pub fn validate_files(fs: &dyn FileSystem, files: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let (valid, invalid) = partition(check_files(fs, files), |v| v.is_valid);
    (
        valid.into_iter().map(|v| v.path).collect(),
        invalid.into_iter().map(|v| v.path).collect(),
    )
}

/// Map each source to its destination and keep only effective renames.
pub fn build_plan(sources: &[PathBuf], pattern: &Pattern) -> Vec<RenameOperation> {
    sources
        .iter()
        .map(|source| RenameOperation::for_path(pattern, source.clone()))
        .filter(RenameOperation::is_effective)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::fs::LocalFs;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn plan_skips_non_matching_sources() {
        let pattern = Pattern::compile("a.txt", "c.txt").unwrap();
        let plan = build_plan(&paths(&["a.txt", "b.txt"]), &pattern);
        assert_eq!(
            plan,
            vec![RenameOperation::new(
                PathBuf::from("a.txt"),
                Some(PathBuf::from("c.txt"))
            )]
        );
    }

    #[test]
    fn plan_skips_identity_renames() {
        let pattern = Pattern::compile("(.*)", "$1").unwrap();
        assert!(build_plan(&paths(&["same.txt", "dir/also.txt"]), &pattern).is_empty());
    }

    #[test]
    fn identity_rename_with_cur_dir_prefix_is_skipped() {
        let pattern = Pattern::compile("(.*)", "$1").unwrap();
        assert!(build_plan(&paths(&["./same.txt"]), &pattern).is_empty());
    }

    #[test]
    fn cur_dir_and_bare_inputs_share_a_destination() {
        let pattern = Pattern::compile(r"^[xy]\.txt$", "z.txt").unwrap();
        let plan = build_plan(&paths(&["x.txt", "./y.txt"]), &pattern);
        assert_eq!(plan[0].destination, plan[1].destination);
        assert_eq!(plan[1].destination, Some(PathBuf::from("z.txt")));
    }

    #[test]
    fn plan_preserves_input_order() {
        let pattern = Pattern::compile(r"\.jpeg$", ".jpg").unwrap();
        let plan = build_plan(&paths(&["z.jpeg", "a.jpeg", "m.png", "b.jpeg"]), &pattern);
        let sources: Vec<_> = plan.iter().map(|op| op.source.to_string_lossy().to_string()).collect();
        assert_eq!(sources, vec!["z.jpeg", "a.jpeg", "b.jpeg"]);
    }

    #[test]
    fn plan_is_deterministic() {
        let pattern = Pattern::compile("/o/g", "0").unwrap();
        let sources = paths(&["foo", "boo", "bar"]);
        assert_eq!(build_plan(&sources, &pattern), build_plan(&sources, &pattern));
    }

    #[test]
    fn non_matching_operation_is_not_effective() {
        let op = RenameOperation::new(PathBuf::from("a"), None);
        assert!(!op.is_effective());
    }

    #[test]
    fn validate_files_partitions_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "").unwrap();
        std::fs::write(&b, "").unwrap();
        let missing = dir.path().join("missing.txt");
        let gone = dir.path().join("gone.txt");

        let inputs = vec![missing.clone(), b.clone(), gone.clone(), a.clone()];
        let (valid, invalid) = validate_files(&LocalFs, &inputs);

        assert_eq!(valid, vec![b, a]);
        assert_eq!(invalid, vec![missing, gone]);
    }

    #[test]
    fn check_files_keeps_order_for_many_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let inputs: Vec<PathBuf> = (0..64)
            .map(|i| {
                let path = dir.path().join(format!("f{}", i));
                if i % 3 == 0 {
                    std::fs::write(&path, "").unwrap();
                }
                path
            })
            .collect();

        let checked = check_files(&LocalFs, &inputs);
        for (i, validity) in checked.iter().enumerate() {
            assert_eq!(validity.path, inputs[i]);
            assert_eq!(validity.is_valid, i % 3 == 0);
        }
    }
}
