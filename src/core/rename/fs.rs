//! Filesystem access used by the rename pipeline.

use std::fs;
use std::io;
use std::path::Path;

/// The filesystem primitives the pipeline needs.
///
/// Implementations are shared across worker threads during fan-out.
pub trait FileSystem: Send + Sync {
    /// Stat-like existence check, following symlinks.
    fn exists(&self, path: &Path) -> bool;

    /// Whether a directory entry named `path` exists. Symlinks are not
    /// followed, so a dangling link still occupies its name.
    fn entry_exists(&self, path: &Path) -> bool;

    /// Whether `destination` names the very entry `source` names: same
    /// directory, a name differing only by case, and the same inode. This is
    /// how a case-only rename looks on a case-insensitive filesystem.
    fn same_entry(&self, source: &Path, destination: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Drop a leading `./` so `./a.txt` and `a.txt` compare equal.
pub fn strip_cur_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().map(strip_cur_dir).unwrap_or(Path::new(""))
}

fn is_case_variant(source: &Path, destination: &Path) -> bool {
    if parent_dir(source) != parent_dir(destination) {
        return false;
    }

    match (
        source.file_name().and_then(|n| n.to_str()),
        destination.file_name().and_then(|n| n.to_str()),
    ) {
        (Some(a), Some(b)) => a != b && a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    #[cfg(unix)]
    fn same_entry(&self, source: &Path, destination: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;

        if !is_case_variant(source, destination) {
            return false;
        }
        match (fs::symlink_metadata(source), fs::symlink_metadata(destination)) {
            (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    fn same_entry(&self, source: &Path, destination: &Path) -> bool {
        if !is_case_variant(source, destination) {
            return false;
        }
        match fs::symlink_metadata(destination) {
            Ok(meta) if !meta.file_type().is_symlink() => {
                match (fs::canonicalize(source), fs::canonicalize(destination)) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_reports_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();

        assert!(LocalFs.exists(&file));
        assert!(LocalFs.exists(dir.path()));
        assert!(!LocalFs.exists(&dir.path().join("missing.txt")));
    }

    #[test]
    fn strip_cur_dir_only_touches_leading_dot() {
        assert_eq!(strip_cur_dir(Path::new("./a.txt")), Path::new("a.txt"));
        assert_eq!(strip_cur_dir(Path::new("a.txt")), Path::new("a.txt"));
        assert_eq!(strip_cur_dir(Path::new("../a.txt")), Path::new("../a.txt"));
    }

    #[test]
    fn case_variant_requires_same_directory_and_other_name() {
        assert!(is_case_variant(Path::new("A.txt"), Path::new("a.txt")));
        assert!(is_case_variant(Path::new("./A.txt"), Path::new("a.txt")));
        assert!(!is_case_variant(Path::new("a.txt"), Path::new("a.txt")));
        assert!(!is_case_variant(Path::new("a.txt"), Path::new("b.txt")));
        assert!(!is_case_variant(Path::new("x/A.txt"), Path::new("y/a.txt")));
    }

    #[test]
    fn distinct_files_are_not_the_same_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "a").unwrap();
        std::fs::write(&b, "b").unwrap();

        assert!(!LocalFs.same_entry(&a, &b));
        assert!(!LocalFs.same_entry(&a, &dir.path().join("A.TXT.missing")));
    }

    #[cfg(unix)]
    #[test]
    fn links_to_the_source_are_not_the_same_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "a").unwrap();
        let soft = dir.path().join("soft.txt");
        let hard = dir.path().join("hard.txt");
        std::os::unix::fs::symlink(&a, &soft).unwrap();
        std::fs::hard_link(&a, &hard).unwrap();

        assert!(!LocalFs.same_entry(&a, &soft));
        assert!(!LocalFs.same_entry(&a, &hard));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_occupies_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link.txt");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &link).unwrap();

        assert!(!LocalFs.exists(&link));
        assert!(LocalFs.entry_exists(&link));
    }

    #[test]
    fn rename_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from.txt");
        let to = dir.path().join("to.txt");
        std::fs::write(&from, "content").unwrap();

        LocalFs.rename(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "content");
    }
}
