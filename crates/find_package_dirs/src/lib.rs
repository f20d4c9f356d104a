// crates/find_package_dirs/src/lib.rs

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names that never hold importable sources.
pub const EXCLUDED_DIRS: &[&str] = &["__pycache__", "build", "devel", "install"];

/// Marker files that make a directory a Python ROS package.
pub const PACKAGE_MARKERS: &[&str] = &["setup.py", "package.xml"];

#[derive(Debug, Error)]
pub enum FindPackageDirsError {
    /// The workspace root is missing or is not a directory.
    #[error("'{}' is not a valid directory.", path.display())]
    InvalidRoot { path: PathBuf },
    #[error("failed to list '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// How a workspace root is turned into search paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every immediate child directory of the root.
    #[default]
    Subdirs,
    /// The `src` directory of every Python ROS package below the root.
    PackageSrc,
}

/// Returns true for entries that should never be reported or descended into.
fn is_skipped(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map_or(false, |name| name.starts_with('.') || EXCLUDED_DIRS.contains(&name))
}

/// Returns true if `dir` contains every file in `PACKAGE_MARKERS`.
pub fn is_python_package(dir: &Path) -> bool {
    PACKAGE_MARKERS.iter().all(|marker| dir.join(marker).is_file())
}

/// Scans a workspace root for search path directories.
///
/// The root must exist and be a directory; anything else is an
/// `InvalidRoot` error so the caller can abort before printing.
/// Results come back in file-name order, joined onto `root` as given.
///
/// # Arguments
///
/// * `root` - The workspace root supplied by the user.
/// * `mode` - Whether to list immediate subdirectories or package `src` dirs.
pub fn find_package_dirs(root: &Path, mode: ScanMode) -> Result<Vec<PathBuf>, FindPackageDirsError> {
    if !root.is_dir() {
        return Err(FindPackageDirsError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    match mode {
        ScanMode::Subdirs => list_subdirs(root),
        ScanMode::PackageSrc => find_package_src_dirs(root),
    }
}

/// Lists the immediate child directories of `root`, skipping hidden and
/// excluded names. Symlinks to directories count as directories; dangling
/// or looping symlinks are skipped with a warning. Only a failure to read
/// the root itself is an error.
pub fn list_subdirs(root: &Path) -> Result<Vec<PathBuf>, FindPackageDirsError> {
    let mut dirs = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(FindPackageDirsError::Io {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() || is_skipped(&entry) {
            continue;
        }
        debug!(path = %entry.path().display(), "found subdirectory");
        dirs.push(entry.into_path());
    }

    Ok(dirs)
}

/// Walks `root` recursively and collects `<package>/src` for every Python
/// ROS package found. Packages without a `src` directory are skipped with a
/// warning; unreadable directories below the root are skipped too.
pub fn find_package_src_dirs(root: &Path) -> Result<Vec<PathBuf>, FindPackageDirsError> {
    let mut src_dirs = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(FindPackageDirsError::Io {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_dir() || !is_python_package(entry.path()) {
            continue;
        }

        let src = entry.path().join("src");
        if src.is_dir() {
            debug!(path = %src.display(), "found package src directory");
            src_dirs.push(src);
        } else {
            warn!(
                "'src' not found in package '{}'. Skipping.",
                entry.file_name().to_string_lossy()
            );
        }
    }

    Ok(src_dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_package(dir: &Path, with_src: bool) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("setup.py"), "from setuptools import setup\n").unwrap();
        fs::write(dir.join("package.xml"), "<package/>\n").unwrap();
        if with_src {
            fs::create_dir_all(dir.join("src")).unwrap();
        }
    }

    #[test]
    fn test_missing_root_is_invalid() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = find_package_dirs(&missing, ScanMode::Subdirs).unwrap_err();
        assert!(matches!(err, FindPackageDirsError::InvalidRoot { ref path } if *path == missing));
        assert!(err.to_string().contains("is not a valid directory"));
    }

    #[test]
    fn test_file_root_is_invalid() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "not a dir").unwrap();
        for mode in [ScanMode::Subdirs, ScanMode::PackageSrc] {
            let err = find_package_dirs(&file, mode).unwrap_err();
            assert!(matches!(err, FindPackageDirsError::InvalidRoot { .. }));
        }
    }

    #[test]
    fn test_subdirs_in_name_order() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("y")).unwrap();
        fs::create_dir(root.join("x")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("x"), root.join("y")]);
    }

    #[test]
    fn test_subdirs_is_not_recursive() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a").join("nested")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("a")]);
    }

    #[test]
    fn test_subdirs_skip_files_hidden_and_excluded() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "readme").unwrap();
        for name in [".git", ".vscode", "__pycache__", "build", "devel", "install", "pkg"] {
            fs::create_dir(root.join(name)).unwrap();
        }

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("pkg")]);
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let temp_dir = tempdir().unwrap();
        let dirs = find_package_dirs(temp_dir.path(), ScanMode::Subdirs).unwrap();
        assert!(dirs.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_subdirs_follow_directory_symlinks() {
        let temp_dir = tempdir().unwrap();
        let target = tempdir().unwrap();
        let root = temp_dir.path();
        std::os::unix::fs::symlink(target.path(), root.join("linked")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("linked")]);
    }

    /// Removes all permissions from `dir`. Returns false when the current
    /// user can still list it (e.g. running as root), so callers can bail.
    #[cfg(unix)]
    fn make_unreadable(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
        fs::read_dir(dir).is_err()
    }

    #[cfg(unix)]
    fn restore_permissions(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_subdirs_skip_dangling_symlink() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("pkg")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("stale")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("pkg")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_subdirs_skip_symlink_loop() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("pkg")).unwrap();
        std::os::unix::fs::symlink(root, root.join("self")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::Subdirs).unwrap();
        assert_eq!(dirs, vec![root.join("pkg")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("locked");
        fs::create_dir_all(root.join("pkg")).unwrap();
        if !make_unreadable(&root) {
            restore_permissions(&root);
            return;
        }

        let results: Vec<_> = [ScanMode::Subdirs, ScanMode::PackageSrc]
            .into_iter()
            .map(|mode| (mode, find_package_dirs(&root, mode)))
            .collect();
        restore_permissions(&root);

        for (mode, result) in results {
            assert!(
                matches!(result, Err(FindPackageDirsError::Io { ref path, .. }) if *path == root),
                "{:?}: {:?}",
                mode,
                result
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_package_src_skips_unreadable_subdirectory() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        make_package(&root.join("src").join("good"), true);
        let locked = root.join("src").join("locked");
        make_package(&locked.join("inner"), true);
        if !make_unreadable(&locked) {
            restore_permissions(&locked);
            return;
        }

        let result = find_package_dirs(root, ScanMode::PackageSrc);
        restore_permissions(&locked);
        assert_eq!(result.unwrap(), vec![root.join("src").join("good").join("src")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_package_src_ignores_dangling_symlink() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        make_package(&root.join("src").join("good"), true);
        std::os::unix::fs::symlink(root.join("gone"), root.join("src").join("stale")).unwrap();

        let dirs = find_package_dirs(root, ScanMode::PackageSrc).unwrap();
        assert_eq!(dirs, vec![root.join("src").join("good").join("src")]);
    }

    #[test]
    fn test_package_src_dirs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        make_package(&root.join("src").join("alpha"), true);
        make_package(&root.join("src").join("group").join("beta"), true);
        make_package(&root.join("src").join("no_src"), false);
        // Only one marker file: not a Python package.
        fs::create_dir_all(root.join("src").join("cpp_pkg").join("src")).unwrap();
        fs::write(root.join("src").join("cpp_pkg").join("package.xml"), "<package/>").unwrap();

        let dirs = find_package_dirs(root, ScanMode::PackageSrc).unwrap();
        assert_eq!(
            dirs,
            vec![
                root.join("src").join("alpha").join("src"),
                root.join("src").join("group").join("beta").join("src"),
            ]
        );
    }

    #[test]
    fn test_package_src_prunes_build_trees() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        make_package(&root.join("build").join("copied"), true);
        make_package(&root.join("install").join("copied"), true);
        make_package(&root.join(".hidden").join("copied"), true);
        make_package(&root.join("src").join("real"), true);

        let dirs = find_package_dirs(root, ScanMode::PackageSrc).unwrap();
        assert_eq!(dirs, vec![root.join("src").join("real").join("src")]);
    }

    #[test]
    fn test_root_itself_can_be_a_package() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("lonely_pkg");
        make_package(&root, true);

        let dirs = find_package_dirs(&root, ScanMode::PackageSrc).unwrap();
        assert_eq!(dirs, vec![root.join("src")]);
    }
}
