//! Recursive file listing with class detection
//!
//! Walks a source root once, lists every regular file in a deterministic
//! order and records the class each `.php` file declares.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{self, Result};
use crate::path_utils::to_forward_slashes;
use crate::php::{ClassDeclaration, parse_class_declaration};

/// Files with this suffix are inspected for a class declaration
const PHP_EXTENSION: &str = ".php";

/// One regular file found under a scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Absolute path, `/`-separated
    pub path: String,
    /// The first class the file declares, if any
    pub declaration: Option<ClassDeclaration>,
}

impl ScannedFile {
    pub fn declared_type(&self) -> Option<&str> {
        self.declaration.as_ref().map(|d| d.name.as_str())
    }
}

/// List every regular file under `root`, sorted by path, with declared classes.
///
/// Symlinks and directories are not listed. A file that can't be read is kept
/// with no declaration. Failing to walk the tree is fatal: the error says
/// whether `root` is missing or merely unreadable.
pub fn scan_dir(root: &Path) -> Result<Vec<ScannedFile>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let root_display = to_forward_slashes(root);
            if root.is_dir() {
                error::source_dir_unreadable(root_display, e.to_string())
            } else {
                error::source_dir_not_found(root_display)
            }
        })?;
        if entry.file_type().is_file() {
            paths.push(to_forward_slashes(entry.path()));
        }
    }
    paths.sort();

    tracing::debug!(root = %root.display(), files = paths.len(), "scanned source directory");

    Ok(paths
        .into_iter()
        .map(|path| {
            let declaration = if path.ends_with(PHP_EXTENSION) {
                read_declaration(&path)
            } else {
                None
            };
            ScannedFile { path, declaration }
        })
        .collect())
}

fn read_declaration(path: &str) -> Option<ClassDeclaration> {
    match std::fs::read(path) {
        Ok(bytes) => parse_class_declaration(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::debug!(path, error = %e, "could not read file, treating it as class-less");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    #[test]
    fn test_scan_lists_files_sorted_with_classes() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "b/Second.php", "<?php namespace B; class Second {}");
        write(temp.path(), "a/first.php", "<?php return [];");
        write(temp.path(), "a/notes.txt", "class NotPhp {}");

        let files = scan_dir(temp.path()).expect("scan");
        let root = to_forward_slashes(temp.path());

        assert_eq!(files.len(), 3);
        assert_eq!(files[0].path, format!("{root}/a/first.php"));
        assert_eq!(files[0].declared_type(), None);
        assert_eq!(files[1].path, format!("{root}/a/notes.txt"));
        assert_eq!(files[1].declared_type(), None);
        assert_eq!(files[2].declared_type(), Some("\\B\\Second"));
    }

    #[test]
    fn test_scan_skips_directories() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(temp.path().join("empty/nested")).expect("mkdir");
        let files = scan_dir(temp.path()).expect("scan");
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_not_found() {
        let temp = TempDir::new().expect("temp dir");
        let missing = temp.path().join("nope");
        let err = scan_dir(&missing).expect_err("missing root");
        assert!(matches!(
            err,
            crate::error::AutoRegError::SourceDirNotFound { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "real.php", "<?php class Real {}");
        std::os::unix::fs::symlink(temp.path().join("real.php"), temp.path().join("link.php"))
            .expect("symlink");
        let files = scan_dir(temp.path()).expect("scan");
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("/real.php"));
    }
}
