//! Source trees
//!
//! A source tree is one configured root directory (e.g. `src/App`), scanned
//! once. Its files are addressed three ways:
//!
//! - absolute: `/srv/project/src/App/MyApp1/Routes/web.php`
//! - project-relative: `/src/App/MyApp1/Routes/web.php`
//! - root-relative: `/MyApp1/Routes/web.php`, which is what patterns are matched against
//!
//! ## Module Organization
//!
//! - `ignore.rs`: the ignore list applied while building the tree

pub mod ignore;

pub use ignore::IgnoreList;

use std::path::{Path, PathBuf};

use crate::error::{self, Result};
use crate::path_utils::{strip_base, to_forward_slashes};
use crate::php::ClassDeclaration;
use crate::scanner::scan_dir;

/// One file found in a source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub absolute_path: String,
    pub project_relative_path: String,
    pub root_relative_path: String,
    /// Portion of the path matched by a pattern's wildcards, set once matched
    pub wildcard_remainder: Option<String>,
    /// Fully-qualified name of the class the file declares
    pub declared_type_name: Option<String>,
}

/// A scanned, ignore-filtered source root
#[derive(Debug, Clone)]
pub struct SourceTree {
    alias: Option<String>,
    root: String,
    local_root: String,
    files: Vec<DiscoveredFile>,
    declarations: Vec<ClassDeclaration>,
}

impl SourceTree {
    /// Resolve `dir` against the project root and scan it.
    ///
    /// `project_root` must already be canonical.
    pub fn open(
        project_root: &Path,
        dir: &str,
        alias: Option<String>,
        ignore: &IgnoreList,
    ) -> Result<Self> {
        let root = canonical_dir(project_root, dir)?;
        let root = to_forward_slashes(&root);
        let project_root = to_forward_slashes(project_root);

        let scanned = scan_dir(Path::new(&root))?;
        let scanned_count = scanned.len();

        let mut files = Vec::with_capacity(scanned.len());
        let mut declarations = Vec::new();
        for file in scanned {
            let project_relative_path = strip_base(&file.path, &project_root);
            let declared_type_name = file.declared_type().map(str::to_string);

            if let Some(declaration) = file.declaration {
                declarations.push(declaration);
            }
            if ignore.ignores_path(&project_relative_path)
                || ignore.ignores_class(declared_type_name.as_deref())
            {
                continue;
            }

            files.push(DiscoveredFile {
                root_relative_path: strip_base(&file.path, &root),
                absolute_path: file.path,
                project_relative_path,
                wildcard_remainder: None,
                declared_type_name,
            });
        }

        tracing::debug!(
            root = %root,
            alias = alias.as_deref().unwrap_or(""),
            scanned = scanned_count,
            kept = files.len(),
            "opened source tree"
        );

        Ok(Self {
            alias,
            local_root: strip_base(&root, &project_root),
            root,
            files,
            declarations,
        })
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Canonical absolute path of the root
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root relative to the project, e.g. `/src/App`
    pub fn local_root(&self) -> &str {
        &self.local_root
    }

    /// The alias if there is one, otherwise the project-relative root
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.local_root)
    }

    /// Files left after ignore filtering, sorted by path
    pub fn files(&self) -> &[DiscoveredFile] {
        &self.files
    }

    /// Every class declared under the root, ignored files included
    pub fn declarations(&self) -> &[ClassDeclaration] {
        &self.declarations
    }
}

fn canonical_dir(project_root: &Path, dir: &str) -> Result<PathBuf> {
    let normalized = dir.replace('\\', "/");
    let path = Path::new(&normalized);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    };
    let canonical =
        dunce::canonicalize(&path).map_err(|_| error::source_dir_not_found(dir))?;
    if !canonical.is_dir() {
        return Err(error::source_dir_not_found(dir));
    }
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> (TempDir, PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = dunce::canonicalize(temp.path()).expect("canonical");
        let write = |relative: &str, content: &str| {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            std::fs::write(path, content).expect("write");
        };
        write("src/App/MyApp1/Routes/web.php", "<?php\n");
        write(
            "src/App/MyApp1/Commands/Run.php",
            "<?php namespace App\\MyApp1\\Commands; class Run extends \\Illuminate\\Console\\Command {}",
        );
        write(
            "src/App/MyApp2/Commands/Other.php",
            "<?php namespace App\\MyApp2\\Commands; class Other {}",
        );
        (temp, root)
    }

    #[test]
    fn test_paths_are_relative_to_project_and_root() {
        let (_temp, root) = project();
        let tree = SourceTree::open(&root, "src/App", None, &IgnoreList::default()).expect("open");

        assert_eq!(tree.local_root(), "/src/App");
        assert_eq!(tree.label(), "/src/App");
        let web = tree
            .files()
            .iter()
            .find(|f| f.root_relative_path == "/MyApp1/Routes/web.php")
            .expect("web route");
        assert_eq!(web.project_relative_path, "/src/App/MyApp1/Routes/web.php");
        assert!(web.absolute_path.ends_with("/src/App/MyApp1/Routes/web.php"));
        assert_eq!(web.declared_type_name, None);
        assert_eq!(web.wildcard_remainder, None);
    }

    #[test]
    fn test_alias_is_the_label() {
        let (_temp, root) = project();
        let tree = SourceTree::open(&root, "src/App", Some("main".into()), &IgnoreList::default())
            .expect("open");
        assert_eq!(tree.alias(), Some("main"));
        assert_eq!(tree.label(), "main");
    }

    #[test]
    fn test_absolute_and_backslash_dirs() {
        let (_temp, root) = project();
        let absolute = to_forward_slashes(&root.join("src").join("App"));
        let tree = SourceTree::open(&root, &absolute, None, &IgnoreList::default()).expect("open");
        assert_eq!(tree.files().len(), 3);

        let tree = SourceTree::open(&root, "src\\App", None, &IgnoreList::default()).expect("open");
        assert_eq!(tree.files().len(), 3);
    }

    #[test]
    fn test_missing_dir() {
        let (_temp, root) = project();
        let err = SourceTree::open(&root, "src/Nope", None, &IgnoreList::default())
            .expect_err("missing");
        assert!(matches!(
            err,
            crate::error::AutoRegError::SourceDirNotFound { ref path } if path == "src/Nope"
        ));
    }

    #[test]
    fn test_file_is_not_a_source_dir() {
        let (_temp, root) = project();
        assert!(
            SourceTree::open(&root, "src/App/MyApp1/Routes/web.php", None, &IgnoreList::default())
                .is_err()
        );
    }

    #[test]
    fn test_ignored_files_keep_their_declarations() {
        let (_temp, root) = project();
        let ignore = IgnoreList::new(&["/src/App/MyApp2", "\\App\\MyApp1\\Commands\\Run"]);
        let tree = SourceTree::open(&root, "src/App", None, &ignore).expect("open");

        let kept: Vec<&str> = tree
            .files()
            .iter()
            .map(|f| f.root_relative_path.as_str())
            .collect();
        assert_eq!(kept, vec!["/MyApp1/Routes/web.php"]);
        assert_eq!(tree.declarations().len(), 2);
    }
}
