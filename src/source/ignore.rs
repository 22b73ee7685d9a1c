//! Ignore-list matching
//!
//! Each entry is tried both as a path and as a class name, so one list can
//! mix `/src/App/Legacy/web.php`, `/src/App/Legacy`, `\App\Legacy\Thing` and
//! `\App\Legacy`.

/// Compiled ignore entries
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    files: Vec<String>,
    dirs: Vec<String>,
    classes: Vec<String>,
    namespaces: Vec<String>,
}

impl IgnoreList {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut list = Self::default();
        for entry in entries {
            let entry = entry.as_ref();

            let path = entry.replace('\\', "/");
            list.files.push(format!("/{}", path.trim_start_matches('/')));
            let dir = path.trim_matches('/');
            if !dir.is_empty() {
                list.dirs.push(format!("/{dir}/"));
            }

            list.classes
                .push(format!("\\{}", entry.trim_start_matches('\\')));
            let namespace = entry.trim_matches('\\');
            if !namespace.is_empty() {
                list.namespaces.push(format!("\\{namespace}\\"));
            }
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Is a project-relative path (e.g. `/src/App/MyApp1/Routes/web.php`) ignored?
    pub fn ignores_path(&self, project_relative: &str) -> bool {
        self.files.iter().any(|f| f == project_relative)
            || self.dirs.iter().any(|d| project_relative.starts_with(d.as_str()))
    }

    /// Is a fully-qualified class name ignored?
    pub fn ignores_class(&self, type_name: Option<&str>) -> bool {
        let Some(type_name) = type_name else {
            return false;
        };
        self.classes.iter().any(|c| c == type_name)
            || self.namespaces.iter().any(|n| type_name.starts_with(n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_ignores_path {
        ($name:ident, $entry:expr, $path:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let list = IgnoreList::new(&[$entry]);
                assert_eq!(list.ignores_path($path), $expected);
            }
        };
    }

    test_ignores_path!(
        test_exact_file,
        "/src/App/MyApp1/Routes/web.php",
        "/src/App/MyApp1/Routes/web.php",
        true
    );
    test_ignores_path!(
        test_file_without_leading_slash,
        "src/App/MyApp1/Routes/web.php",
        "/src/App/MyApp1/Routes/web.php",
        true
    );
    test_ignores_path!(
        test_sibling_file_is_kept,
        "/src/App/MyApp1/Routes/web.php",
        "/src/App/MyApp1/Routes/api.php",
        false
    );
    test_ignores_path!(
        test_directory_prefix,
        "/src/App/MyApp1/",
        "/src/App/MyApp1/Routes/web.php",
        true
    );
    test_ignores_path!(
        test_directory_prefix_respects_boundary,
        "/src/App/MyApp1",
        "/src/App/MyApp10/Routes/web.php",
        false
    );
    test_ignores_path!(
        test_backslash_path,
        "\\src\\App\\MyApp1",
        "/src/App/MyApp1/Routes/web.php",
        true
    );

    #[test]
    fn test_exact_class() {
        let list = IgnoreList::new(&["App\\MyApp1\\Commands\\TestCommand1"]);
        assert!(list.ignores_class(Some("\\App\\MyApp1\\Commands\\TestCommand1")));
        assert!(!list.ignores_class(Some("\\App\\MyApp1\\Commands\\TestCommand10")));
        assert!(!list.ignores_class(None));
    }

    #[test]
    fn test_namespace_prefix() {
        let list = IgnoreList::new(&["\\App\\MyApp1\\"]);
        assert!(list.ignores_class(Some("\\App\\MyApp1\\Commands\\TestCommand1")));
        assert!(!list.ignores_class(Some("\\App\\MyApp10\\Thing")));
        assert!(!list.ignores_class(Some("\\App\\MyApp1")));
    }

    #[test]
    fn test_empty_list() {
        let list = IgnoreList::new::<&str>(&[]);
        assert!(list.is_empty());
        assert!(!list.ignores_path("/anything"));
        assert!(!list.ignores_class(Some("\\Anything")));
    }
}
