//! Path string utilities
//!
//! Every path the resolver handles is a `/`-separated string, whatever the
//! platform, so that globs, ignore entries and cache records compare equal.

use std::path::Path;

/// Convert a path to a string with forward slashes.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use autoreg::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("src/App")), "src/App");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Remove `base` from the start of `path`, keeping the separator that follows it.
///
/// Only strips at a path boundary: `/srv/app` is removed from
/// `/srv/app/src/x.php` but not from `/srv/application/x.php`. Paths outside
/// `base` are returned unchanged.
///
/// # Examples
///
/// ```
/// use autoreg::path_utils::strip_base;
///
/// assert_eq!(strip_base("/srv/app/src/x.php", "/srv/app"), "/src/x.php");
/// assert_eq!(strip_base("/srv/application/x.php", "/srv/app"), "/srv/application/x.php");
/// ```
pub fn strip_base(path: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

/// Drop the last extension from the final segment of a relative path.
///
/// # Examples
///
/// ```
/// use autoreg::path_utils::strip_extension;
///
/// assert_eq!(strip_extension("sub/button.blade.php"), "sub/button.blade");
/// assert_eq!(strip_extension("messages.php"), "messages");
/// assert_eq!(strip_extension("README"), "README");
/// ```
pub fn strip_extension(path: &str) -> String {
    let (dir, file) = match path.rfind('/') {
        Some(pos) => (Some(&path[..pos]), &path[pos + 1..]),
        None => (None, path),
    };
    let stem = match file.rfind('.') {
        Some(pos) => &file[..pos],
        None => file,
    };
    match dir {
        Some(dir) if !dir.is_empty() => format!("{dir}/{stem}"),
        _ => stem.to_string(),
    }
}
