//! Glob pattern compilation
//!
//! A glob such as `Resources/Views/**/*.php` is split into a directory part,
//! a base filename and an extension. Each part becomes a regex fragment, and
//! the fragments are assembled into the anchored regexes the resolver runs
//! against paths inside a source root (always in the form `/App/Dir/file.php`):
//!
//! - relevance: does the path end with `directory/basename.extension`?
//! - app: everything before the directory part
//! - name: the base filename
//! - wildcard remainder: everything after the directory part that precedes the first `*`
//!
//! `*` matches one or more characters within a path segment and `**` matches
//! zero or more whole segments.

use regex::{Captures, Regex};

use crate::common::string_utils::snake;
use crate::error::{self, Result};
use crate::hierarchy::TypeHierarchy;

/// `(directory/)?(basename)(.extension)` with every group optional
const PATTERN_PARTS: &str = r"^(/?.+/)?(?:(.+)(\.[^.]+))?$";

/// A compiled glob pattern and the regexes derived from it
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    dir: String,
    dir_before_star: String,
    base_filename: String,
    extension: String,
    relevance: Regex,
    full_path: Option<Regex>,
    app: Option<Regex>,
    name: Option<Regex>,
    stars_and_after: Regex,
    after_star_dir: Option<Regex>,
    required_types: Vec<Option<String>>,
}

impl GlobPattern {
    /// Compile a glob pattern.
    ///
    /// `\` separators are accepted and treated as `/`. A pattern that can't be
    /// split into directory, filename and extension is a configuration error.
    pub fn compile(pattern: &str) -> Result<Self> {
        let normalized = pattern.replace('\\', "/");
        let splitter = Regex::new(PATTERN_PARTS).map_err(|_| error::invalid_pattern(pattern))?;
        let caps = splitter
            .captures(&normalized)
            .ok_or_else(|| error::invalid_pattern(pattern))?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let raw_dir = strip_leading_globstar(group(1));
        let raw_dir_before_star = raw_dir.split('*').next().unwrap_or("");

        let dir = prep_dir(&raw_dir);
        let dir_before_star = prep_dir(raw_dir_before_star);
        let base_filename = prep_base_filename(group(2));
        let extension = prep_extension(group(3));

        let file = format!("{base_filename}{extension}");
        let (relevance, app, name) = if dir.is_empty() {
            (
                format!("^.*/{file}$"),
                format!("^(.*)/{file}$"),
                format!("^.*/({base_filename}){extension}$"),
            )
        } else {
            (
                format!("^.*/{dir}/{file}$"),
                format!("^(.*)/{dir}/{file}$"),
                format!("^.*/{dir}/({base_filename}){extension}$"),
            )
        };
        let (stars_and_after, after_star_dir) = if dir_before_star.is_empty() {
            ("^.*/(.*)$".to_string(), None)
        } else {
            (
                format!("^.*/{dir_before_star}/(.*)$"),
                Some(format!(
                    "^.+/{dir_before_star}/(?:(.+)/)?{base_filename}{extension}$"
                )),
            )
        };

        let build = |source: &str| Regex::new(source).map_err(|_| error::invalid_pattern(pattern));
        Ok(Self {
            pattern: pattern.to_string(),
            relevance: build(&relevance)?,
            full_path: None,
            app: Some(build(&app)?),
            name: Some(build(&name)?),
            stars_and_after: build(&stars_and_after)?,
            after_star_dir: after_star_dir.as_deref().map(build).transpose()?,
            required_types: vec![None],
            dir,
            dir_before_star,
            base_filename,
            extension,
        })
    }

    /// Treat every match as the directory before the first wildcard.
    ///
    /// Used by directory kinds (migrations, translations, views, view
    /// components): matched files condense into their directory, the app is
    /// the parent of the matched directory and no name is extracted.
    pub fn into_directory_unit(mut self) -> Result<Self> {
        let build =
            |source: String| Regex::new(&source).map_err(|_| error::invalid_pattern(&self.pattern));
        let full_path = build(format!(r"^(.+{})/.*(?:\.[^./]*)?$", self.dir_before_star))?;
        let app = build(format!("^(.+)/{}", self.dir))?;
        self.full_path = Some(full_path);
        self.app = Some(app);
        self.name = None;
        Ok(self)
    }

    /// Restrict matches to files declaring one of `types`.
    ///
    /// `None` in the list stands for "declares no class"; an empty list
    /// accepts every file.
    #[must_use]
    pub fn with_required_types(mut self, types: Vec<Option<String>>) -> Self {
        self.required_types = types;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The directory part as a regex fragment.
    pub fn dir_part(&self) -> &str {
        &self.dir
    }

    /// The directory part preceding the first `*`, as a regex fragment.
    pub fn dir_before_star_part(&self) -> &str {
        &self.dir_before_star
    }

    pub fn base_filename_part(&self) -> &str {
        &self.base_filename
    }

    pub fn extension_part(&self) -> &str {
        &self.extension
    }

    pub fn relevance_regex(&self) -> &Regex {
        &self.relevance
    }

    pub fn app_regex(&self) -> Option<&Regex> {
        self.app.as_ref()
    }

    pub fn name_regex(&self) -> Option<&Regex> {
        self.name.as_ref()
    }

    pub fn stars_and_after_regex(&self) -> &Regex {
        &self.stars_and_after
    }

    pub fn required_types(&self) -> &[Option<String>] {
        &self.required_types
    }

    /// Does a path within a source root (e.g. `/MyApp1/Routes/web.php`) match?
    pub fn is_relevant(&self, root_relative: &str) -> bool {
        self.relevance.is_match(root_relative)
    }

    /// Does the declared class satisfy the required types?
    pub fn accepts_type(&self, declared: Option<&str>, hierarchy: &dyn TypeHierarchy) -> bool {
        if self.required_types.is_empty() {
            return true;
        }
        self.required_types
            .iter()
            .any(|required| match (required, declared) {
                (None, None) => true,
                (Some(base), Some(declared)) => hierarchy.is_subtype(declared, base),
                _ => false,
            })
    }

    /// Trim a path down to the unit it belongs to.
    ///
    /// Unchanged unless the pattern is a directory unit, in which case
    /// everything after the directory before the first wildcard is removed.
    pub fn condense(&self, path: &str) -> String {
        let Some(regex) = &self.full_path else {
            return path.to_string();
        };
        match regex.captures(path) {
            Some(caps) => join_groups(&caps).trim_end_matches('/').to_string(),
            None => path.to_string(),
        }
    }

    /// Remove the sub-namespace mirroring the trimmed path from a class name.
    ///
    /// When `path` condenses, the class's namespace relative to the unit is
    /// expected to follow the removed directories, so
    /// `\App\ViewComponents\Sub\Card` at `.../ViewComponents/Sub/Card.php`
    /// becomes `\App\ViewComponents`.
    pub fn condense_type_name(&self, path: &str, type_name: Option<&str>) -> Option<String> {
        let type_name = type_name?;
        let condensed = self.condense(path);
        if condensed == path {
            return Some(type_name.to_string());
        }

        let removed = path.get(condensed.len()..).unwrap_or("");
        let mut parts: Vec<&str> = removed.split('/').collect();
        let last = parts.pop().unwrap_or("");
        let stem = match last.rfind('.') {
            Some(pos) => &last[..pos],
            None => last,
        };
        parts.push(stem);
        let removed_namespace = parts.join("\\");

        Some(
            type_name
                .strip_suffix(removed_namespace.as_str())
                .unwrap_or(type_name)
                .to_string(),
        )
    }

    /// The app a path belongs to, snake-cased and `.`-joined.
    pub fn pick_app(&self, app_path: &str) -> Option<String> {
        regex_pick(app_path, self.app.as_ref())
    }

    /// The base name of a path, snake-cased.
    pub fn pick_name(&self, app_path: &str) -> Option<String> {
        regex_pick(app_path, self.name.as_ref())
    }

    /// The directories between the wildcard start and the filename, e.g. `SubDir1/SubDir2`.
    pub fn pick_after_star_dir(&self, app_path: &str) -> Option<String> {
        self.after_star_dir
            .as_ref()?
            .captures(app_path)?
            .get(1)
            .map(|m| m.as_str().to_string())
    }

    /// Everything after the directory part that precedes the first `*`.
    pub fn pick_stars_and_after(&self, app_path: &str) -> Option<String> {
        self.stars_and_after
            .captures(app_path)?
            .get(1)
            .map(|m| m.as_str().to_string())
    }
}

/// Join capture groups with `/`; unmatched groups count as empty.
fn join_groups(caps: &Captures<'_>) -> String {
    let mut groups: Vec<Option<&str>> = caps.iter().skip(1).map(|g| g.map(|m| m.as_str())).collect();
    while groups.last().is_some_and(Option::is_none) {
        groups.pop();
    }
    groups
        .into_iter()
        .map(|g| g.unwrap_or(""))
        .collect::<Vec<_>>()
        .join("/")
}

fn regex_pick(value: &str, regex: Option<&Regex>) -> Option<String> {
    let caps = regex?.captures(value)?;
    let joined = join_groups(&caps);
    let picked = joined
        .trim_start_matches('/')
        .split('/')
        .map(|segment| snake(segment, "_"))
        .collect::<Vec<_>>()
        .join(".");
    (!picked.is_empty()).then_some(picked)
}

/// Drop a leading `**/`; every relevance regex already admits any prefix.
fn strip_leading_globstar(dir: &str) -> String {
    let collapsed = collapse_stars(dir, "**");
    let mut rest = collapsed.trim_start_matches('/');
    while let Some(stripped) = rest.strip_prefix("**/") {
        rest = stripped;
    }
    if rest.len() == collapsed.trim_start_matches('/').len() {
        collapsed
    } else {
        rest.to_string()
    }
}

/// Replace runs of two or more `*` with `replacement`.
fn collapse_stars(value: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut run = 0usize;
    for c in value.chars() {
        if c == '*' {
            run += 1;
            continue;
        }
        flush_stars(&mut result, run, replacement);
        run = 0;
        result.push(c);
    }
    flush_stars(&mut result, run, replacement);
    result
}

fn flush_stars(result: &mut String, run: usize, replacement: &str) {
    match run {
        0 => {}
        1 => result.push('*'),
        _ => result.push_str(replacement),
    }
}

fn prep_dir(dir: &str) -> String {
    let escaped = regex::escape(&collapse_stars(dir, "**"));
    let replaced = escaped
        .replace(r"/\*\*", "(?:/[^/]+)*")
        .replace(r"\*", "[^/]+");
    let trimmed = replaced.strip_prefix('/').unwrap_or(&replaced);
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}

fn prep_base_filename(base: &str) -> String {
    regex::escape(&collapse_stars(base, "*")).replace(r"\*", "[^/]+")
}

fn prep_extension(extension: &str) -> String {
    regex::escape(extension).replace(r"\*", "[^./]+")
}
