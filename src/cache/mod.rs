//! Result cache
//!
//! Resolved registrations are cached in two YAML files so that later runs can
//! skip scanning:
//!
//! ```text
//! <project>/bootstrap/cache/
//! ├── auto-reg.yaml        main record: version, project root, config, registrations
//! └── auto-reg-meta.yaml   meta record: version, meta rows
//! ```
//!
//! The directory can be overridden with the `AUTOREG_CACHE_DIR` environment
//! variable or an explicit path. Each file starts with a `#` banner.
//!
//! Files are replaced by deleting then writing. No lock is taken, so two
//! processes rebuilding at once race and the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::context::{MainCacheRecord, MetaCacheRecord};
use crate::error::{self, Result};

/// Cache directory relative to the project root
pub const DEFAULT_CACHE_DIR: &str = "bootstrap/cache";

/// Environment variable overriding the cache directory
pub const CACHE_DIR_ENV: &str = "AUTOREG_CACHE_DIR";

pub const MAIN_CACHE_FILE: &str = "auto-reg.yaml";
pub const META_CACHE_FILE: &str = "auto-reg-meta.yaml";

const MAIN_BANNER: &str = "\
#--------------------------------------------------------------------------
# autoreg cache data
#--------------------------------------------------------------------------
#
# The settings autoreg used and the resources it registers.
#
";

const META_BANNER: &str = "\
#--------------------------------------------------------------------------
# autoreg \"meta\" cache data
#--------------------------------------------------------------------------
#
# Descriptions of the resources autoreg registers, shown by 'autoreg list'.
#
";

/// Records read back from the cache
#[derive(Debug, Clone)]
pub struct LoadedCache {
    pub main: MainCacheRecord,
    /// Present only when meta was asked for
    pub meta: Option<MetaCacheRecord>,
}

/// The pair of cache files for one project
#[derive(Debug, Clone)]
pub struct ResultCache {
    main_path: PathBuf,
    meta_path: PathBuf,
}

impl ResultCache {
    /// Cache files inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            main_path: dir.join(MAIN_CACHE_FILE),
            meta_path: dir.join(META_CACHE_FILE),
        }
    }

    /// Cache files for a project: `AUTOREG_CACHE_DIR` if set, otherwise
    /// `<project>/bootstrap/cache`.
    pub fn for_project(project_root: &Path) -> Self {
        match std::env::var(CACHE_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::in_dir(dir),
            _ => Self::in_dir(project_root.join(DEFAULT_CACHE_DIR)),
        }
    }

    pub fn main_path(&self) -> &Path {
        &self.main_path
    }

    pub fn meta_path(&self) -> &Path {
        &self.meta_path
    }

    /// Is there a main cache file?
    pub fn exists(&self) -> bool {
        self.main_path.is_file()
    }

    /// Read the cache.
    ///
    /// A missing main file is `Ok(None)`. A main file that can't be read or
    /// parsed is an error, and so is a missing or broken meta file when meta
    /// is needed.
    pub fn load(&self, need_meta: bool) -> Result<Option<LoadedCache>> {
        let Some(main) = read_record::<MainCacheRecord>(&self.main_path)? else {
            tracing::debug!(path = %self.main_path.display(), "no cache file");
            return Ok(None);
        };

        let meta = if need_meta {
            let meta = read_record::<MetaCacheRecord>(&self.meta_path)?;
            Some(meta.ok_or_else(|| {
                error::cache_unreadable(self.meta_path.display().to_string(), "file is missing")
            })?)
        } else {
            None
        };

        tracing::debug!(path = %self.main_path.display(), "read cache");
        Ok(Some(LoadedCache { main, meta }))
    }

    /// Replace both cache files.
    pub fn save(&self, main: &MainCacheRecord, meta: &MetaCacheRecord) -> Result<()> {
        self.clear()?;
        write_record(&self.main_path, MAIN_BANNER, main)?;
        write_record(&self.meta_path, META_BANNER, meta)?;
        tracing::info!(path = %self.main_path.display(), "wrote cache");
        Ok(())
    }

    /// Remove both cache files. Files that don't exist are skipped.
    pub fn clear(&self) -> Result<()> {
        for path in [&self.main_path, &self.meta_path] {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed cache file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(error::cache_write_failed(
                        path.display().to_string(),
                        e.to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(error::cache_unreadable(path.display().to_string(), e.to_string())),
    };
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| error::cache_unreadable(path.display().to_string(), e.to_string()))
}

fn write_record<T: Serialize>(path: &Path, banner: &str, record: &T) -> Result<()> {
    let failed = |reason: String| error::cache_write_failed(path.display().to_string(), reason);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
    }
    let body = serde_yaml::to_string(record).map_err(|e| failed(e.to_string()))?;
    fs::write(path, format!("{banner}\n{body}")).map_err(|e| failed(e.to_string()))
}
