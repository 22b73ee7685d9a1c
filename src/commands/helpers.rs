//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::cache::ResultCache;
use crate::cli::Cli;
use crate::config::{AutoRegConfig, CONFIG_FILE};
use crate::detect::Detector;
use crate::error::{self, Result};

/// The global options every command shares
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub workspace: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub source_dirs: Vec<String>,
    pub cache_dir: Option<PathBuf>,
}

impl ProjectOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            workspace: cli.workspace.clone(),
            config: cli.config.clone(),
            source_dirs: cli.source_dirs.clone(),
            cache_dir: cli.cache_dir.clone(),
        }
    }

    /// The project root: `--workspace` or the current directory
    pub fn project_root(&self) -> Result<PathBuf> {
        resolve_workspace_path(self.workspace.clone())
    }

    /// Load the configuration file, applying `--source-dir`.
    ///
    /// Without `--config` the file is `autoreg.yaml` in the project root, and
    /// may be missing when source directories are given on the command line.
    pub fn load_config(&self, project_root: &Path) -> Result<AutoRegConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| project_root.join(CONFIG_FILE));

        let mut config = if self.config.is_none() && !path.exists() && !self.source_dirs.is_empty() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            AutoRegConfig::default()
        } else {
            AutoRegConfig::load(&path)?
        };

        if !self.source_dirs.is_empty() {
            config.set_source_dirs(self.source_dirs.clone());
            config.validate()?;
        }
        Ok(config)
    }

    pub fn cache(&self, project_root: &Path) -> ResultCache {
        match &self.cache_dir {
            Some(dir) => ResultCache::in_dir(dir),
            None => ResultCache::for_project(project_root),
        }
    }

    /// A detector for the project, not yet initialised
    pub fn detector(&self, need_meta: bool) -> Result<Detector> {
        let project_root = self.project_root()?;
        let config = self.load_config(&project_root)?;
        let cache = self.cache(&project_root);
        Detector::new(&project_root, config, cache, need_meta)
    }
}

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| error::io_error(format!("Failed to get current directory: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutoRegError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_without_source_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let options = ProjectOptions::default();
        let err = options.load_config(temp.path()).unwrap_err();
        assert!(matches!(err, AutoRegError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_source_dir_flag_without_config_file() {
        let temp = TempDir::new().unwrap();
        let options = ProjectOptions {
            source_dirs: vec!["src/App".to_string()],
            ..ProjectOptions::default()
        };
        let config = options.load_config(temp.path()).unwrap();
        assert_eq!(
            config.source_dir.entries(),
            vec![(None, "src/App".to_string())]
        );
    }

    #[test]
    fn test_source_dir_flag_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "source_dir: src/Old\nenabled:\n  broadcast: true\n",
        )
        .unwrap();

        let from_file = ProjectOptions::default().load_config(temp.path()).unwrap();
        assert_eq!(from_file.source_dir.entries(), vec![(None, "src/Old".to_string())]);

        let options = ProjectOptions {
            source_dirs: vec!["src/New".to_string()],
            ..ProjectOptions::default()
        };
        let config = options.load_config(temp.path()).unwrap();
        assert_eq!(config.source_dir.entries(), vec![(None, "src/New".to_string())]);
        assert!(config.enabled.broadcast);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let options = ProjectOptions {
            config: Some(temp.path().join("custom.yaml")),
            source_dirs: vec!["src/App".to_string()],
            ..ProjectOptions::default()
        };
        assert!(options.load_config(temp.path()).is_err());
    }

    #[test]
    fn test_cache_dir_flag() {
        let temp = TempDir::new().unwrap();
        let options = ProjectOptions {
            cache_dir: Some(temp.path().to_path_buf()),
            ..ProjectOptions::default()
        };
        let cache = options.cache(Path::new("/srv/project"));
        assert_eq!(cache.main_path(), temp.path().join("auto-reg.yaml"));
    }
}
