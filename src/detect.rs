//! Detection: the top-level orchestrator
//!
//! A [`Detector`] owns the resolution context for one project. Opening it
//! either hydrates the context from a valid cache or resolves every kind
//! from scratch:
//!
//! ```text
//! load cache ──valid──▶ hydrated
//!     │
//!     ├─missing──────▶ resolve fresh
//!     └─stale/broken─▶ resolve fresh (with meta) ─▶ save cache
//! ```
//!
//! Source trees are scanned at most once per detector, however many times
//! it resolves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::cache::ResultCache;
use crate::common::string_utils::CaseType;
use crate::config::AutoRegConfig;
use crate::context::{MetaRow, Registration, ResolutionContext};
use crate::error::{self, Result};
use crate::hierarchy::{ScannedHierarchy, TypeHierarchy};
use crate::path_utils::to_forward_slashes;
use crate::resolver::{ResolverOptions, ResourceKind, ResourceResolver};
use crate::source::{IgnoreList, SourceTree};

/// Resolves and caches the resources of one project
pub struct Detector {
    project_root: PathBuf,
    context: ResolutionContext,
    cache: ResultCache,
    hierarchy: Option<Arc<dyn TypeHierarchy>>,
    trees: Option<Vec<SourceTree>>,
    scanned_hierarchy: Option<ScannedHierarchy>,
    loaded_from_cache: bool,
}

impl Detector {
    /// A detector with an empty context. Nothing is read until
    /// [`Detector::initialise`] or [`Detector::resolve_fresh`] runs.
    pub fn new(
        project_root: &Path,
        config: AutoRegConfig,
        cache: ResultCache,
        need_meta: bool,
    ) -> Result<Self> {
        let project_root = dunce::canonicalize(project_root).map_err(|e| {
            error::io_error(format!(
                "Project root '{}' is not accessible: {e}",
                project_root.display()
            ))
        })?;
        let context = ResolutionContext::new(to_forward_slashes(&project_root), config, need_meta);
        Ok(Self {
            project_root,
            context,
            cache,
            hierarchy: None,
            trees: None,
            scanned_hierarchy: None,
            loaded_from_cache: false,
        })
    }

    /// Create and initialise a detector
    pub fn open(
        project_root: &Path,
        config: AutoRegConfig,
        cache: ResultCache,
        need_meta: bool,
    ) -> Result<Self> {
        let mut detector = Self::new(project_root, config, cache, need_meta)?;
        detector.initialise()?;
        Ok(detector)
    }

    /// Answer subtype questions with `hierarchy` instead of the one built
    /// from scanned sources.
    ///
    /// The injected hierarchy replaces the scanned one entirely, so it must
    /// also carry the project's own `extends`/`implements` edges.
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: Arc<dyn TypeHierarchy>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Use the cache when it is valid, otherwise resolve.
    ///
    /// A cache that existed but couldn't be used is rebuilt with meta and
    /// saved again.
    pub fn initialise(&mut self) -> Result<()> {
        let need_meta = self.context.need_meta();
        let (loaded, cache_existed) = match self.cache.load(need_meta) {
            Ok(Some(loaded)) => (Some(loaded), true),
            Ok(None) => (None, false),
            Err(e) => {
                tracing::info!(error = %e, "cache could not be read, rebuilding");
                (None, true)
            }
        };

        if let Some(loaded) = loaded {
            if self.context.is_main_record_valid(Some(&loaded.main))
                && self.context.is_meta_record_valid(loaded.meta.as_ref())
            {
                self.context.hydrate(loaded.main, loaded.meta);
                self.loaded_from_cache = true;
                tracing::info!(path = %self.cache.main_path().display(), "loaded from cache");
                return Ok(());
            }
            tracing::info!(path = %self.cache.main_path().display(), "cache is stale, rebuilding");
        }

        self.resolve_fresh(need_meta || cache_existed)?;
        if cache_existed {
            self.save_cache()?;
        }
        Ok(())
    }

    /// Resolve every kind from the source trees
    pub fn resolve_fresh(&mut self, need_meta: bool) -> Result<()> {
        self.ensure_scanned()?;
        let trees = self.trees.as_deref().unwrap_or_default();
        let empty = ScannedHierarchy::default();
        let hierarchy: &dyn TypeHierarchy = match (&self.hierarchy, &self.scanned_hierarchy) {
            (Some(injected), _) => injected.as_ref(),
            (None, Some(scanned)) => scanned,
            (None, None) => &empty,
        };

        let config = self.context.config();
        let mut resolutions = Vec::with_capacity(ResourceKind::ALL.len());
        for kind in ResourceKind::ALL {
            let resolver =
                ResourceResolver::new(kind, &config.patterns_for(kind), resolver_options(config, kind))?;
            resolutions.push((kind, resolver.resolve(trees, hierarchy, need_meta)));
        }

        for (kind, resolution) in resolutions {
            self.context.set_resolved(kind, resolution);
        }
        self.loaded_from_cache = false;
        Ok(())
    }

    fn ensure_scanned(&mut self) -> Result<()> {
        if self.trees.is_some() {
            return Ok(());
        }
        let config = self.context.config();
        let ignore = IgnoreList::new(config.ignore.as_slice());
        let trees = config
            .source_dir
            .entries()
            .into_iter()
            .map(|(alias, dir)| SourceTree::open(&self.project_root, &dir, alias, &ignore))
            .collect::<Result<Vec<_>>>()?;

        if self.hierarchy.is_none() {
            self.scanned_hierarchy = Some(ScannedHierarchy::from_declarations(
                trees.iter().flat_map(SourceTree::declarations),
            ));
        }
        tracing::debug!(trees = trees.len(), "scanned source trees");
        self.trees = Some(trees);
        Ok(())
    }

    pub fn save_cache(&self) -> Result<()> {
        self.cache
            .save(&self.context.main_record(), &self.context.meta_record())
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }

    pub fn was_loaded_from_cache(&self) -> bool {
        self.loaded_from_cache
    }

    pub fn config(&self) -> &AutoRegConfig {
        self.context.config()
    }

    pub fn is_kind_enabled(&self, kind: ResourceKind) -> bool {
        self.context.config().is_enabled(kind)
    }

    /// The payload to register for a kind
    pub fn registration(&self, kind: ResourceKind) -> &Registration {
        self.context.registration(kind)
    }

    pub fn all_meta(&self) -> &IndexMap<ResourceKind, Vec<MetaRow>> {
        self.context.all_meta()
    }

    /// Distinct apps across all meta rows, in first-seen order
    pub fn detected_apps(&self) -> Vec<Option<String>> {
        let mut apps: Vec<Option<String>> = Vec::new();
        for row in self.context.all_meta().values().flatten() {
            if !apps.contains(&row.app) {
                apps.push(row.app.clone());
            }
        }
        apps
    }

    /// Did any kind resolve anything?
    pub fn resources_were_detected(&self) -> bool {
        self.context
            .all_registrations()
            .values()
            .any(|registration| !registration.is_empty())
    }

    pub fn api_middleware(&self) -> Vec<String> {
        self.context.config().api_middleware()
    }

    pub fn web_middleware(&self) -> Vec<String> {
        self.context.config().web_middleware()
    }

    /// Broadcast auth routes are registered only when broadcast channels are
    /// enabled and `settings.broadcast.run_auth` is on
    pub fn should_register_broadcast_routes(&self) -> bool {
        let config = self.context.config();
        config.enabled.broadcast && config.settings.broadcast.run_auth
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// A project-relative path made absolute; an empty path gives the root
    pub fn resolve_project_path(&self, relative: &str) -> PathBuf {
        let relative = relative.trim_start_matches(['/', '\\']);
        if relative.is_empty() {
            self.project_root.clone()
        } else {
            self.project_root.join(relative)
        }
    }

    pub fn main_cache_path(&self) -> &Path {
        self.cache.main_path()
    }

    pub fn meta_cache_path(&self) -> &Path {
        self.cache.meta_path()
    }
}

fn resolver_options(config: &AutoRegConfig, kind: ResourceKind) -> ResolverOptions {
    let settings = &config.settings;
    let path_case = match kind {
        ResourceKind::ConfigFile => settings.configs.path_case,
        ResourceKind::TranslationDirectory => settings.translations.path_case,
        ResourceKind::ViewDirectory => settings.views.templates.path_case,
        _ => CaseType::Snake,
    };
    ResolverOptions {
        enabled: config.is_enabled(kind),
        path_case,
        use_app_name: kind != ResourceKind::ConfigFile || settings.configs.use_app_name,
    }
}
