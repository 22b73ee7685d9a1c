//! Resolution context
//!
//! Holds the configuration a run used and what every resolver produced: the
//! registration payloads handed to the framework and the meta rows shown by
//! `autoreg list`. The context converts to and from the two cache records,
//! and decides whether records read back from disk can be trusted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::AutoRegConfig;
use crate::resolver::ResourceKind;

/// Bumped whenever the layout of the cache records changes
pub const CACHE_DATA_VERSION: u32 = 1;

/// A view component namespace: the Blade prefix and the PHP namespace it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNamespace {
    pub prefix: String,
    pub namespace: String,
}

/// The payload one kind registers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "entries", rename_all = "snake_case")]
pub enum Registration {
    /// Paths or class names
    List(Vec<String>),
    /// Registration name to path or class name
    Named(IndexMap<String, String>),
    /// App to view component namespace
    Paired(IndexMap<String, ComponentNamespace>),
}

impl Registration {
    /// The empty payload of the shape `kind` registers
    pub fn empty_for(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::ViewComponentClass => Registration::Paired(IndexMap::new()),
            k if k.is_keyed() => Registration::Named(IndexMap::new()),
            _ => Registration::List(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Registration::List(items) => items.len(),
            Registration::Named(map) => map.len(),
            Registration::Paired(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Registration::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Registration::Named(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_paired(&self) -> Option<&IndexMap<String, ComponentNamespace>> {
        match self {
            Registration::Paired(map) => Some(map),
            _ => None,
        }
    }
}

/// A human-readable description of one resolved resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRow {
    /// Source alias, or the project-relative source root
    pub source: String,
    pub app: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Project-relative path, with a leading `/`
    pub path: String,
    pub example: Option<String>,
}

/// What one resolver produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub registration: Registration,
    pub meta: Vec<MetaRow>,
}

impl Resolution {
    pub fn empty(kind: ResourceKind) -> Self {
        Self {
            registration: Registration::empty_for(kind),
            meta: Vec::new(),
        }
    }
}

/// The "main" cache record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainCacheRecord {
    pub cache_data_version: u32,
    pub project_root: String,
    pub config_data: AutoRegConfig,
    pub resolved: IndexMap<ResourceKind, Registration>,
}

/// The "meta" cache record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCacheRecord {
    pub cache_data_version: u32,
    pub meta: IndexMap<ResourceKind, Vec<MetaRow>>,
}

/// Configuration plus everything resolved from it for one project
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    project_root: String,
    config: AutoRegConfig,
    need_meta: bool,
    resolved: IndexMap<ResourceKind, Registration>,
    meta: IndexMap<ResourceKind, Vec<MetaRow>>,
}

impl ResolutionContext {
    /// An empty context; every kind starts with an empty payload
    pub fn new(project_root: impl Into<String>, config: AutoRegConfig, need_meta: bool) -> Self {
        let mut context = Self {
            project_root: project_root.into(),
            config,
            need_meta,
            resolved: IndexMap::new(),
            meta: IndexMap::new(),
        };
        context.reset();
        context
    }

    fn reset(&mut self) {
        self.resolved = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, Registration::empty_for(kind)))
            .collect();
        self.meta = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();
    }

    pub fn project_root(&self) -> &str {
        &self.project_root
    }

    pub fn config(&self) -> &AutoRegConfig {
        &self.config
    }

    /// Were meta rows requested for this run?
    pub fn need_meta(&self) -> bool {
        self.need_meta
    }

    pub fn set_resolved(&mut self, kind: ResourceKind, resolution: Resolution) {
        self.resolved.insert(kind, resolution.registration);
        self.meta.insert(kind, resolution.meta);
    }

    pub fn registration(&self, kind: ResourceKind) -> &Registration {
        &self.resolved[&kind]
    }

    pub fn all_registrations(&self) -> &IndexMap<ResourceKind, Registration> {
        &self.resolved
    }

    pub fn meta(&self, kind: ResourceKind) -> &[MetaRow] {
        &self.meta[&kind]
    }

    pub fn all_meta(&self) -> &IndexMap<ResourceKind, Vec<MetaRow>> {
        &self.meta
    }

    pub fn main_record(&self) -> MainCacheRecord {
        MainCacheRecord {
            cache_data_version: CACHE_DATA_VERSION,
            project_root: self.project_root.clone(),
            config_data: self.config.clone(),
            resolved: self.resolved.clone(),
        }
    }

    pub fn meta_record(&self) -> MetaCacheRecord {
        MetaCacheRecord {
            cache_data_version: CACHE_DATA_VERSION,
            meta: self.meta.clone(),
        }
    }

    /// Can this main record be used for the current project?
    pub fn is_main_record_valid(&self, record: Option<&MainCacheRecord>) -> bool {
        record.is_some_and(|record| {
            record.cache_data_version == CACHE_DATA_VERSION
                && record.project_root == self.project_root
        })
    }

    /// Can this meta record be used? Always, when meta isn't needed.
    pub fn is_meta_record_valid(&self, record: Option<&MetaCacheRecord>) -> bool {
        if !self.need_meta {
            return true;
        }
        record.is_some_and(|record| record.cache_data_version == CACHE_DATA_VERSION)
    }

    /// Restore configuration and results from cache records.
    ///
    /// Meta rows come from `meta` when meta is needed; otherwise every kind
    /// gets an empty list. Kinds missing from a record are left empty.
    pub fn hydrate(&mut self, main: MainCacheRecord, meta: Option<MetaCacheRecord>) {
        self.reset();
        self.config = main.config_data;
        for (kind, registration) in main.resolved {
            self.resolved.insert(kind, registration);
        }
        if self.need_meta {
            for (kind, rows) in meta.map(|m| m.meta).unwrap_or_default() {
                self.meta.insert(kind, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: ResourceKind, path: &str) -> MetaRow {
        MetaRow {
            source: "/src/App".to_string(),
            app: Some("my_app1".to_string()),
            kind,
            path: path.to_string(),
            example: None,
        }
    }

    fn populated(need_meta: bool) -> ResolutionContext {
        let mut context = ResolutionContext::new("/srv/project", AutoRegConfig::default(), need_meta);
        context.set_resolved(
            ResourceKind::RouteWebFile,
            Resolution {
                registration: Registration::List(vec!["src/App/MyApp1/Routes/web.php".into()]),
                meta: vec![row(ResourceKind::RouteWebFile, "/src/App/MyApp1/Routes/web.php")],
            },
        );
        context
    }

    #[test]
    fn test_new_context_has_empty_payload_per_kind() {
        let context = ResolutionContext::new("/p", AutoRegConfig::default(), false);
        assert_eq!(context.all_registrations().len(), 12);
        assert_eq!(context.all_meta().len(), 12);
        assert_eq!(
            context.registration(ResourceKind::ViewComponentClass),
            &Registration::Paired(IndexMap::new())
        );
        assert_eq!(
            context.registration(ResourceKind::ConfigFile),
            &Registration::Named(IndexMap::new())
        );
        assert_eq!(
            context.registration(ResourceKind::MigrationDirectory),
            &Registration::List(Vec::new())
        );
        assert!(context.meta(ResourceKind::ViewDirectory).is_empty());
    }

    #[test]
    fn test_main_record_validity() {
        let context = populated(false);
        let record = context.main_record();
        assert!(context.is_main_record_valid(Some(&record)));
        assert!(!context.is_main_record_valid(None));

        let mut other_version = record.clone();
        other_version.cache_data_version = CACHE_DATA_VERSION + 1;
        assert!(!context.is_main_record_valid(Some(&other_version)));

        let mut other_root = record;
        other_root.project_root = "/srv/elsewhere".to_string();
        assert!(!context.is_main_record_valid(Some(&other_root)));
    }

    #[test]
    fn test_meta_record_only_checked_when_needed() {
        let without = populated(false);
        assert!(without.is_meta_record_valid(None));

        let with = populated(true);
        assert!(!with.is_meta_record_valid(None));
        let mut record = with.meta_record();
        assert!(with.is_meta_record_valid(Some(&record)));
        record.cache_data_version = 0;
        assert!(!with.is_meta_record_valid(Some(&record)));
    }

    #[test]
    fn test_hydrate_restores_records() {
        let source = populated(true);
        let mut target = ResolutionContext::new("/srv/project", AutoRegConfig::default(), true);
        target.hydrate(source.main_record(), Some(source.meta_record()));
        assert_eq!(target.all_registrations(), source.all_registrations());
        assert_eq!(target.all_meta(), source.all_meta());
    }

    #[test]
    fn test_hydrate_without_meta_gives_empty_rows() {
        let source = populated(true);
        let mut target = ResolutionContext::new("/srv/project", AutoRegConfig::default(), false);
        target.hydrate(source.main_record(), Some(source.meta_record()));
        assert_eq!(target.all_meta().len(), 12);
        assert!(target.all_meta().values().all(Vec::is_empty));
        assert_eq!(
            target.registration(ResourceKind::RouteWebFile).len(),
            1
        );
    }

    #[test]
    fn test_hydrate_restores_config() {
        let mut config = AutoRegConfig::default();
        config.enabled.broadcast = true;
        let source = ResolutionContext::new("/p", config.clone(), false);
        let mut target = ResolutionContext::new("/p", AutoRegConfig::default(), false);
        target.hydrate(source.main_record(), None);
        assert_eq!(target.config(), &config);
    }

    #[test]
    fn test_records_survive_yaml() {
        let context = populated(true);
        let main = context.main_record();
        let yaml = serde_yaml::to_string(&main).expect("serialize");
        assert!(yaml.contains("shape: list"));
        let parsed: MainCacheRecord = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed, main);

        let meta = context.meta_record();
        let yaml = serde_yaml::to_string(&meta).expect("serialize");
        assert!(yaml.contains("type: route-web"));
        let parsed: MetaCacheRecord = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(parsed, meta);
    }
}
