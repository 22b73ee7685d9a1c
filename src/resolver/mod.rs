//! Resource resolution
//!
//! One [`ResourceResolver`] per [`ResourceKind`]. A resolution pass runs in
//! fixed stages:
//!
//! 1. Disabled kinds produce an empty payload and nothing else happens
//! 2. Every pattern is run against every source tree; files must be relevant
//!    to the pattern and declare an acceptable type
//! 3. Matches condense into units (one file, or a whole directory for
//!    directory kinds) and are attributed to an app
//! 4. When several patterns claim the same unit, the shortest app wins
//! 5. Kinds that register one directory per app keep the first unit per app
//! 6. Each surviving unit is emitted as registration data and, on request,
//!    as a meta row with a usage example
//!
//! ## Module Organization
//!
//! - `kind.rs`: the twelve kinds and their behavioural differences
//! - `examples.rs`: usage examples for meta rows

pub mod examples;
pub mod kind;

pub use kind::ResourceKind;

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::common::string_utils::{CaseType, change_case};
use crate::context::{ComponentNamespace, MetaRow, Registration, Resolution};
use crate::error::Result;
use crate::hierarchy::TypeHierarchy;
use crate::pattern::GlobPattern;
use crate::source::{DiscoveredFile, SourceTree};

/// Per-kind options, fixed when the resolver is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub enabled: bool,
    /// Casing of app-derived names (config keys, translation and view namespaces)
    pub path_case: CaseType,
    /// Prefix config keys with their app; only meaningful for config files
    pub use_app_name: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            path_case: CaseType::Snake,
            use_app_name: true,
        }
    }
}

/// One registration unit: a file, or a directory of files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedResource {
    /// Source alias or project-relative source root
    pub source_label: String,
    pub app: Option<String>,
    /// Directories between the pattern's wildcard and the file name
    pub after_wildcard_dir: Option<String>,
    pub base_name: Option<String>,
    /// Absolute path of the unit
    pub full_path: String,
    pub project_relative_path: String,
    pub declared_type_name: Option<String>,
    /// Every file condensed into this unit
    pub member_files: Vec<DiscoveredFile>,
}

/// Resolves one kind of resource
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    kind: ResourceKind,
    patterns: Vec<GlobPattern>,
    options: ResolverOptions,
}

impl ResourceResolver {
    /// Compile the kind's patterns.
    ///
    /// An invalid pattern is a configuration error.
    pub fn new(kind: ResourceKind, patterns: &[String], options: ResolverOptions) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let compiled =
                    GlobPattern::compile(pattern)?.with_required_types(kind.required_types());
                if kind.is_directory_unit() {
                    compiled.into_directory_unit()
                } else {
                    Ok(compiled)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            kind,
            patterns,
            options,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    fn allows_missing_app(&self) -> bool {
        match self.kind {
            ResourceKind::ConfigFile => !self.options.use_app_name,
            kind => kind.allows_missing_app(),
        }
    }

    /// Run a resolution pass over the given trees
    pub fn resolve(
        &self,
        trees: &[SourceTree],
        hierarchy: &dyn TypeHierarchy,
        need_meta: bool,
    ) -> Resolution {
        if !self.options.enabled {
            tracing::debug!(kind = %self.kind, "kind disabled, skipping");
            return Resolution::empty(self.kind);
        }

        let matched = self.match_patterns(trees, hierarchy);
        let matched = pick_best_app(matched);
        let matched = if self.kind.is_one_per_app() {
            one_per_app(matched)
        } else {
            matched
        };

        let mut registration = Registration::empty_for(self.kind);
        for resource in &matched {
            self.add_registration(&mut registration, resource);
        }
        let meta = if need_meta {
            matched.iter().map(|r| self.meta_row(r)).collect()
        } else {
            Vec::new()
        };

        tracing::debug!(kind = %self.kind, resolved = matched.len(), "resolved kind");
        Resolution { registration, meta }
    }

    fn match_patterns(
        &self,
        trees: &[SourceTree],
        hierarchy: &dyn TypeHierarchy,
    ) -> Vec<MatchedResource> {
        let mut matched = Vec::new();
        for pattern in &self.patterns {
            for tree in trees {
                let relevant: Vec<DiscoveredFile> = tree
                    .files()
                    .iter()
                    .filter(|file| {
                        pattern.is_relevant(&file.root_relative_path)
                            && pattern.accepts_type(file.declared_type_name.as_deref(), hierarchy)
                    })
                    .map(|file| DiscoveredFile {
                        wildcard_remainder: pattern.pick_stars_and_after(&file.root_relative_path),
                        ..file.clone()
                    })
                    .collect();

                let mut members: IndexMap<String, Vec<DiscoveredFile>> = IndexMap::new();
                for file in &relevant {
                    members
                        .entry(pattern.condense(&file.project_relative_path))
                        .or_default()
                        .push(file.clone());
                }

                let mut seen = HashSet::new();
                for file in &relevant {
                    let full_path = pattern.condense(&file.absolute_path);
                    if !seen.insert(full_path.clone()) {
                        continue;
                    }
                    let app_path = pattern.condense(&file.root_relative_path);
                    let app = pattern.pick_app(&app_path);
                    if app.is_none() && !self.allows_missing_app() {
                        continue;
                    }
                    let project_relative_path = pattern.condense(&file.project_relative_path);
                    matched.push(MatchedResource {
                        source_label: tree.label().to_string(),
                        app,
                        after_wildcard_dir: pattern.pick_after_star_dir(&app_path),
                        base_name: pattern.pick_name(&app_path),
                        full_path,
                        declared_type_name: pattern.condense_type_name(
                            &file.project_relative_path,
                            file.declared_type_name.as_deref(),
                        ),
                        member_files: members
                            .get(&project_relative_path)
                            .cloned()
                            .unwrap_or_default(),
                        project_relative_path,
                    });
                }
            }
        }
        matched
    }

    fn add_registration(&self, registration: &mut Registration, resource: &MatchedResource) {
        let path = resource.project_relative_path.trim_start_matches('/').to_string();
        let app = resource.app.clone().unwrap_or_default();
        match (self.kind, registration) {
            (
                ResourceKind::CommandClass | ResourceKind::ServiceProviderClass,
                Registration::List(list),
            ) => list.extend(resource.declared_type_name.clone()),
            (_, Registration::List(list)) => list.push(path),
            (ResourceKind::ConfigFile, Registration::Named(map)) => {
                map.insert(self.config_name(resource), path);
            }
            (ResourceKind::LivewireComponent, Registration::Named(map)) => {
                map.insert(
                    livewire_name(resource),
                    resource.declared_type_name.clone().unwrap_or_default(),
                );
            }
            (_, Registration::Named(map)) => {
                map.insert(change_case(&app, self.options.path_case), path);
            }
            (_, Registration::Paired(map)) => {
                map.insert(
                    app.clone(),
                    ComponentNamespace {
                        prefix: component_prefix(&app),
                        namespace: resource.declared_type_name.clone().unwrap_or_default(),
                    },
                );
            }
        }
    }

    fn meta_row(&self, resource: &MatchedResource) -> MetaRow {
        MetaRow {
            source: resource.source_label.clone(),
            app: resource.app.clone(),
            kind: self.kind,
            path: resource.project_relative_path.clone(),
            example: self.example(resource),
        }
    }

    fn example(&self, resource: &MatchedResource) -> Option<String> {
        let app = resource.app.as_deref().unwrap_or("");
        let first = resource.member_files.first();
        match self.kind {
            ResourceKind::CommandClass => examples::command(&resource.full_path),
            ResourceKind::ConfigFile => {
                examples::config(&first?.absolute_path, &self.config_name(resource))
            }
            ResourceKind::LivewireComponent => Some(examples::livewire(&livewire_name(resource))),
            ResourceKind::TranslationDirectory => {
                examples::translation(&change_case(app, self.options.path_case), first?)
            }
            ResourceKind::ViewComponentClass => Some(examples::view_components(
                &component_prefix(app),
                &resource.member_files,
            )),
            ResourceKind::ViewDirectory => Some(examples::views(
                &change_case(app, self.options.path_case),
                &resource.member_files,
            )),
            _ => None,
        }
    }

    fn config_name(&self, resource: &MatchedResource) -> String {
        let name = resource.base_name.as_deref().unwrap_or("");
        if self.options.use_app_name {
            let app = resource.app.as_deref().unwrap_or("");
            format!("{}::{name}", change_case(app, self.options.path_case))
        } else {
            name.to_string()
        }
    }
}

/// `my-app1::sub-dir1.counter` for `SubDir1/Counter.php` in app `my_app1`
fn livewire_name(resource: &MatchedResource) -> String {
    let app = resource.app.as_deref().unwrap_or("");
    let name = resource.base_name.as_deref().unwrap_or("");
    let sub_dirs = resource
        .after_wildcard_dir
        .as_deref()
        .unwrap_or("")
        .replace('/', ".");
    let name = if sub_dirs.is_empty() {
        format!("{app}::{name}")
    } else {
        format!("{app}::{}.{name}", change_case(&sub_dirs, CaseType::Kebab))
    };
    change_case(&name, CaseType::Kebab)
}

fn component_prefix(app: &str) -> String {
    change_case(&app.replace('_', "-"), CaseType::Kebab)
}

/// Keep, for each unit, only the matches attributed to its best app.
///
/// The best app is the shortest; ties go to the lexicographically first. A
/// missing app counts as empty. A unit claimed twice with the same app is
/// kept once.
fn pick_best_app(matched: Vec<MatchedResource>) -> Vec<MatchedResource> {
    let mut best: HashMap<String, Option<String>> = HashMap::new();
    for resource in &matched {
        best.entry(resource.full_path.clone())
            .and_modify(|current| {
                if app_rank(resource.app.as_deref()) < app_rank(current.as_deref()) {
                    current.clone_from(&resource.app);
                }
            })
            .or_insert_with(|| resource.app.clone());
    }

    let mut kept = HashSet::new();
    matched
        .into_iter()
        .filter(|resource| best.get(&resource.full_path) == Some(&resource.app))
        .filter(|resource| kept.insert(resource.full_path.clone()))
        .collect()
}

fn app_rank(app: Option<&str>) -> (usize, &str) {
    let app = app.unwrap_or("");
    (app.chars().count(), app)
}

/// Keep the first unit per app
fn one_per_app(matched: Vec<MatchedResource>) -> Vec<MatchedResource> {
    let mut seen = HashSet::new();
    matched
        .into_iter()
        .filter(|resource| seen.insert(resource.app.clone()))
        .collect()
}
