//! Configuration file handling (`autoreg.yaml`)
//!
//! Every key is optional and falls back to the defaults of a stock install:
//!
//! ```yaml
//! source_dir: src/App
//! enabled:
//!   broadcast: true
//! patterns:
//!   command_classes:
//!     - Commands/**/*.php
//!     - Console/**/*.php
//! settings:
//!   configs:
//!     use_app_name: false
//! ignore:
//!   - /src/App/Legacy
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::string_utils::CaseType;
use crate::error::{self, Result};
use crate::resolver::ResourceKind;

/// Configuration file looked for in the project root
pub const CONFIG_FILE: &str = "autoreg.yaml";

/// The full configuration surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRegConfig {
    /// Root directories to scan
    #[serde(deserialize_with = "nullable_source_dirs")]
    pub source_dir: SourceDirs,
    pub enabled: EnabledKinds,
    pub patterns: KindPatterns,
    pub settings: Settings,
    /// Project-relative files and directories, or class and namespace names
    pub ignore: Vec<String>,
}

impl AutoRegConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        if !path.is_file() {
            return Err(error::config_not_found(shown));
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| error::config_read_failed(&shown, e.to_string()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| error::config_parse_failed(&shown, e.to_string()))?;
        config.validate()?;
        tracing::debug!(path = %shown, "loaded configuration");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (alias, dir) in self.source_dir.entries() {
            if dir.trim().is_empty() {
                return Err(error::config_invalid(match alias {
                    Some(alias) => format!("source_dir '{alias}' is empty"),
                    None => "source_dir contains an empty path".to_string(),
                }));
            }
        }
        for kind in ResourceKind::ALL {
            if self.patterns_for(kind).iter().any(|p| p.trim().is_empty()) {
                return Err(error::config_invalid(format!(
                    "patterns.{} contains an empty pattern",
                    kind.config_key()
                )));
            }
        }
        Ok(())
    }

    /// Replace the configured source directories
    pub fn set_source_dirs(&mut self, dirs: Vec<String>) {
        self.source_dir = SourceDirs::Many(dirs);
    }

    pub fn is_enabled(&self, kind: ResourceKind) -> bool {
        let e = &self.enabled;
        match kind {
            ResourceKind::BroadcastClosure => e.broadcast,
            ResourceKind::CommandClass => e.command_classes,
            ResourceKind::CommandClosure => e.command_closures,
            ResourceKind::ConfigFile => e.configs,
            ResourceKind::LivewireComponent => e.livewire,
            ResourceKind::MigrationDirectory => e.migrations,
            ResourceKind::RouteApiFile => e.routes_api,
            ResourceKind::RouteWebFile => e.routes_web,
            ResourceKind::ServiceProviderClass => e.service_providers,
            ResourceKind::TranslationDirectory => e.translations,
            ResourceKind::ViewComponentClass => e.view_components,
            ResourceKind::ViewDirectory => e.view_templates,
        }
    }

    /// The glob patterns configured for a kind, in declaration order
    pub fn patterns_for(&self, kind: ResourceKind) -> Vec<String> {
        let p = &self.patterns;
        let list = match kind {
            ResourceKind::BroadcastClosure => &p.broadcast,
            ResourceKind::CommandClass => &p.command_classes,
            ResourceKind::CommandClosure => &p.command_closures,
            ResourceKind::ConfigFile => &p.configs,
            ResourceKind::LivewireComponent => &p.livewire,
            ResourceKind::MigrationDirectory => &p.migrations,
            ResourceKind::RouteApiFile => &p.routes_api,
            ResourceKind::RouteWebFile => &p.routes_web,
            ResourceKind::ServiceProviderClass => &p.service_providers,
            ResourceKind::TranslationDirectory => &p.translations,
            ResourceKind::ViewComponentClass => &p.view_components,
            ResourceKind::ViewDirectory => &p.view_templates,
        };
        list.to_vec()
    }

    pub fn api_middleware(&self) -> Vec<String> {
        self.settings
            .routes
            .api
            .middleware
            .clone()
            .unwrap_or_else(|| vec!["api".to_string()])
    }

    pub fn web_middleware(&self) -> Vec<String> {
        self.settings
            .routes
            .web
            .middleware
            .clone()
            .unwrap_or_else(|| vec!["web".to_string()])
    }
}

/// `source_dir`: one path, a list of paths, or a map of alias to path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceDirs {
    One(String),
    Many(Vec<String>),
    Aliased(IndexMap<String, String>),
}

impl Default for SourceDirs {
    fn default() -> Self {
        SourceDirs::Many(Vec::new())
    }
}

impl SourceDirs {
    /// `(alias, path)` pairs in declaration order, duplicate paths removed
    pub fn entries(&self) -> Vec<(Option<String>, String)> {
        let all: Vec<(Option<String>, String)> = match self {
            SourceDirs::One(dir) => vec![(None, dir.clone())],
            SourceDirs::Many(dirs) => dirs.iter().map(|d| (None, d.clone())).collect(),
            SourceDirs::Aliased(map) => map
                .iter()
                .map(|(alias, dir)| (Some(alias.clone()), dir.clone()))
                .collect(),
        };
        let mut entries: Vec<(Option<String>, String)> = Vec::with_capacity(all.len());
        for (alias, dir) in all {
            if !entries.iter().any(|(_, seen)| *seen == dir) {
                entries.push((alias, dir));
            }
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SourceDirs::One(_) => false,
            SourceDirs::Many(dirs) => dirs.is_empty(),
            SourceDirs::Aliased(map) => map.is_empty(),
        }
    }
}

fn nullable_source_dirs<'de, D>(deserializer: D) -> std::result::Result<SourceDirs, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<SourceDirs>::deserialize(deserializer)?.unwrap_or_default())
}

/// `enabled`: which kinds are resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledKinds {
    pub broadcast: bool,
    pub command_classes: bool,
    pub command_closures: bool,
    pub configs: bool,
    pub livewire: bool,
    pub migrations: bool,
    pub routes_api: bool,
    pub routes_web: bool,
    pub service_providers: bool,
    pub translations: bool,
    pub view_components: bool,
    pub view_templates: bool,
}

impl Default for EnabledKinds {
    fn default() -> Self {
        Self {
            broadcast: false,
            command_classes: true,
            command_closures: true,
            configs: true,
            livewire: true,
            migrations: true,
            routes_api: true,
            routes_web: true,
            service_providers: true,
            translations: true,
            view_components: true,
            view_templates: true,
        }
    }
}

/// One glob pattern or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            PatternList::One(pattern) => vec![pattern.clone()],
            PatternList::Many(patterns) => patterns.clone(),
        }
    }
}

impl From<&str> for PatternList {
    fn from(pattern: &str) -> Self {
        PatternList::One(pattern.to_string())
    }
}

/// `patterns`: the globs each kind searches with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindPatterns {
    pub broadcast: PatternList,
    pub command_classes: PatternList,
    pub command_closures: PatternList,
    pub configs: PatternList,
    pub livewire: PatternList,
    pub migrations: PatternList,
    pub routes_api: PatternList,
    pub routes_web: PatternList,
    pub service_providers: PatternList,
    pub translations: PatternList,
    pub view_components: PatternList,
    pub view_templates: PatternList,
}

impl Default for KindPatterns {
    fn default() -> Self {
        Self {
            broadcast: "Routes/channels.php".into(),
            command_classes: "Commands/**/*.php".into(),
            command_closures: "Routes/console.php".into(),
            configs: "Configs/**/*.php".into(),
            livewire: "Resources/Livewire/**/*.php".into(),
            migrations: "Database/Migrations/*.php".into(),
            routes_api: "Routes/api.php".into(),
            routes_web: "Routes/web.php".into(),
            service_providers: "Providers/**/*.php".into(),
            translations: "Resources/Lang/**/*.php".into(),
            view_components: "Resources/ViewComponents/**/*.php".into(),
            view_templates: "Resources/Views/**/*.php".into(),
        }
    }
}

/// `settings`: per-kind options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub broadcast: BroadcastSettings,
    pub configs: ConfigFileSettings,
    pub routes: RouteSettings,
    pub translations: CaseSettings,
    pub views: ViewSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastSettings {
    /// Register the broadcast auth routes along with the channel files
    pub run_auth: bool,
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self { run_auth: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFileSettings {
    /// Prefix config keys with the app, e.g. `my_app1::mail`
    pub use_app_name: bool,
    pub path_case: CaseType,
}

impl Default for ConfigFileSettings {
    fn default() -> Self {
        Self {
            use_app_name: true,
            path_case: CaseType::Snake,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    pub api: RouteGroupSettings,
    pub web: RouteGroupSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteGroupSettings {
    /// Middleware applied to the route files; each group has its own default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middleware: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseSettings {
    pub path_case: CaseType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub templates: CaseSettings,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            templates: CaseSettings {
                path_case: CaseType::Kebab,
            },
        }
    }
}
