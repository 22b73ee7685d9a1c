//! The twelve kinds of resource that can be registered

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base class of console commands
pub const CONSOLE_COMMAND: &str = "\\Illuminate\\Console\\Command";
/// Base class of Livewire components
pub const LIVEWIRE_COMPONENT: &str = "\\Livewire\\Component";
/// Base class of service providers
pub const SERVICE_PROVIDER: &str = "\\Illuminate\\Support\\ServiceProvider";
/// Base class of Blade view components
pub const VIEW_COMPONENT: &str = "\\Illuminate\\View\\Component";

/// A category of resource, each resolved by its own pipeline variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "broadcast")]
    BroadcastClosure,
    #[serde(rename = "command")]
    CommandClass,
    #[serde(rename = "command-closure")]
    CommandClosure,
    #[serde(rename = "config")]
    ConfigFile,
    #[serde(rename = "livewire")]
    LivewireComponent,
    #[serde(rename = "migration")]
    MigrationDirectory,
    #[serde(rename = "route-api")]
    RouteApiFile,
    #[serde(rename = "route-web")]
    RouteWebFile,
    #[serde(rename = "service-provider")]
    ServiceProviderClass,
    #[serde(rename = "translation")]
    TranslationDirectory,
    #[serde(rename = "view-component")]
    ViewComponentClass,
    #[serde(rename = "view")]
    ViewDirectory,
}

impl ResourceKind {
    /// Every kind, in resolution order
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::BroadcastClosure,
        ResourceKind::CommandClass,
        ResourceKind::CommandClosure,
        ResourceKind::ConfigFile,
        ResourceKind::LivewireComponent,
        ResourceKind::MigrationDirectory,
        ResourceKind::RouteApiFile,
        ResourceKind::RouteWebFile,
        ResourceKind::ServiceProviderClass,
        ResourceKind::TranslationDirectory,
        ResourceKind::ViewComponentClass,
        ResourceKind::ViewDirectory,
    ];

    /// Identifier used in cache files, meta rows and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::BroadcastClosure => "broadcast",
            ResourceKind::CommandClass => "command",
            ResourceKind::CommandClosure => "command-closure",
            ResourceKind::ConfigFile => "config",
            ResourceKind::LivewireComponent => "livewire",
            ResourceKind::MigrationDirectory => "migration",
            ResourceKind::RouteApiFile => "route-api",
            ResourceKind::RouteWebFile => "route-web",
            ResourceKind::ServiceProviderClass => "service-provider",
            ResourceKind::TranslationDirectory => "translation",
            ResourceKind::ViewComponentClass => "view-component",
            ResourceKind::ViewDirectory => "view",
        }
    }

    /// Key under `enabled` and `patterns` in the configuration file
    pub fn config_key(self) -> &'static str {
        match self {
            ResourceKind::BroadcastClosure => "broadcast",
            ResourceKind::CommandClass => "command_classes",
            ResourceKind::CommandClosure => "command_closures",
            ResourceKind::ConfigFile => "configs",
            ResourceKind::LivewireComponent => "livewire",
            ResourceKind::MigrationDirectory => "migrations",
            ResourceKind::RouteApiFile => "routes_api",
            ResourceKind::RouteWebFile => "routes_web",
            ResourceKind::ServiceProviderClass => "service_providers",
            ResourceKind::TranslationDirectory => "translations",
            ResourceKind::ViewComponentClass => "view_components",
            ResourceKind::ViewDirectory => "view_templates",
        }
    }

    /// Types a matched file must declare; `None` means "no class", empty means anything.
    pub fn required_types(self) -> Vec<Option<String>> {
        let base = match self {
            ResourceKind::CommandClass => CONSOLE_COMMAND,
            ResourceKind::LivewireComponent => LIVEWIRE_COMPONENT,
            ResourceKind::ServiceProviderClass => SERVICE_PROVIDER,
            ResourceKind::ViewComponentClass => VIEW_COMPONENT,
            ResourceKind::MigrationDirectory => return Vec::new(),
            _ => return vec![None],
        };
        vec![Some(base.to_string())]
    }

    /// Whether matches without an app are registered
    pub fn allows_missing_app(self) -> bool {
        !matches!(
            self,
            ResourceKind::LivewireComponent
                | ResourceKind::TranslationDirectory
                | ResourceKind::ViewComponentClass
                | ResourceKind::ViewDirectory
        )
    }

    /// Whether every match collapses to the directory before the pattern's wildcard
    pub fn is_directory_unit(self) -> bool {
        matches!(
            self,
            ResourceKind::MigrationDirectory
                | ResourceKind::TranslationDirectory
                | ResourceKind::ViewComponentClass
                | ResourceKind::ViewDirectory
        )
    }

    /// Whether only the first match per app is kept
    pub fn is_one_per_app(self) -> bool {
        matches!(
            self,
            ResourceKind::TranslationDirectory | ResourceKind::ViewDirectory
        )
    }

    /// Whether registration data is a name-keyed map rather than a list
    pub fn is_keyed(self) -> bool {
        matches!(
            self,
            ResourceKind::ConfigFile
                | ResourceKind::LivewireComponent
                | ResourceKind::TranslationDirectory
                | ResourceKind::ViewComponentClass
                | ResourceKind::ViewDirectory
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.config_key() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown resource type '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(kind));
            assert_eq!(kind.config_key().parse::<ResourceKind>(), Ok(kind));
            let yaml = serde_yaml::to_string(&kind).expect("serialize");
            assert_eq!(yaml.trim(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_identifier() {
        let err = "widgets".parse::<ResourceKind>().expect_err("unknown");
        assert!(err.contains("widgets"));
        assert!(err.contains("view-component"));
    }

    #[test]
    fn test_required_types() {
        assert_eq!(ResourceKind::RouteWebFile.required_types(), vec![None]);
        assert!(ResourceKind::MigrationDirectory.required_types().is_empty());
        assert_eq!(
            ResourceKind::CommandClass.required_types(),
            vec![Some(CONSOLE_COMMAND.to_string())]
        );
    }

    #[test]
    fn test_app_requirements() {
        let requiring: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| !k.allows_missing_app())
            .collect();
        assert_eq!(
            requiring,
            vec![
                ResourceKind::LivewireComponent,
                ResourceKind::TranslationDirectory,
                ResourceKind::ViewComponentClass,
                ResourceKind::ViewDirectory,
            ]
        );
    }
}
