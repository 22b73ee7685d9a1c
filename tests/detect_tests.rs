//! Detection tests against whole projects
//!
//! Drive the library the way a host application would: load the
//! configuration, open a detector and read the registrations back.

mod common;

use autoreg::Detector;
use autoreg::cache::ResultCache;
use autoreg::config::AutoRegConfig;
use autoreg::context::{ComponentNamespace, Registration};
use autoreg::error::AutoRegError;
use autoreg::resolver::ResourceKind;

fn open(workspace: &common::TestWorkspace, yaml: &str) -> Detector {
    let config = AutoRegConfig::from_yaml(yaml).unwrap();
    Detector::open(
        &workspace.path,
        config,
        ResultCache::in_dir(workspace.cache_dir()),
        true,
    )
    .unwrap()
}

fn list(detector: &Detector, kind: ResourceKind) -> Vec<String> {
    let mut items = detector
        .registration(kind)
        .as_list()
        .expect("list registration")
        .to_vec();
    items.sort();
    items
}

#[test]
fn test_two_apps_every_kind() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(&workspace, "source_dir: src/App\n");

    assert_eq!(
        list(&detector, ResourceKind::CommandClass),
        vec![
            "\\App\\MyApp1\\Commands\\TestCommand1".to_string(),
            "\\App\\MyApp2\\Commands\\TestCommand2".to_string(),
        ]
    );
    assert_eq!(
        list(&detector, ResourceKind::RouteWebFile),
        vec![
            "src/App/MyApp1/Routes/web.php".to_string(),
            "src/App/MyApp2/Routes/web.php".to_string(),
        ]
    );
    assert_eq!(
        list(&detector, ResourceKind::RouteApiFile),
        vec!["src/App/MyApp1/Routes/api.php".to_string()]
    );
    assert_eq!(
        list(&detector, ResourceKind::CommandClosure),
        vec!["src/App/MyApp1/Routes/console.php".to_string()]
    );
    assert_eq!(
        list(&detector, ResourceKind::ServiceProviderClass),
        vec!["\\App\\MyApp1\\Providers\\MyApp1ServiceProvider".to_string()]
    );
    assert_eq!(
        list(&detector, ResourceKind::MigrationDirectory),
        vec!["src/App/MyApp1/Database/Migrations".to_string()]
    );

    let configs = detector
        .registration(ResourceKind::ConfigFile)
        .as_named()
        .unwrap();
    assert_eq!(
        configs.get("my_app1::test_config1").map(String::as_str),
        Some("src/App/MyApp1/Configs/test_config1.php")
    );

    let translations = detector
        .registration(ResourceKind::TranslationDirectory)
        .as_named()
        .unwrap();
    assert_eq!(
        translations.get("my_app1").map(String::as_str),
        Some("src/App/MyApp1/Resources/Lang")
    );

    let views = detector
        .registration(ResourceKind::ViewDirectory)
        .as_named()
        .unwrap();
    assert_eq!(
        views.get("my-app1").map(String::as_str),
        Some("src/App/MyApp1/Resources/Views")
    );

    // Broadcast is off unless enabled
    assert!(detector.registration(ResourceKind::BroadcastClosure).is_empty());
    assert!(detector.resources_were_detected());
}

#[test]
fn test_command_meta_row() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(&workspace, "source_dir: src/App\n");

    let rows = &detector.all_meta()[&ResourceKind::CommandClass];
    let row = rows
        .iter()
        .find(|row| row.app.as_deref() == Some("my_app1"))
        .unwrap();
    assert_eq!(row.source, "/src/App");
    assert_eq!(row.path, "/src/App/MyApp1/Commands/TestCommand1.php");
    assert_eq!(row.example.as_deref(), Some("php artisan test:test-command1"));
}

#[test]
fn test_detected_apps() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(&workspace, "source_dir: src/App\n");

    let apps = detector.detected_apps();
    assert!(apps.contains(&Some("my_app1".to_string())));
    assert!(apps.contains(&Some("my_app2".to_string())));
}

#[test]
fn test_ignore_directory_and_namespace() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(
        &workspace,
        "source_dir: src/App\nignore:\n  - src/App/MyApp2\n  - '\\App\\MyApp1\\Providers'\n",
    );

    assert_eq!(
        list(&detector, ResourceKind::RouteWebFile),
        vec!["src/App/MyApp1/Routes/web.php".to_string()]
    );
    assert_eq!(
        list(&detector, ResourceKind::CommandClass),
        vec!["\\App\\MyApp1\\Commands\\TestCommand1".to_string()]
    );
    assert!(detector.registration(ResourceKind::ServiceProviderClass).is_empty());
}

#[test]
fn test_ignore_single_file() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(
        &workspace,
        "source_dir: src/App\nignore:\n  - /src/App/MyApp1/Routes/web.php\n",
    );
    assert_eq!(
        list(&detector, ResourceKind::RouteWebFile),
        vec!["src/App/MyApp2/Routes/web.php".to_string()]
    );
}

#[test]
fn test_disabled_kinds() {
    let workspace = common::TestWorkspace::with_two_apps();
    let detector = open(
        &workspace,
        "source_dir: src/App\nenabled:\n  command_classes: false\n  routes_web: false\n  broadcast: true\n",
    );

    assert!(!detector.is_kind_enabled(ResourceKind::CommandClass));
    assert!(detector.registration(ResourceKind::CommandClass).is_empty());
    assert!(detector.registration(ResourceKind::RouteWebFile).is_empty());
    assert_eq!(
        list(&detector, ResourceKind::BroadcastClosure),
        vec!["src/App/MyApp1/Routes/channels.php".to_string()]
    );
    assert!(detector.should_register_broadcast_routes());
}

#[test]
fn test_nested_pattern_keeps_shortest_app() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file(
        "src/App/MyApp1/SomeOtherThings/Commands/Run.php",
        &common::command_class("App\\MyApp1\\SomeOtherThings\\Commands", "Run", "run"),
    );
    let detector = open(
        &workspace,
        "source_dir: src/App\npatterns:\n  command_classes:\n    - SomeOtherThings/Commands/**/*.php\n    - Commands/**/*.php\n",
    );

    let rows = &detector.all_meta()[&ResourceKind::CommandClass];
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].app.as_deref(), Some("my_app1"));
}

#[test]
fn test_views_one_directory_per_app() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("src/App/MyApp1/Resources/Views/home.blade.php", "<div></div>");
    workspace.write_file("src/App/MyApp1/Resources/Templates/page.blade.php", "<p></p>");
    let detector = open(
        &workspace,
        "source_dir: src/App\npatterns:\n  view_templates:\n    - Resources/Views/**/*.php\n    - Resources/Templates/**/*.php\n",
    );

    let views = detector
        .registration(ResourceKind::ViewDirectory)
        .as_named()
        .unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(
        views.get("my-app1").map(String::as_str),
        Some("src/App/MyApp1/Resources/Views")
    );
}

#[test]
fn test_aliased_source_dirs() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("modules/Billing/Routes/web.php", "<?php\n");
    workspace.write_file(
        "modules/Billing/Resources/ViewComponents/Invoice.php",
        "<?php\nnamespace Modules\\Billing\\Resources\\ViewComponents;\n\nuse Illuminate\\View\\Component;\n\nclass Invoice extends Component {}\n",
    );
    let detector = open(&workspace, "source_dir:\n  modules: modules\n");

    let rows = &detector.all_meta()[&ResourceKind::RouteWebFile];
    assert_eq!(rows[0].source, "modules");
    assert_eq!(rows[0].app.as_deref(), Some("billing"));

    let components = detector
        .registration(ResourceKind::ViewComponentClass)
        .as_paired()
        .unwrap();
    assert_eq!(
        components.get("billing"),
        Some(&ComponentNamespace {
            prefix: "billing".to_string(),
            namespace: "\\Modules\\Billing\\Resources\\ViewComponents".to_string(),
        })
    );
}

#[test]
fn test_empty_project_detects_nothing() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("src/App/.gitkeep", "");
    let detector = open(&workspace, "source_dir: src/App\n");

    assert!(!detector.resources_were_detected());
    for kind in ResourceKind::ALL {
        assert!(detector.registration(kind).is_empty());
    }
    assert_eq!(
        detector.registration(ResourceKind::ConfigFile),
        &Registration::empty_for(ResourceKind::ConfigFile)
    );
}

#[test]
fn test_missing_source_dir() {
    let workspace = common::TestWorkspace::new();
    let config = AutoRegConfig::from_yaml("source_dir: src/Missing\n").unwrap();
    let result = Detector::open(
        &workspace.path,
        config,
        ResultCache::in_dir(workspace.cache_dir()),
        false,
    );
    assert!(matches!(result, Err(AutoRegError::SourceDirNotFound { .. })));
}

#[test]
fn test_invalid_pattern_is_reported() {
    let workspace = common::TestWorkspace::with_two_apps();
    let config =
        AutoRegConfig::from_yaml("source_dir: src/App\npatterns:\n  routes_web: 'Routes/web'\n")
            .unwrap();
    let result = Detector::open(
        &workspace.path,
        config,
        ResultCache::in_dir(workspace.cache_dir()),
        false,
    );
    assert!(matches!(result, Err(AutoRegError::InvalidPattern { .. })));
}
