//! autoreg - module auto-registration resolver
//!
//! Scans the source trees of a modular Laravel application and works out
//! which routes, commands, configs, migrations, translations, views, view
//! components, Livewire components and service providers each app should
//! register. Results are cached in two YAML files so later runs can skip
//! the scan.
//!
//! The pieces, bottom-up:
//! - [`pattern`]: glob patterns compiled to anchored regexes
//! - [`php`] and [`scanner`]: namespace and class detection in PHP files
//! - [`source`]: source trees with ignore filtering
//! - [`resolver`]: one resolver per resource kind
//! - [`context`]: the per-project resolution context and cache records
//! - [`cache`]: the two-file result cache
//! - [`detect`]: the orchestrator tying them together

pub mod cache;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod context;
pub mod detect;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod path_utils;
pub mod pattern;
pub mod php;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod ui;

pub use detect::Detector;
pub use error::{AutoRegError, Result};
