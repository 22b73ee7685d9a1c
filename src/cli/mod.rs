//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - list: List command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod cache;
pub mod completions;
pub mod list;

pub use cache::{CacheArgs, CacheSubcommand};
pub use completions::CompletionsArgs;
pub use list::{GroupByArg, ListArgs};

/// autoreg - module auto-registration resolver
///
/// Finds the routes, commands, configs, views and other resources of modular
/// Laravel applications and caches what should be registered.
#[derive(Parser, Debug)]
#[command(
    name = "autoreg",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Resolve the resources of modular Laravel applications",
    long_about = "autoreg scans your application source for routes, commands, configs, \
                  migrations, translations, views, view components, Livewire components and \
                  service providers, and works out how each should be registered.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  autoreg list                          \x1b[90m# List everything that gets registered\x1b[0m\n   \
                  autoreg list --type command           \x1b[90m# Only console commands\x1b[0m\n   \
                  autoreg list --app my_app1 --json     \x1b[90m# One app, as JSON\x1b[0m\n   \
                  autoreg cache                         \x1b[90m# Resolve and write the cache\x1b[0m\n   \
                  autoreg cache clear                   \x1b[90m# Remove the cache\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project root (defaults to current directory)
    #[arg(long, short = 'w', global = true, env = "AUTOREG_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Configuration file (defaults to autoreg.yaml in the project root)
    #[arg(long, short = 'c', global = true, env = "AUTOREG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source directory to scan; overrides source_dir from the configuration
    #[arg(long = "source-dir", global = true, value_name = "DIR")]
    pub source_dirs: Vec<String>,

    /// Directory holding the cache files
    #[arg(long = "cache-dir", global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the resources that get registered
    List(ListArgs),

    /// Write or clear the result cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
