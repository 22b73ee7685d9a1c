//! Error types and handling for autoreg
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`pattern`]: Glob pattern compilation errors
//! - [`fs`]: Source directory and file system errors
//! - [`config`]: Configuration file errors
//! - [`cache`]: Result cache errors

pub mod cache;
pub mod config;
pub mod fs;
pub mod pattern;

pub use cache::{unreadable as cache_unreadable, write_failed as cache_write_failed};
pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{io_error, source_dir_not_found, source_dir_unreadable};
pub use pattern::invalid as invalid_pattern;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for autoreg operations
#[derive(Error, Diagnostic, Debug)]
pub enum AutoRegError {
    // Pattern errors
    #[error("Invalid path pattern: '{pattern}'")]
    #[diagnostic(
        code(autoreg::pattern::invalid),
        help("Patterns look like 'Resources/Views/**/*.php': an optional directory, a file name and an extension")
    )]
    InvalidPattern { pattern: String },

    // Source directory errors
    #[error("Source directory not found: {path}")]
    #[diagnostic(
        code(autoreg::fs::source_dir_not_found),
        help("Check the 'source_dir' setting in autoreg.yaml")
    )]
    SourceDirNotFound { path: String },

    #[error("Could not read source directory '{path}': {reason}")]
    #[diagnostic(code(autoreg::fs::source_dir_unreadable))]
    SourceDirUnreadable { path: String, reason: String },

    // Config errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(autoreg::config::not_found),
        help("Create an autoreg.yaml in the project root or pass --source-dir")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file '{path}': {reason}")]
    #[diagnostic(code(autoreg::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(autoreg::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file '{path}': {reason}")]
    #[diagnostic(code(autoreg::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Cache errors
    #[error("Cache file '{path}' is unreadable: {reason}")]
    #[diagnostic(
        code(autoreg::cache::unreadable),
        help("Run 'autoreg cache clear' to remove the stale cache")
    )]
    CacheUnreadable { path: String, reason: String },

    #[error("Failed to write cache file '{path}': {reason}")]
    #[diagnostic(code(autoreg::cache::write_failed))]
    CacheWriteFailed { path: String, reason: String },

    // General IO
    #[error("IO error: {message}")]
    #[diagnostic(code(autoreg::io::error))]
    IoError { message: String },
}

impl From<std::io::Error> for AutoRegError {
    fn from(err: std::io::Error) -> Self {
        AutoRegError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AutoRegError {
    fn from(err: serde_yaml::Error) -> Self {
        AutoRegError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AutoRegError {
    fn from(err: serde_json::Error) -> Self {
        AutoRegError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AutoRegError>;
