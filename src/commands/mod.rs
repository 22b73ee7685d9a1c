//! Command implementations for the autoreg CLI

pub mod cache;
pub mod completions;
pub mod helpers;
pub mod list;
