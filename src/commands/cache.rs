//! Cache command implementation
//!
//! `autoreg cache` drops any existing cache, resolves every kind with meta
//! and writes both cache files. `autoreg cache clear` only removes them.

use crate::cli::{CacheArgs, CacheSubcommand};
use crate::error::Result;
use crate::ui;

use super::helpers::ProjectOptions;

/// Run cache command
pub fn run(project: &ProjectOptions, args: CacheArgs) -> Result<()> {
    match args.command {
        Some(CacheSubcommand::Clear) => clear(project),
        None => build(project),
    }
}

fn build(project: &ProjectOptions) -> Result<()> {
    let mut detector = project.detector(true)?;
    detector.clear_cache()?;
    detector.resolve_fresh(true)?;

    if !detector.resources_were_detected() {
        ui::print_warning("No resources were detected.");
    }

    detector.save_cache()?;
    tracing::info!(
        main = %detector.main_cache_path().display(),
        meta = %detector.meta_cache_path().display(),
        "cache written"
    );
    ui::print_success(&format!(
        "autoreg cache written: {}",
        detector.main_cache_path().display()
    ));
    Ok(())
}

fn clear(project: &ProjectOptions) -> Result<()> {
    let project_root = project.project_root()?;
    let cache = project.cache(&project_root);
    let existed = cache.exists();
    cache.clear()?;

    if existed {
        ui::print_success("autoreg cache cleared.");
    } else {
        println!("autoreg cache is already empty.");
    }
    Ok(())
}
