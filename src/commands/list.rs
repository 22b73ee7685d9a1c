//! List command implementation
//!
//! Shows every resolved resource with its app, type, path and a usage
//! example, read from the cache when there is a valid one.

use crate::cli::{GroupByArg, ListArgs};
use crate::error::Result;
use crate::ui::{self, GroupBy, TableOptions, table};

use super::helpers::ProjectOptions;

/// Run list command
pub fn run(project: &ProjectOptions, args: ListArgs) -> Result<()> {
    let mut detector = project.detector(true)?;
    detector.initialise()?;

    let options = table_options(args.clone_filters(), args.group_by, !args.no_example);

    if args.json {
        let rows = table::select_rows(detector.all_meta(), &options);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let tables = table::generate_tables(detector.all_meta(), &options);
    if tables.is_empty() {
        ui::print_warning("No resources were detected.");
        return Ok(());
    }

    println!();
    ui::print_warning(&ui::cache_status_line(detector.was_loaded_from_cache()));
    ui::print_tables(&tables);
    Ok(())
}

impl ListArgs {
    fn clone_filters(&self) -> TableOptions {
        TableOptions {
            sources: self.sources.clone(),
            apps: self.apps.clone(),
            types: self.types.clone(),
            ..TableOptions::default()
        }
    }
}

fn table_options(filters: TableOptions, group_by: GroupByArg, show_examples: bool) -> TableOptions {
    let group_by = resolve_group_by(group_by, &filters);
    TableOptions {
        group_by,
        show_examples,
        ..filters
    }
}

/// `default` groups by nothing when types are filtered, by source when
/// nothing is filtered, and by app when only apps are
fn resolve_group_by(group_by: GroupByArg, filters: &TableOptions) -> GroupBy {
    match group_by {
        GroupByArg::Source => GroupBy::Source,
        GroupByArg::App => GroupBy::App,
        GroupByArg::Type => GroupBy::Type,
        GroupByArg::None => GroupBy::None,
        GroupByArg::Default if !filters.types.is_empty() => GroupBy::None,
        GroupByArg::Default if !filters.apps.is_empty() => GroupBy::App,
        GroupByArg::Default => GroupBy::Source,
    }
}
