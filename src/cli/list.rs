use clap::{Parser, ValueEnum};

use crate::resolver::ResourceKind;

/// How `list` splits its output into tables
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupByArg {
    /// `none` with a type filter, `app` with an app filter, otherwise `source`
    #[default]
    Default,
    Source,
    App,
    Type,
    None,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List everything:\n    autoreg list\n\n\
                  Only commands and views:\n    autoreg list --type command --type view\n\n\
                  One app, one table per type:\n    autoreg list --app my_app1 --group-by type\n\n\
                  Machine-readable output:\n    autoreg list --json")]
pub struct ListArgs {
    /// Only show resources from these sources
    #[arg(long = "source", value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Only show resources of these apps
    #[arg(long = "app", value_name = "APP")]
    pub apps: Vec<String>,

    /// Only show resources of these types (e.g. command, view, route-web)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<ResourceKind>,

    /// Split the output into one table per group
    #[arg(long, value_enum, default_value_t = GroupByArg::Default)]
    pub group_by: GroupByArg,

    /// Don't show the usage example column
    #[arg(long)]
    pub no_example: bool,

    /// Print the rows as JSON
    #[arg(long)]
    pub json: bool,
}
