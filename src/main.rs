//! autoreg - module auto-registration resolver
//!
//! Lists and caches the resources modular Laravel applications register.

use clap::Parser;

use autoreg::cli::{Cli, Commands};
use autoreg::commands::{self, helpers::ProjectOptions};
use autoreg::logging;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let project = ProjectOptions::from_cli(&cli);
    let result = match cli.command {
        Commands::List(args) => commands::list::run(&project, args),
        Commands::Cache(args) => commands::cache::run(&project, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
