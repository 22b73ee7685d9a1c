use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve everything and write the cache:\n    autoreg cache\n\n\
                  Write the cache somewhere else:\n    autoreg --cache-dir /tmp/autoreg cache\n\n\
                  Remove the cache:\n    autoreg cache clear")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// Remove the cache files
    Clear,
}
