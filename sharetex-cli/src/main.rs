//! Sharetex CLI - browse, download and cache texture sets.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::cache::CacheAction;
use commands::common::ResolutionArg;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "sharetex", version, about = "Texture catalog browser with a local asset cache")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Free-text query (empty lists everything)
        query: Option<String>,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Minimum score an item must exceed [default: catalog.min_score]
        #[arg(long)]
        min_score: Option<f32>,

        /// Preferred resolution
        #[arg(short, long, value_enum, default_value_t = ResolutionArg::OneK)]
        resolution: ResolutionArg,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },

    /// List categories with their item counts
    Categories,

    /// Download a texture set into the cache
    Download {
        /// Item slug
        slug: String,

        /// Resolution [default: 1K, or the lowest the item offers]
        #[arg(short, long, value_enum)]
        resolution: Option<ResolutionArg>,
    },

    /// Fetch and decode an item's preview image
    Thumbnail {
        /// Item slug
        slug: String,
    },

    /// Show how archive entry names are parsed and renamed
    Parse {
        /// Entry names, with or without extension
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Inspect or clear the cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // These work without a usable config or logging
        Commands::Config { command } => commands::config::run(command),
        Commands::Parse { names } => commands::parse::run(&names),

        command => {
            let ctx = commands::common::CliContext::load(cli.verbose)?;
            match command {
                Commands::Search {
                    query,
                    category,
                    min_score,
                    resolution,
                    limit,
                } => commands::search::run_search(
                    &ctx,
                    commands::search::SearchArgs {
                        query: query.unwrap_or_default(),
                        category,
                        min_score,
                        resolution: resolution.into(),
                        limit,
                    },
                ),
                Commands::Categories => commands::search::run_categories(&ctx),
                Commands::Download { slug, resolution } => {
                    commands::download::run(&ctx, &slug, resolution.map(Into::into))
                }
                Commands::Thumbnail { slug } => commands::thumbnail::run(&ctx, &slug),
                Commands::Cache { action } => commands::cache::run(&ctx, action),
                // Dispatched above
                Commands::Config { .. } | Commands::Parse { .. } => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_arguments() {
        let cli = Cli::try_parse_from([
            "sharetex", "search", "plaster wall", "--category", "Wall", "-r", "2k", "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Search {
                query,
                category,
                resolution,
                limit,
                ..
            } => {
                assert_eq!(query.as_deref(), Some("plaster wall"));
                assert_eq!(category.as_deref(), Some("Wall"));
                assert_eq!(resolution, ResolutionArg::TwoK);
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["sharetex", "categories", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_requires_names() {
        assert!(Cli::try_parse_from(["sharetex", "parse"]).is_err());
    }
}
