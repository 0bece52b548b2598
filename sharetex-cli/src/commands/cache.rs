//! Cache management CLI commands.

use clap::Subcommand;
use dialoguer::Confirm;
use sharetex::cache::CacheStore;
use sharetex::config::format_size;

use super::common::CliContext;
use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Show disk cache statistics
    Stats,
    /// Delete every cached asset and thumbnail
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the cache directory
    Path,
}

/// Run a cache subcommand.
pub fn run(ctx: &CliContext, action: CacheAction) -> Result<(), CliError> {
    let store = ctx.settings.cache_store();

    match action {
        CacheAction::Stats => {
            println!("Disk cache: {}", store.root().display());
            for line in stats_lines(&store)? {
                println!("{}", line);
            }
            Ok(())
        }
        CacheAction::Clear { yes } => {
            if !yes && !confirm_clear(&store)? {
                return Err(CliError::Aborted);
            }
            println!("{}", clear(&store)?);
            Ok(())
        }
        CacheAction::Path => {
            println!("{}", store.root().display());
            Ok(())
        }
    }
}

fn confirm_clear(store: &CacheStore) -> Result<bool, CliError> {
    Confirm::new()
        .with_prompt(format!("Delete everything under {}?", store.root().display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::Config(format!("Failed to read confirmation: {}", e)))
}

fn stats_lines(store: &CacheStore) -> Result<Vec<String>, CliError> {
    let stats = store.stats()?;
    Ok(vec![
        format!("  Files: {}", stats.disk_files),
        format!("  Size:  {}", format_size(stats.disk_bytes as usize)),
        format!(
            "  Memory budget: {}",
            format_size(stats.memory.max_size_bytes as usize)
        ),
    ])
}

fn clear(store: &CacheStore) -> Result<String, CliError> {
    let result = store.clear_all()?;
    Ok(format!(
        "Deleted {} files, freed {}",
        result.files_deleted,
        format_size(result.bytes_freed as usize)
    ))
}
