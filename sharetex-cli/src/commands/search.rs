//! `search` and `categories` commands.

use chrono::{DateTime, Utc};
use console::style;
use sharetex::catalog::{CategoryCount, ScoredItem};
use sharetex::Resolution;

use super::common::{load_catalog, CliContext};
use crate::error::CliError;

/// Options for [`run_search`].
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    pub category: Option<String>,
    /// Overrides `catalog.min_score` when set.
    pub min_score: Option<f32>,
    pub resolution: Resolution,
    pub limit: usize,
}

pub fn run_search(ctx: &CliContext, args: SearchArgs) -> Result<(), CliError> {
    let orchestrator = ctx.orchestrator()?;
    let filter = ctx
        .runtime()
        .block_on(load_catalog(&ctx.settings, &orchestrator))?;

    let min_score = args.min_score.unwrap_or(ctx.settings.min_score);
    let results = filter.ranked(
        &args.query,
        args.category.as_deref(),
        min_score,
        args.resolution,
    );

    if results.is_empty() {
        println!("No items match.");
        return Ok(());
    }

    let now = Utc::now();
    for scored in results.iter().take(args.limit) {
        let cached = scored.resolution.is_some_and(|res| {
            orchestrator
                .store()
                .has_asset(&sharetex::fetch::FetchOrchestrator::asset_key(scored.item, res))
        });
        println!("{}", format_row(scored, now, cached));
    }

    if results.len() > args.limit {
        println!();
        println!(
            "{} more, use --limit to show them",
            results.len() - args.limit
        );
    }

    Ok(())
}

pub fn run_categories(ctx: &CliContext) -> Result<(), CliError> {
    let orchestrator = ctx.orchestrator()?;
    let filter = ctx
        .runtime()
        .block_on(load_catalog(&ctx.settings, &orchestrator))?;

    for line in format_counts(&filter.category_counts()) {
        println!("{}", line);
    }
    Ok(())
}

/// One result line: score, title, slug, category, resolution and badges.
fn format_row(scored: &ScoredItem<'_>, now: DateTime<Utc>, cached: bool) -> String {
    let item = scored.item;
    let resolution = scored
        .resolution
        .map_or_else(|| "-".to_string(), |r| r.to_string());

    let mut line = format!(
        "{:>5.1}  {}  {}  [{}] {}",
        scored.score,
        style(&item.title).bold(),
        style(&item.slug).dim(),
        item.category,
        resolution
    );
    if item.is_recently_published(now) {
        line.push_str(&format!(" {}", style("NEW").green().bold()));
    }
    if cached {
        line.push_str(&format!(" {}", style("cached").cyan()));
    }
    line
}

fn format_counts(counts: &[CategoryCount]) -> Vec<String> {
    let width = counts.iter().map(|c| c.name.len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|c| format!("{:<width$}  {:>5}", c.name, c.count, width = width))
        .collect()
}
