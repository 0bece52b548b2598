//! `download` command: fetch an asset into the cache with a spinner and
//! Ctrl-C cancellation.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sharetex::fetch::{AssetFetch, FetchError, FetchOrchestrator, ImportReport};
use sharetex::Resolution;
use tokio_util::sync::CancellationToken;

use super::common::{find_item, load_catalog, CliContext};
use crate::error::CliError;

pub fn run(ctx: &CliContext, slug: &str, resolution: Option<Resolution>) -> Result<(), CliError> {
    let orchestrator = ctx.orchestrator()?;

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        println!();
        println!("Received interrupt, cancelling download...");
        handler_token.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    ctx.runtime().block_on(async {
        let filter = load_catalog(&ctx.settings, &orchestrator).await?;
        let item = find_item(&filter, slug)?;

        // An explicit resolution is used as-is so a missing link is reported
        let resolution = match resolution {
            Some(res) => res,
            None => item
                .pick_resolution(Resolution::default())
                .ok_or_else(|| FetchError::MissingLink {
                    slug: item.slug.clone(),
                    resolution: Resolution::default(),
                })?,
        };
        let key = FetchOrchestrator::asset_key(item, resolution);

        let spinner = spinner(format!("Downloading {} ({})", item.title, resolution));
        let result = orchestrator
            .ensure_asset_cancellable(item, resolution, &cancel)
            .await;
        spinner.finish_and_clear();

        let fetch = result?;
        for line in describe_fetch(&fetch) {
            println!("{}", line);
        }
        println!("Import path: {}", key.import_path());
        Ok::<(), CliError>(())
    })
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        bar.set_style(spinner_style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn describe_fetch(fetch: &AssetFetch) -> Vec<String> {
    match fetch {
        AssetFetch::Cached(dir) => {
            vec![format!("{} {}", style("Already cached:").green(), dir.display())]
        }
        AssetFetch::Downloaded(asset) => {
            let mut lines = vec![format!(
                "{} {} texture(s) to {}",
                style("Downloaded").green(),
                asset.report.written.len(),
                asset.directory.display()
            )];
            lines.extend(describe_report(&asset.report));
            lines
        }
    }
}

fn describe_report(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();
    for texture in &report.written {
        let parameter = texture.parameter.as_deref().unwrap_or("no parameter");
        lines.push(format!(
            "  {} -> {} ({})",
            texture.source, texture.file_name, parameter
        ));
    }
    for skipped in &report.skipped {
        lines.push(format!(
            "  {} {}: {}",
            style("skipped").yellow(),
            skipped.source,
            skipped.error
        ));
    }
    if !report.ignored.is_empty() {
        lines.push(format!(
            "  {} file(s) without an extension ignored",
            report.ignored.len()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharetex::fetch::{DownloadedAsset, ImportedTexture, SkippedEntry};
    use sharetex::naming::NameParseError;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_cached_fetch_is_one_line() {
        console::set_colors_enabled(false);
        let lines = describe_fetch(&AssetFetch::Cached(PathBuf::from("/cache/Rock/1K/amethyst-1")));
        assert_eq!(lines, vec!["Already cached: /cache/Rock/1K/amethyst-1"]);
    }

    #[test]
    fn test_downloaded_fetch_lists_report() {
        console::set_colors_enabled(false);
        let report = ImportReport {
            written: vec![
                ImportedTexture {
                    source: "1K-amethyst_1-normal.png".to_string(),
                    file_name: "T_Amethyst1-1K_N.png".to_string(),
                    parameter: Some("Normal Map".to_string()),
                },
                ImportedTexture {
                    source: "1K-amethyst_1-sheen.png".to_string(),
                    file_name: "T_Amethyst1-1K.png".to_string(),
                    parameter: None,
                },
            ],
            skipped: vec![SkippedEntry {
                source: "preview.jpg".to_string(),
                error: NameParseError::MissingResolution("preview".to_string()),
            }],
            unlabeled: vec!["T_Amethyst1-1K.png".to_string()],
            ignored: vec!["LICENSE".to_string()],
        };
        let fetch = AssetFetch::Downloaded(DownloadedAsset {
            directory: PathBuf::from("/cache/Rock/1K/amethyst-1"),
            report: Arc::new(report),
        });

        let lines = describe_fetch(&fetch);
        assert_eq!(lines[0], "Downloaded 2 texture(s) to /cache/Rock/1K/amethyst-1");
        assert_eq!(
            lines[1],
            "  1K-amethyst_1-normal.png -> T_Amethyst1-1K_N.png (Normal Map)"
        );
        assert!(lines[2].ends_with("(no parameter)"));
        assert!(lines[3].starts_with("  skipped preview.jpg:"));
        assert_eq!(lines[4], "  1 file(s) without an extension ignored");
    }
}
