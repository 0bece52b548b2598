//! `thumbnail` command: fetch and decode an item's preview.

use console::style;

use super::common::{find_item, load_catalog, CliContext};
use crate::error::CliError;

pub fn run(ctx: &CliContext, slug: &str) -> Result<(), CliError> {
    let orchestrator = ctx.orchestrator()?;

    ctx.runtime().block_on(async {
        let filter = load_catalog(&ctx.settings, &orchestrator).await?;
        let item = find_item(&filter, slug)?;
        let path = orchestrator.store().thumbnail_path(&item.slug);

        match orchestrator.ensure_thumbnail(item).await? {
            Some(image) => println!(
                "{} {}x{} preview at {}",
                style(&item.title).bold(),
                image.width(),
                image.height(),
                path.display()
            ),
            None => println!(
                "{} preview at {} could not be decoded",
                style(&item.title).bold(),
                path.display()
            ),
        }
        Ok::<(), CliError>(())
    })
}
