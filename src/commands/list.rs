use anyhow::{Context, Result};

use ghtail::render;

use super::shared::prepare;
use crate::FeedArgs;

pub async fn list(args: FeedArgs, page: usize) -> Result<()> {
    let (_, source, mut dashboard) = prepare(&args, None)?;

    let snapshot = source
        .fetch_snapshot()
        .await
        .context("Failed to fetch the feed")?;
    dashboard.apply_snapshot(snapshot);
    dashboard.goto_page(page);

    let lang = dashboard.view().language;
    println!("{}", render::meta_line(dashboard.snapshot(), lang));
    println!("{}", "-".repeat(60));
    print!("{}", render::listing(&dashboard));
    Ok(())
}
