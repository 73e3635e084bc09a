use std::sync::Arc;

use anyhow::{Context, Result};

use ghtail::config::{env_locale, resolve_language, Preferences, Settings};
use ghtail::source::{self, DataSource};
use ghtail::view::{Dashboard, ViewState};

use crate::FeedArgs;

/// Settings, feed source and an initial dashboard for a feed-reading command.
pub(crate) fn prepare(
    args: &FeedArgs,
    interval: Option<u64>,
) -> Result<(Settings, Arc<dyn DataSource>, Dashboard)> {
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(feed) = &args.feed {
        settings.feed_url = feed.clone();
    }
    if let Some(secs) = interval {
        settings.poll_interval_secs = secs;
    }
    settings.validate().context("Invalid settings")?;

    let source = source::from_location(&settings.feed_url, settings.request_timeout())
        .context("Failed to set up the feed client")?;

    let saved = Preferences::load().language;
    let language = resolve_language(args.lang, saved, env_locale().as_deref());
    tracing::debug!(feed = %settings.feed_url, %language, "Prepared feed");

    let mut dashboard = Dashboard::new(
        ViewState {
            language,
            ..ViewState::default()
        },
        settings.page_size,
    );
    if let Some(term) = &args.search {
        dashboard.set_search(term.clone());
    }
    if let Some(min_stars) = &args.min_stars {
        dashboard.set_min_stars(min_stars);
    }

    Ok((settings, Arc::from(source), dashboard))
}
