//! The refresh loop.
//!
//! A single task owns the [`Session`] and `select!`s over four sources of
//! events: the polling ticker, the outstanding fetch, user input and banner
//! timers. The ticker is dropped while the session is paused and replaced on
//! resume, so at most one is ever live. Fetches run in their own task but
//! only one may be outstanding; ticks that land while it runs are skipped.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::error::FetchError;
use crate::i18n::Lang;
use crate::notify::{Banner, BannerPhase};
use crate::paginate::Nav;
use crate::refresh::{Outcome, RefreshController};
use crate::source::DataSource;
use crate::types::Snapshot;
use crate::view::Dashboard;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Longest period the ticker will run at; longer intervals are capped.
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(86_400);

type FetchResult = Result<Snapshot, FetchError>;

/// Discrete events from the user side of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Nav(Nav),
    Search(String),
    MinStars(String),
    Language(Lang),
    /// The session lost visibility; stop ticking.
    Pause,
    /// The session regained visibility; restart ticking and check now.
    Resume,
    /// Out-of-cycle check.
    Refresh,
    Dismiss,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub banner_visible_for: Duration,
    pub banner_fade_for: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            banner_visible_for: crate::notify::DEFAULT_VISIBLE_FOR,
            banner_fade_for: crate::notify::DEFAULT_FADE_FOR,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    pub dashboard: Dashboard,
    pub refresh: RefreshController,
    pub banner: Banner,
    pub paused: bool,
}

impl Session {
    pub fn banner_phase(&self) -> BannerPhase {
        self.banner.phase()
    }
}

fn start_ticker(period: Duration) -> Interval {
    let period = period.clamp(Duration::from_millis(1), MAX_POLL_INTERVAL);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

async fn join_fetch(
    handle: &mut Option<JoinHandle<FetchResult>>,
) -> Result<FetchResult, JoinError> {
    match handle {
        Some(handle) => handle.await,
        None => pending().await,
    }
}

fn start_check(
    source: &Arc<dyn DataSource>,
    refresh: &mut RefreshController,
    in_flight: &mut Option<JoinHandle<FetchResult>>,
) -> bool {
    if !refresh.begin_check() {
        return false;
    }
    let source = Arc::clone(source);
    *in_flight = Some(tokio::spawn(async move { source.fetch_snapshot().await }));
    true
}

/// Drive the session until `inputs` closes or a [`Input::Quit`] arrives.
///
/// `render` is called once at start and after every visible state change.
pub async fn run<F>(
    source: Arc<dyn DataSource>,
    settings: PollSettings,
    dashboard: Dashboard,
    mut inputs: mpsc::Receiver<Input>,
    mut render: F,
) -> Session
where
    F: FnMut(&Session),
{
    let (banner_tx, mut banner_rx) = mpsc::unbounded_channel();
    let mut session = Session {
        dashboard,
        refresh: RefreshController::new(),
        banner: Banner::new(settings.banner_visible_for, settings.banner_fade_for, banner_tx),
        paused: false,
    };
    let mut ticker = Some(start_ticker(settings.interval));
    let mut in_flight: Option<JoinHandle<FetchResult>> = None;

    tracing::info!(interval_secs = settings.interval.as_secs(), "Auto-refresh started");
    start_check(&source, &mut session.refresh, &mut in_flight);
    let mut check_started = Instant::now();
    render(&session);

    loop {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                if start_check(&source, &mut session.refresh, &mut in_flight) {
                    check_started = Instant::now();
                    render(&session);
                } else {
                    tracing::debug!("Tick skipped, previous check still in flight");
                }
            }
            joined = join_fetch(&mut in_flight) => {
                in_flight = None;
                let result = joined.unwrap_or_else(|err| Err(FetchError::Task(err.to_string())));
                let outcome = session.refresh.settle(result, &mut session.dashboard, Local::now());
                tracing::debug!(
                    elapsed_ms = check_started.elapsed().as_millis() as u64,
                    projects = session.dashboard.snapshot().map_or(0, |s| s.projects.len()),
                    outcome = ?outcome,
                    "Check settled"
                );
                if outcome.is_new_data() {
                    session.banner.show();
                }
                if outcome == Outcome::Failed && session.dashboard.snapshot().is_none() {
                    tracing::info!("No data yet, will retry on the next tick");
                }
                render(&session);
            }
            input = inputs.recv() => {
                let Some(input) = input else { break };
                match input {
                    Input::Quit => break,
                    Input::Nav(nav) => {
                        session.dashboard.navigate(nav);
                    }
                    Input::Search(term) => session.dashboard.set_search(term),
                    Input::MinStars(text) => session.dashboard.set_min_stars(&text),
                    Input::Language(lang) => session.dashboard.set_language(lang),
                    Input::Pause => {
                        if ticker.take().is_some() {
                            tracing::info!("Auto-refresh paused");
                        }
                        session.paused = true;
                    }
                    Input::Resume => {
                        ticker = Some(start_ticker(settings.interval));
                        session.paused = false;
                        tracing::info!("Auto-refresh resumed");
                        if start_check(&source, &mut session.refresh, &mut in_flight) {
                            check_started = Instant::now();
                        }
                    }
                    Input::Refresh => {
                        if start_check(&source, &mut session.refresh, &mut in_flight) {
                            check_started = Instant::now();
                        }
                    }
                    Input::Dismiss => {
                        session.banner.dismiss();
                    }
                }
                render(&session);
            }
            Some(event) = banner_rx.recv() => {
                if session.banner.handle(event) {
                    render(&session);
                }
            }
        }
    }

    if let Some(handle) = in_flight.take() {
        handle.abort();
    }
    tracing::info!("Auto-refresh stopped");
    session
}
