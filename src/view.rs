//! User-held view state and its reconciliation with fetched snapshots.
//!
//! [`Dashboard`] is the single owner of the current [`Snapshot`] and the
//! [`ViewState`]. The filtered list is always recomputed from the whole
//! snapshot; the current page is clamped after every recomputation.

use crate::filter;
use crate::i18n::Lang;
use crate::paginate::{self, Nav, Page};
use crate::types::{Project, Snapshot};

pub const DEFAULT_MIN_STARS: i64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub min_stars: i64,
    pub current_page: usize,
    pub language: Lang,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            min_stars: DEFAULT_MIN_STARS,
            current_page: 1,
            language: Lang::En,
        }
    }
}

/// How an incoming snapshot was reconciled with the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// First snapshot ever applied.
    Initial,
    /// `last_updated` moved; the page was reset.
    Changed,
    /// Same `last_updated`; the page was kept.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    view: ViewState,
    page_size: usize,
    snapshot: Option<Snapshot>,
    filtered: Vec<Project>,
    min_stars_edited: bool,
}

impl Dashboard {
    pub fn new(view: ViewState, page_size: usize) -> Self {
        Self {
            view,
            page_size: page_size.max(1),
            snapshot: None,
            filtered: Vec::new(),
            min_stars_edited: false,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// `last_updated` of the most recently applied snapshot.
    pub fn last_updated(&self) -> Option<&str> {
        self.snapshot.as_ref().and_then(|s| s.last_updated.as_deref())
    }

    pub fn filtered(&self) -> &[Project] {
        &self.filtered
    }

    pub fn page(&self) -> Page<'_, Project> {
        paginate::paginate(&self.filtered, self.page_size, self.view.current_page)
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered.len(), self.page_size)
    }

    /// Replace the snapshot and reconcile the view with it.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> Applied {
        let applied = match &self.snapshot {
            None => Applied::Initial,
            Some(previous) if previous.last_updated != snapshot.last_updated => Applied::Changed,
            Some(_) => Applied::Unchanged,
        };

        if applied == Applied::Initial && !self.min_stars_edited {
            if let Some(seed) = snapshot.min_stars() {
                self.view.min_stars = seed;
            }
        }
        if applied != Applied::Unchanged {
            self.view.current_page = 1;
        }

        self.snapshot = Some(snapshot);
        self.refilter();
        applied
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.search_term = term.into();
        self.view.current_page = 1;
        self.refilter();
    }

    /// Set the star threshold from raw user text. Locks out the feed's seed value.
    pub fn set_min_stars(&mut self, input: &str) {
        self.view.min_stars = filter::parse_min_stars(input);
        self.min_stars_edited = true;
        self.view.current_page = 1;
        self.refilter();
    }

    /// Apply a pagination control. Returns `false` when it was disabled.
    pub fn navigate(&mut self, nav: Nav) -> bool {
        match nav.target(self.view.current_page, self.total_pages()) {
            Some(page) => {
                self.view.current_page = page;
                true
            }
            None => false,
        }
    }

    pub fn goto_page(&mut self, requested: usize) {
        self.view.current_page = paginate::clamp_page(requested, self.total_pages());
    }

    pub fn set_language(&mut self, language: Lang) {
        self.view.language = language;
    }

    fn refilter(&mut self) {
        self.filtered = match &self.snapshot {
            Some(snapshot) => filter::filter(
                &snapshot.projects,
                &self.view.search_term,
                self.view.min_stars,
            ),
            None => Vec::new(),
        };
        self.view.current_page = paginate::clamp_page(self.view.current_page, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceConfig;

    fn snapshot(last_updated: Option<&str>, n: u64, stars: u64) -> Snapshot {
        Snapshot {
            last_updated: last_updated.map(str::to_string),
            count: Some(n),
            projects: (0..n)
                .map(|id| Project {
                    id,
                    name: format!("repo{id}"),
                    full_name: Some(format!("owner/repo{id}")),
                    stargazers_count: stars,
                    ..Default::default()
                })
                .collect(),
            source_config: None,
        }
    }

    #[test]
    fn first_snapshot_lands_on_page_one() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        assert_eq!(dash.apply_snapshot(snapshot(Some("a"), 30, 50)), Applied::Initial);
        assert_eq!(dash.view().current_page, 1);
        assert_eq!(dash.total_pages(), 2);
    }

    #[test]
    fn unchanged_snapshot_keeps_page() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 30, 50));
        assert!(dash.navigate(Nav::Next));
        assert_eq!(dash.apply_snapshot(snapshot(Some("a"), 30, 50)), Applied::Unchanged);
        assert_eq!(dash.view().current_page, 2);
    }

    #[test]
    fn missing_timestamps_on_both_sides_count_as_unchanged() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(None, 30, 50));
        assert_eq!(dash.apply_snapshot(snapshot(None, 31, 50)), Applied::Unchanged);
        assert_eq!(dash.snapshot().map(Snapshot::count), Some(31));
    }

    #[test]
    fn changed_snapshot_resets_page() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 30, 50));
        dash.navigate(Nav::Last);
        assert_eq!(dash.apply_snapshot(snapshot(Some("b"), 35, 50)), Applied::Changed);
        assert_eq!(dash.view().current_page, 1);
        assert_eq!(dash.last_updated(), Some("b"));
    }

    #[test]
    fn shrinking_snapshot_clamps_page() {
        let mut dash = Dashboard::new(ViewState::default(), 10);
        dash.apply_snapshot(snapshot(Some("a"), 30, 50));
        dash.navigate(Nav::Last);
        assert_eq!(dash.view().current_page, 3);
        dash.apply_snapshot(snapshot(Some("a"), 12, 50));
        assert_eq!(dash.view().current_page, 2);
        assert!(!dash.page().items.is_empty());
    }

    #[test]
    fn filter_edits_reset_page() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 60, 50));
        dash.navigate(Nav::Last);
        dash.set_search("repo1");
        assert_eq!(dash.view().current_page, 1);
        dash.navigate(Nav::Next);
        dash.set_min_stars("abc");
        assert_eq!(dash.view().min_stars, 0);
        assert_eq!(dash.view().current_page, 1);
    }

    #[test]
    fn navigation_leaves_filters_alone() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 60, 50));
        dash.set_search("repo");
        dash.navigate(Nav::Next);
        assert_eq!(dash.view().search_term, "repo");
        assert_eq!(dash.view().min_stars, DEFAULT_MIN_STARS);
    }

    #[test]
    fn language_switch_is_orthogonal() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 60, 50));
        dash.set_search("repo");
        dash.navigate(Nav::Next);
        let before = dash.filtered().to_vec();
        dash.set_language(Lang::Es);
        assert_eq!(dash.view().current_page, 2);
        assert_eq!(dash.view().search_term, "repo");
        assert_eq!(dash.filtered(), before.as_slice());
    }

    #[test]
    fn feed_seeds_threshold_on_first_load_only() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        let mut first = snapshot(Some("a"), 5, 100);
        first.source_config = Some(SourceConfig { min_stars: Some(75) });
        dash.apply_snapshot(first);
        assert_eq!(dash.view().min_stars, 75);

        let mut second = snapshot(Some("b"), 5, 100);
        second.source_config = Some(SourceConfig { min_stars: Some(10) });
        dash.apply_snapshot(second);
        assert_eq!(dash.view().min_stars, 75);
    }

    #[test]
    fn user_threshold_wins_over_feed_seed() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.set_min_stars("5");
        let mut first = snapshot(Some("a"), 5, 100);
        first.source_config = Some(SourceConfig { min_stars: Some(75) });
        dash.apply_snapshot(first);
        assert_eq!(dash.view().min_stars, 5);
    }

    #[test]
    fn goto_page_clamps() {
        let mut dash = Dashboard::new(ViewState::default(), 25);
        dash.apply_snapshot(snapshot(Some("a"), 60, 50));
        dash.goto_page(999);
        assert_eq!(dash.view().current_page, 3);
    }
}
