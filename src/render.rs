//! Plain-text frames for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::i18n::{t, translate, Lang};
use crate::notify::BannerPhase;
use crate::paginate::Page;
use crate::poller::Session;
use crate::refresh::RefreshStatus;
use crate::types::{format_timestamp, Project, Snapshot};
use crate::view::Dashboard;

const RULE_WIDTH: usize = 60;

pub fn meta_line(snapshot: Option<&Snapshot>, lang: Lang) -> String {
    let updated = match snapshot.and_then(|s| s.last_updated.as_deref()) {
        Some(raw) => format!("{}{}", t("lastUpdated", lang), format_timestamp(raw)),
        None => t("noData", lang),
    };
    let count = snapshot.map_or(0, Snapshot::count);
    format!("{} | {}{}", updated, t("reposListed", lang), count)
}

pub fn status_line(
    status: RefreshStatus,
    last_check: Option<DateTime<Local>>,
    paused: bool,
    lang: Lang,
) -> String {
    let time = last_check
        .map(|ts| ts.format("%H:%M:%S").to_string())
        .unwrap_or_default();
    let line = match status {
        RefreshStatus::Idle | RefreshStatus::Checking => t("checking", lang),
        RefreshStatus::Updated => translate("lastCheck", lang, &[("time", time.as_str())]),
        RefreshStatus::Error => translate("checkError", lang, &[("time", time.as_str())]),
    };
    if paused {
        format!("{} · {}", line, t("paused", lang))
    } else {
        line
    }
}

pub fn project_block(project: &Project, lang: Lang) -> String {
    let mut out = String::new();
    let title = match &project.owner {
        Some(owner) if !owner.login.is_empty() => format!("{} / {}", owner.login, project.name),
        _ => project.name.clone(),
    };
    let description = project
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("<{}>", t("noDescription", lang)));
    let updated = project
        .updated_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| t("unknown", lang));

    let _ = writeln!(out, "  {}", title);
    let _ = writeln!(out, "    {}", description);
    let _ = writeln!(
        out,
        "    ⭐ {}   {}   {}{}",
        project.stargazers_count,
        project.language.as_deref().unwrap_or("—"),
        t("updated", lang),
        updated
    );
    if !project.html_url.is_empty() {
        let _ = writeln!(out, "    {}", project.html_url);
    }
    out
}

pub fn pagination_line<T>(page: &Page<'_, T>, lang: Lang) -> String {
    let control = |key: &str, disabled: bool| {
        let label = t(key, lang);
        if disabled {
            format!("({})", label)
        } else {
            label
        }
    };
    let current = page.page.to_string();
    let total = page.total_pages.to_string();
    format!(
        "{} | {} | {} | {} | {}",
        control("firstPage", page.is_first()),
        control("prevPage", page.is_first()),
        translate("pageOf", lang, &[("current", current.as_str()), ("total", total.as_str())]),
        control("nextPage", page.is_last()),
        control("lastPage", page.is_last()),
    )
}

/// The project list for the current page, then the pagination controls.
pub fn listing(dashboard: &Dashboard) -> String {
    let lang = dashboard.view().language;
    let page = dashboard.page();
    let mut out = String::new();
    if page.items.is_empty() {
        let _ = writeln!(out, "  {}", t("noResults", lang));
    } else {
        for project in page.items {
            out.push_str(&project_block(project, lang));
            out.push('\n');
        }
    }
    let _ = writeln!(out, "{}", pagination_line(&page, lang));
    out
}

pub fn frame(session: &Session) -> String {
    let dashboard = &session.dashboard;
    let view = dashboard.view();
    let lang = view.language;
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{}", meta_line(dashboard.snapshot(), lang));
    let _ = writeln!(
        out,
        "{}",
        status_line(
            session.refresh.status(),
            session.refresh.last_check(),
            session.paused,
            lang
        )
    );
    let _ = writeln!(
        out,
        "{}\"{}\"   {}{}",
        t("search", lang),
        view.search_term,
        t("minStars", lang),
        view.min_stars
    );
    match session.banner_phase() {
        BannerPhase::Visible => {
            let _ = writeln!(out, "{} {}", t("newRepos", lang), t("dismiss", lang));
        }
        BannerPhase::Fading => {
            let _ = writeln!(out, "…{}…", t("newRepos", lang));
        }
        BannerPhase::Hidden => {}
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out.push_str(&listing(dashboard));
    out
}
