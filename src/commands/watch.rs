use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Result;
use tokio::sync::mpsc;

use ghtail::config::Preferences;
use ghtail::error::InputError;
use ghtail::paginate::Nav;
use ghtail::poller::{self, Input};
use ghtail::render;

use super::shared::prepare;
use crate::FeedArgs;

const HELP: &str = "Commands: n/p/f/l (page), /TEXT (search), *N (min stars), \
lang en|es, pause, resume, r (refresh), x (dismiss), q (quit)";

/// Parse one line typed into a watch session. Blank lines are ignored.
pub fn parse_command(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(term) = line.strip_prefix('/') {
        return Ok(Some(Input::Search(term.trim().to_string())));
    }
    if let Some(stars) = line.strip_prefix('*') {
        return Ok(Some(Input::MinStars(stars.trim().to_string())));
    }
    if let Some(lang) = line.strip_prefix("lang ") {
        return Ok(Some(Input::Language(lang.parse()?)));
    }
    let input = match line {
        "pause" => Input::Pause,
        "resume" => Input::Resume,
        "r" | "refresh" => Input::Refresh,
        "x" | "dismiss" => Input::Dismiss,
        "q" | "quit" => Input::Quit,
        other => Input::Nav(other.parse::<Nav>()?),
    };
    Ok(Some(input))
}

/// Read commands from stdin on a plain thread; tokio's stdin would hold up
/// runtime shutdown while blocked on a read.
fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(input)) => {
                    if let Input::Language(lang) = input {
                        let prefs = Preferences {
                            language: Some(lang),
                        };
                        if let Err(err) = prefs.save() {
                            tracing::warn!(error = %err, "Could not save language preference");
                        }
                    }
                    if tx.blocking_send(input).is_err() {
                        break;
                    }
                }
                Err(err) => eprintln!("{}. {}", err, HELP),
            }
        }
    });
}

pub async fn watch(args: FeedArgs, interval: Option<u64>) -> Result<()> {
    let (settings, source, dashboard) = prepare(&args, interval)?;
    let (tx, rx) = mpsc::channel(32);

    spawn_stdin_reader(tx.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Input::Quit).await;
        }
    });

    eprintln!("{}", HELP);
    poller::run(source, settings.poll_settings(), dashboard, rx, |session| {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", render::frame(session));
        let _ = stdout.flush();
    })
    .await;

    Ok(())
}
