//! Settings and saved preferences.
//!
//! Settings are read with the following precedence (highest first):
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables (`GHTAIL_FEED_URL`, `GHTAIL_POLL_INTERVAL_SECS`,
//!    `GHTAIL_PAGE_SIZE`)
//! 3. `~/.config/ghtail/settings.toml`
//! 4. Built-in defaults
//!
//! Example settings file:
//! ```toml
//! feed_url = "https://example.com/projects.json"
//! poll_interval_secs = 60
//! page_size = 25
//! banner_secs = 8
//! fade_millis = 300
//! request_timeout_secs = 10
//! ```
//!
//! The only thing ghtail writes is `~/.config/ghtail/preferences.json`, which
//! remembers the chosen language.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::i18n::Lang;
use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::poller::{PollSettings, MAX_POLL_INTERVAL};

pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/alcastelo/github-tail/refs/heads/master/data/projects.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub feed_url: String,
    pub poll_interval_secs: u64,
    pub page_size: usize,
    pub banner_secs: u64,
    pub fade_millis: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            poll_interval_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            banner_secs: 8,
            fade_millis: 300,
            request_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Settings file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match config_dir() {
            Ok(dir) => Self::from_file(&dir.join("settings.toml"))?,
            Err(_) => Self::default(),
        };
        settings.apply_env(|name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read a settings file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("GHTAIL_FEED_URL") {
            self.feed_url = url;
        }
        if let Some(value) = var("GHTAIL_POLL_INTERVAL_SECS") {
            self.poll_interval_secs = value.trim().parse().map_err(|_| ConfigError::Env {
                name: "GHTAIL_POLL_INTERVAL_SECS",
                value,
            })?;
        }
        if let Some(value) = var("GHTAIL_PAGE_SIZE") {
            self.page_size = value.trim().parse().map_err(|_| ConfigError::Env {
                name: "GHTAIL_PAGE_SIZE",
                value,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Zero("poll_interval_secs"));
        }
        if self.poll_interval_secs > MAX_POLL_INTERVAL.as_secs() {
            return Err(ConfigError::Range {
                name: "poll_interval_secs",
                max: MAX_POLL_INTERVAL.as_secs(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Zero("page_size"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.poll_interval_secs),
            banner_visible_for: Duration::from_secs(self.banner_secs),
            banner_fade_for: Duration::from_millis(self.fade_millis),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub language: Option<Lang>,
}

impl Preferences {
    /// Load saved preferences. Missing or unreadable files give the defaults.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Ignoring corrupt preferences"
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Preferences saved");
        Ok(())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("preferences.json"))
    }
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
    Ok(PathBuf::from(home).join(".config").join("ghtail"))
}

/// The locale the environment reports, in the order POSIX consults it.
pub fn env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// Explicit flag, then saved preference, then locale, then English.
pub fn resolve_language(flag: Option<Lang>, saved: Option<Lang>, locale: Option<&str>) -> Lang {
    flag.or(saved)
        .or_else(|| locale.and_then(Lang::from_locale))
        .unwrap_or_default()
}
