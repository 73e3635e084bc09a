use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One fetched feed document. Replaced wholesale by the next successful fetch.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, rename = "source")]
    pub source_config: Option<SourceConfig>,
}

impl Snapshot {
    /// Number of listed repositories, falling back to the project count.
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(self.projects.len() as u64)
    }

    /// Star threshold the feed was generated with, if it says.
    pub fn min_stars(&self) -> Option<i64> {
        self.source_config.as_ref().and_then(|s| s.min_stars)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SourceConfig {
    #[serde(default)]
    pub min_stars: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl Project {
    /// `full_name` when present and non-empty, otherwise `name`.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(full) if !full.is_empty() => full,
            _ => &self.name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Render an RFC 3339 timestamp in local time, or hand back the raw text.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
