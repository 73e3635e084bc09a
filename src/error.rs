use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops a feed fetch from producing a snapshot.
///
/// The refresh loop does not distinguish between variants; they only show up
/// in logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("feed responded with HTTP {0}")]
    Status(u16),
    #[error("feed is not a valid document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read feed file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("fetch task did not complete: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no HOME directory to store configuration in")]
    NoHome,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("{name} must be at most {max}")]
    Range { name: &'static str, max: u64 },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("unsupported language: {0}")]
    Language(String),
}
