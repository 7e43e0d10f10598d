//! Error type shared by every module of the compiler.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("music directory not found: {}", .0.display())]
    MissingMusicDir(PathBuf),

    #[error("{kind} '{slug}' already exists")]
    AlreadyExists { kind: &'static str, slug: String },

    #[error("{kind} '{slug}' not found")]
    NotFound { kind: &'static str, slug: String },

    #[error("title is required")]
    EmptyTitle,

    #[error("'{0}' does not produce a usable slug")]
    InvalidSlug(String),

    #[error("deploy failed: {0}")]
    Deploy(String),
}

impl Error {
    /// Wrap an `io::Error` together with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
