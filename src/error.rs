//! Error type shared by the client, configuration and report sinks.
//!
//! Failed checks are not errors: a case that times out or receives the wrong
//! body is recorded as a failed [`CaseOutcome`](crate::testing::CaseOutcome)
//! and the run moves on. `Error` covers what stops the harness itself.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid base URL `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("{method} {url} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        method: String,
        url: String,
        timeout: Duration,
    },

    #[error("{method} {url} failed: {source}")]
    Request {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid config file `{}`: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report output: {0}")]
    Output(#[source] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("reporter cannot {action} while {state}")]
    ReporterState {
        action: &'static str,
        state: &'static str,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
