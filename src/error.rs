//! Error type shared by the client and the webhook router

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// SDK error
///
/// Every variant reports a status code through [`Error::status_code`]; only
/// HTTP failures that actually received a response carry a non-zero one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The gateway answered with a non-2xx status, or the request never got
    /// a response (status 0).
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Missing or empty credentials.
    #[error("{0}")]
    Config(String),

    /// A file passed as `FileSource::Path` could not be read.
    #[error("Failed to read file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Transport failure with no HTTP response attached.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        Self::Http {
            status: err.status().map_or(0, |s| s.as_u16()),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// HTTP status of the failed call, `0` when no response was involved.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            Self::InvalidJson(_) | Self::Config(_) | Self::File { .. } => 0,
        }
    }

    /// `true` when the gateway rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), 401 | 403)
    }
}
