//! Failure taxonomy for subgrab-core.
//!
//! Every error raised by the HTTP client is one of the `ApiError` variants below.
//! The UI never inspects variants beyond displaying them, so each `Display` string
//! is written to be shown to the user verbatim in a dialog.

use std::path::PathBuf;

use reqwest::StatusCode;

/// Errors produced by [`crate::client::SubtitleApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No API key was configured. Raised before any network I/O.
    #[error("OpenSubtitles API key is missing. Set OPENSUBTITLES_API_KEY or `api_key` in the config file.")]
    MissingCredentials,

    /// `POST /login` returned a non-200 status (carries the response body) or no token.
    #[error("Login failed: {0}")]
    Authentication(String),

    /// 401 or 403 from a search or download call.
    #[error("{}", authorization_message(.status))]
    Authorization { status: StatusCode },

    /// 429 from any API call. No automatic backoff is attempted.
    #[error("Too many requests: rate limit exceeded.")]
    RateLimited,

    /// Any other non-2xx status.
    #[error("HTTP error {status} from {url}")]
    Http { status: StatusCode, url: String },

    /// `POST /download` succeeded but the payload had no `link`.
    #[error("No download link returned from API.")]
    MissingLink,

    /// The selected search result has no downloadable file.
    #[error("No downloadable file found for this subtitle.")]
    MissingFile,

    /// Connection, TLS, or timeout failure.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a body that does not match the expected shape.
    #[error("Unexpected API response: {0}")]
    Decode(String),

    /// Writing the downloaded subtitle failed.
    #[error("Could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client itself could not be built.
    #[error("Could not initialise HTTP client: {0}")]
    ClientInit(String),
}

fn authorization_message(status: &StatusCode) -> &'static str {
    if *status == StatusCode::FORBIDDEN {
        "Forbidden: check your API key or login."
    } else {
        "Unauthorized: check your API key or login."
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// Errors raised while reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;
