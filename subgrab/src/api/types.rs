//! Owned request/result types exchanged with the API worker thread.
//!
//! Everything here is `Send` and carries its own copy of the session token, so
//! the worker never reads UI state.

use std::path::PathBuf;

use subgrab_core::{ApiError, SearchQuery, SearchResultItem};

/// Commands sent from the UI thread to the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Login {
        username: String,
        password: String,
    },
    Search {
        token: Option<String>,
        query: SearchQuery,
    },
    /// Resolve the signed link for `file_id`, then fetch it into `directory`.
    Download {
        token: Option<String>,
        file_id: u64,
        directory: PathBuf,
    },
}

impl ApiRequest {
    /// Short name for logging. Never log the request itself: it holds the password.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Search { .. } => "search",
            Self::Download { .. } => "download",
        }
    }
}

/// Result sent back from the worker inside `AppEvent::ApiResult`.
#[derive(Debug)]
pub enum ApiResult {
    Login {
        username: String,
        result: Result<String, ApiError>,
    },
    Search {
        query: SearchQuery,
        result: Result<Vec<SearchResultItem>, ApiError>,
    },
    Download {
        file_id: u64,
        result: Result<PathBuf, ApiError>,
    },
}

impl ApiResult {
    /// Builds the failed result matching `request`.
    pub fn failed(request: ApiRequest, error: ApiError) -> Self {
        match request {
            ApiRequest::Login { username, .. } => Self::Login {
                username,
                result: Err(error),
            },
            ApiRequest::Search { query, .. } => Self::Search {
                query,
                result: Err(error),
            },
            ApiRequest::Download { file_id, .. } => Self::Download {
                file_id,
                result: Err(error),
            },
        }
    }
}
