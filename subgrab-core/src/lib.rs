//! Core library for subgrab: the OpenSubtitles HTTP client, the session and
//! search-result data model, and configuration loading.
//!
//! Nothing here knows about the terminal. The `subgrab` binary drives
//! [`client::SubtitleApi`] from a background worker and renders the results.

pub mod client;
pub mod config;
mod dto;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use client::{ApiConfig, OpenSubtitlesClient, SubtitleApi};
pub use error::{ApiError, ConfigError};
pub use session::Session;
pub use types::{DownloadLink, SearchQuery, SearchResultItem};
