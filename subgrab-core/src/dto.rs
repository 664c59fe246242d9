//! Wire types for the OpenSubtitles REST API.
//!
//! Only the fields subgrab reads are modelled, and all of them are optional: the
//! API omits keys freely and a missing field must degrade to a default rather
//! than fail the whole search.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SubtitleSearchResponse {
    #[serde(default)]
    pub data: Vec<SubtitleRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SubtitleRecord {
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Attributes {
    pub release: Option<String>,
    pub language: Option<String>,
    pub year: Option<i64>,
    pub download_count: Option<u64>,
    pub downloads: Option<u64>,
    #[serde(default)]
    pub files: Vec<File>,
    pub feature_details: Option<FeatureDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FeatureDetails {
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct File {
    pub file_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DownloadForm {
    pub file_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DownloadResponse {
    pub link: Option<String>,
    pub file_name: Option<String>,
    pub remaining: Option<i64>,
    pub message: Option<String>,
}
