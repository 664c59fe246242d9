//! In-memory `SubtitleApi` used by the UI and worker tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use subgrab_core::error::Result;
use subgrab_core::{storage, ApiError, DownloadLink, SearchQuery, SearchResultItem, SubtitleApi};

/// Canned responses plus a log of every call made.
///
/// The default instance answers the "Inception" scenario: one search result
/// with file 123 that resolves to `Inception.srt`.
pub struct FakeApi {
    pub token: String,
    pub results: Vec<SearchResultItem>,
    pub link: DownloadLink,
    pub content: Vec<u8>,
    pub fail_login: bool,
    pub fail_resolve: bool,
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) last_token: Mutex<Option<String>>,
}

pub fn inception() -> SearchResultItem {
    SearchResultItem {
        release_title: "Inception.2010.BluRay".to_owned(),
        language_code: "en".to_owned(),
        year: Some(2010),
        download_count: 500,
        file_id: Some(123),
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            token: "jwt-token".to_owned(),
            results: vec![inception()],
            link: DownloadLink {
                url: "http://x/y.srt".to_owned(),
                file_name: "Inception.srt".to_owned(),
            },
            content: b"1\n00:00:01,000 --> 00:00:02,000\nDream\n".to_vec(),
            fail_login: false,
            fail_resolve: false,
            calls: Mutex::new(Vec::new()),
            last_token: Mutex::new(None),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().ok().and_then(|t| t.clone())
    }

    fn record(&self, call: String, token: Option<&str>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if let Ok(mut last) = self.last_token.lock() {
            *last = token.map(str::to_owned);
        }
    }
}

impl SubtitleApi for FakeApi {
    fn login(&self, username: &str, _password: &str) -> Result<String> {
        self.record(format!("login:{username}"), None);
        if self.fail_login {
            return Err(ApiError::Authentication("invalid credentials".to_owned()));
        }
        Ok(self.token.clone())
    }

    fn search(&self, token: Option<&str>, query: &SearchQuery) -> Result<Vec<SearchResultItem>> {
        self.record(format!("search:{}:{}", query.title, query.language), token);
        Ok(self.results.clone())
    }

    fn resolve_download(&self, token: Option<&str>, file_id: u64) -> Result<DownloadLink> {
        self.record(format!("resolve_download:{file_id}"), token);
        if self.fail_resolve {
            return Err(ApiError::MissingLink);
        }
        Ok(self.link.clone())
    }

    fn fetch_file(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("fetch_file:{url}"));
        }
        storage::save_subtitle(dir, file_name, &self.content)
    }
}
