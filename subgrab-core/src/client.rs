//! OpenSubtitles HTTP client.
//!
//! [`SubtitleApi`] is the seam the UI talks to; [`OpenSubtitlesClient`] is the
//! real implementation on top of a blocking `reqwest` client. Each operation is
//! one synchronous round trip with no retry, so callers must run it off the UI
//! thread if the UI has to keep drawing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::dto::{
    DownloadForm, DownloadResponse, LoginForm, LoginResponse, SubtitleSearchResponse,
};
use crate::error::{ApiError, Result};
use crate::storage;
use crate::types::{DownloadLink, SearchQuery, SearchResultItem};

pub const DEFAULT_BASE_URL: &str = "https://api.opensubtitles.com/api/v1";
pub const API_KEY_ENV: &str = "OPENSUBTITLES_API_KEY";

const API_TIMEOUT: Duration = Duration::from_secs(15);
const FILE_TIMEOUT: Duration = Duration::from_secs(30);

/// The four operations the UI needs from a subtitle provider.
///
/// `token` is the bearer token of the current session, if any. Implementations
/// must not keep their own copy of it.
pub trait SubtitleApi {
    /// Exchanges credentials for a bearer token.
    fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Searches movie subtitles, most downloaded first, in API order.
    fn search(&self, token: Option<&str>, query: &SearchQuery) -> Result<Vec<SearchResultItem>>;

    /// Asks the API for a signed download link for `file_id`.
    fn resolve_download(&self, token: Option<&str>, file_id: u64) -> Result<DownloadLink>;

    /// Fetches `url` and writes it to `dir/file_name`. Returns the written path.
    fn fetch_file(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf>;
}

/// Connection settings for [`OpenSubtitlesClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("subgrab v{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
pub struct OpenSubtitlesClient {
    http_client: Client,
    config: ApiConfig,
}

impl OpenSubtitlesClient {
    /// Builds the client. Must not be called from inside an async runtime, since
    /// the blocking client owns its own.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientInit` if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;
        Ok(Self { http_client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fixed headers for every API request. Fails before any I/O without a key.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ApiError::MissingCredentials)?;

        let mut headers = HeaderMap::new();
        headers.insert("Api-Key", header_value(api_key.trim())?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(&self.config.user_agent)?);
        if let Some(token) = token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }
        Ok(headers)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        Ok(request.timeout(API_TIMEOUT).send()?)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ApiError::ClientInit(format!("invalid header value: {value:?}")))
}

/// Maps the status of a search or download response to the error taxonomy.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ApiError::Authorization { status })
        }
        StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
        s if !s.is_success() => Err(ApiError::Http {
            status,
            url: response.url().to_string(),
        }),
        _ => Ok(response),
    }
}

impl SubtitleApi for OpenSubtitlesClient {
    fn login(&self, username: &str, password: &str) -> Result<String> {
        let headers = self.headers(None)?;
        let response = self.send(
            self.http_client
                .post(self.endpoint("login"))
                .headers(headers)
                .json(&LoginForm { username, password }),
        )?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            warn!(%status, "login rejected");
            return Err(ApiError::Authentication(body));
        }

        let body: LoginResponse = response.json()?;
        match body.token {
            Some(token) if !token.is_empty() => {
                info!(username, "logged in");
                Ok(token)
            }
            _ => Err(ApiError::Authentication(
                "response did not include a token".to_owned(),
            )),
        }
    }

    fn search(&self, token: Option<&str>, query: &SearchQuery) -> Result<Vec<SearchResultItem>> {
        let headers = self.headers(token)?;
        let response = self.send(
            self.http_client
                .get(self.endpoint("subtitles"))
                .headers(headers)
                .query(&[
                    ("query", query.title.as_str()),
                    ("languages", query.language.as_str()),
                    ("order_by", "download_count"),
                    ("order_direction", "desc"),
                    ("type", "movie"),
                ]),
        )?;
        debug!(status = %response.status(), title = %query.title, "search response");

        let response = check_status(response)?;
        let text = response.text()?;
        let body: SubtitleSearchResponse = if text.trim().is_empty() {
            SubtitleSearchResponse::default()
        } else {
            serde_json::from_str(&text)?
        };

        Ok(body.data.into_iter().map(SearchResultItem::from_record).collect())
    }

    fn resolve_download(&self, token: Option<&str>, file_id: u64) -> Result<DownloadLink> {
        let headers = self.headers(token)?;
        let response = self.send(
            self.http_client
                .post(self.endpoint("download"))
                .headers(headers)
                .json(&DownloadForm { file_id }),
        )?;

        let body: DownloadResponse = check_status(response)?.json()?;
        if let Some(remaining) = body.remaining {
            info!(
                remaining,
                message = body.message.as_deref().unwrap_or(""),
                "download quota"
            );
        }

        let url = body
            .link
            .filter(|link| !link.is_empty())
            .ok_or(ApiError::MissingLink)?;
        let file_name = storage::sanitize_file_name(body.file_name.as_deref(), file_id);
        Ok(DownloadLink { url, file_name })
    }

    fn fetch_file(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
        storage::ensure_dir(dir)?;

        // The signed link is a plain CDN URL; API headers are not sent to it.
        let response = self
            .http_client
            .get(url)
            .timeout(FILE_TIMEOUT)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status,
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes()?;
        storage::save_subtitle(dir, file_name, &bytes)
    }
}
