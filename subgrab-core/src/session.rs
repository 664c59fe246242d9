use std::path::PathBuf;

/// Per-process login and download state.
///
/// Created with no token at startup and never persisted. The token is passed
/// explicitly into each API call by the caller; nothing in the client reads it
/// from shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub bearer_token: Option<String>,
    pub username: String,
    pub download_directory: PathBuf,
}

impl Session {
    pub fn new(download_directory: PathBuf) -> Self {
        Self {
            bearer_token: None,
            username: String::new(),
            download_directory,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Records a successful login.
    pub fn authenticate(&mut self, username: impl Into<String>, token: impl Into<String>) {
        self.username = username.into();
        self.bearer_token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

/// Directory used when the config does not name one.
///
/// `<platform download dir>/subtitles`, or `./subtitles` on platforms without one.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subtitles")
}
