//! Central application state for subgrab.
//!
//! `AppState` owns every piece of mutable UI state: the login state machine, the
//! text fields, the results list, the status line, the open dialog, and the busy
//! flag. Handlers here never touch the network directly; they validate input,
//! update state, and hand an [`ApiRequest`] to the worker. The worker's answer
//! comes back through [`AppState::apply_api_result`]. Rendering reads this state
//! and keybindings mutate it, so every handler can be tested without a terminal.

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use subgrab_core::config::Config;
use subgrab_core::{ApiError, SearchQuery, SearchResultItem, Session};
use tracing::{debug, info};

use crate::api::types::{ApiRequest, ApiResult};
use crate::input::TextInput;
use crate::launch;
use crate::theme::Theme;

/// Initial status line text.
pub const READY_STATUS: &str = "Enter a movie title and click Search.";

/// Shown under the login controls until the user logs in.
pub const LOGIN_HINT: &str = "Please login to search and download subtitles.";

/// Login state. There is no logout: the only transition is
/// `LoggedOut -> LoggedIn`, made by [`AppState::enter_logged_in`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl AuthState {
    /// Focusable controls visible in this state, in focus order.
    pub fn controls(self) -> &'static [Control] {
        match self {
            AuthState::LoggedOut => &[
                Control::Username,
                Control::Password,
                Control::LoginButton,
                Control::RegisterButton,
                Control::Results,
                Control::DownloadButton,
                Control::ThemeSwitch,
            ],
            AuthState::LoggedIn => &[
                Control::Title,
                Control::Language,
                Control::FolderButton,
                Control::SearchButton,
                Control::Results,
                Control::DownloadButton,
                Control::ThemeSwitch,
            ],
        }
    }
}

/// A focusable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Username,
    Password,
    LoginButton,
    RegisterButton,
    Title,
    Language,
    FolderButton,
    SearchButton,
    Results,
    DownloadButton,
    ThemeSwitch,
}

impl Control {
    /// `true` for single-line text fields that consume printable keys.
    pub fn is_text_field(self) -> bool {
        matches!(self, Control::Username | Control::Password | Control::Title)
    }
}

/// Which layer receives keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    HelpOverlay,
    /// A message dialog is open; Enter or Esc closes it.
    Dialog,
    /// The download-folder prompt is open.
    FolderPrompt,
    /// Quit was requested while a request is still in flight.
    ConfirmQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub level: DialogLevel,
    pub title: String,
    pub message: String,
}

/// The one network task allowed in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyTask {
    Login,
    Search,
    Download,
}

impl BusyTask {
    pub fn label(self) -> &'static str {
        match self {
            BusyTask::Login => "Logging in...",
            BusyTask::Search => "Searching subtitles...",
            BusyTask::Download => "Downloading subtitle...",
        }
    }

    fn failed_status(self) -> &'static str {
        match self {
            BusyTask::Login => "Login failed.",
            BusyTask::Search => "Search failed.",
            BusyTask::Download => "Download failed.",
        }
    }

    fn error_title(self) -> &'static str {
        match self {
            BusyTask::Login => "Login error",
            BusyTask::Search => "Search error",
            BusyTask::Download => "Download error",
        }
    }
}

pub struct AppState {
    pub auth: AuthState,
    pub session: Session,
    pub mode: Mode,
    pub focus: Control,

    pub username: TextInput,
    pub password: TextInput,
    pub title: TextInput,
    /// Buffer of the folder prompt while it is open.
    pub folder_input: TextInput,
    /// Why the last folder prompt confirmation was refused.
    pub folder_error: Option<String>,

    pub languages: Vec<String>,
    pub language_index: usize,

    /// Current search results in API order. Replaced wholesale on every search.
    pub results: Vec<SearchResultItem>,
    /// Selection into `results`; `None` until the user picks a row.
    pub results_state: ListState,

    pub status: String,
    pub dialog: Option<Dialog>,
    /// Dialog raised while the folder prompt, help, or quit confirmation was
    /// open; shown once that overlay closes.
    pub pending_dialog: Option<Dialog>,
    pub busy: Option<BusyTask>,
    pub spinner_frame: usize,
    pub help_scroll: u16,
    pub theme: Theme,

    /// Request channel to the API worker; `None` until the worker is spawned.
    pub api_tx: Option<Sender<ApiRequest>>,

    /// Screen rects of the visible controls, cached by the renderer for mouse hits.
    pub control_rects: Vec<(Control, Rect)>,
    /// Inner rect of the results list, cached by the renderer.
    pub results_area: Rect,
}

impl AppState {
    pub fn new(config: &Config, theme: Theme) -> Self {
        let languages = config.languages();
        let language_index = config.initial_language_index();
        Self {
            auth: AuthState::LoggedOut,
            session: Session::new(config.download_dir()),
            mode: Mode::Normal,
            focus: AuthState::LoggedOut.controls()[0],
            username: TextInput::default(),
            password: TextInput::default(),
            title: TextInput::default(),
            folder_input: TextInput::default(),
            folder_error: None,
            languages,
            language_index,
            results: Vec::new(),
            results_state: ListState::default(),
            status: READY_STATUS.to_owned(),
            dialog: None,
            pending_dialog: None,
            busy: None,
            spinner_frame: 0,
            help_scroll: 0,
            theme,
            api_tx: None,
            control_rects: Vec::new(),
            results_area: Rect::default(),
        }
    }

    pub fn with_api(mut self, api_tx: Sender<ApiRequest>) -> Self {
        self.api_tx = Some(api_tx);
        self
    }

    pub fn selected_language(&self) -> &str {
        self.languages
            .get(self.language_index)
            .map(String::as_str)
            .unwrap_or("en")
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.results_state.selected()
    }

    pub fn visible_controls(&self) -> &'static [Control] {
        self.auth.controls()
    }

    // -----------------------------------------------------------------------
    // Dialogs and the busy guard
    // -----------------------------------------------------------------------

    /// Shows a dialog, or queues it if another overlay owns the keyboard.
    fn open_dialog(&mut self, level: DialogLevel, title: &str, message: impl Into<String>) {
        let dialog = Dialog {
            level,
            title: title.to_owned(),
            message: message.into(),
        };
        match self.mode {
            Mode::FolderPrompt | Mode::ConfirmQuit | Mode::HelpOverlay => {
                self.pending_dialog = Some(dialog);
            }
            Mode::Normal | Mode::Dialog => {
                self.dialog = Some(dialog);
                self.mode = Mode::Dialog;
            }
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.return_to_normal();
    }

    /// Leaves the current overlay, surfacing any dialog queued behind it.
    fn return_to_normal(&mut self) {
        match self.pending_dialog.take() {
            Some(dialog) => {
                self.dialog = Some(dialog);
                self.mode = Mode::Dialog;
            }
            None => self.mode = Mode::Normal,
        }
    }

    pub fn open_help(&mut self) {
        self.help_scroll = 0;
        self.mode = Mode::HelpOverlay;
    }

    pub fn close_help(&mut self) {
        self.return_to_normal();
    }

    /// Returns `false` and sets the wait status if a request is in flight.
    fn ensure_idle(&mut self) -> bool {
        match self.busy {
            Some(task) => {
                self.status = format!("Please wait: {}", task.label());
                false
            }
            None => true,
        }
    }

    /// Marks `task` busy and hands `request` to the worker.
    ///
    /// A missing or disconnected worker is reported like any other failure of
    /// `task`, so the busy state never sticks.
    fn dispatch(&mut self, task: BusyTask, request: ApiRequest) {
        self.busy = Some(task);
        self.spinner_frame = 0;
        self.status = task.label().to_owned();
        debug!(kind = request.kind(), "dispatching api request");

        let sent = match &self.api_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        };
        if !sent {
            self.busy = None;
            self.status = task.failed_status().to_owned();
            self.open_dialog(
                DialogLevel::Error,
                task.error_title(),
                "The network worker is not running.",
            );
        }
    }

    pub fn on_tick(&mut self) {
        if self.busy.is_some() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Validates the credentials and sends a login request.
    pub fn submit_login(&mut self, username: &str, password: &str) {
        if self.auth == AuthState::LoggedIn || !self.ensure_idle() {
            return;
        }
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            self.open_dialog(
                DialogLevel::Warning,
                "Login error",
                "Please enter both username and password.",
            );
            return;
        }
        self.dispatch(
            BusyTask::Login,
            ApiRequest::Login {
                username: username.to_owned(),
                password: password.to_owned(),
            },
        );
    }

    /// The single `LoggedOut -> LoggedIn` transition. Later calls are no-ops.
    pub fn enter_logged_in(&mut self) {
        if self.auth == AuthState::LoggedIn {
            return;
        }
        self.auth = AuthState::LoggedIn;
        self.password.clear();
        self.focus = Control::Title;
        info!(username = %self.session.username, "logged in");
    }

    /// Opens the OpenSubtitles sign-up page. If no browser can be launched the
    /// URL is shown instead.
    pub fn open_register(&mut self) {
        self.open_register_with(launch::open_url);
    }

    fn open_register_with(&mut self, open_url: impl FnOnce(&str) -> std::io::Result<()>) {
        match open_url(launch::REGISTER_URL) {
            Ok(()) => self.status = "Opened the registration page in your browser.".to_owned(),
            Err(e) => {
                debug!(error = %e, "could not launch browser");
                self.open_dialog(
                    DialogLevel::Info,
                    "Register",
                    format!("Create an account at:\n{}", launch::REGISTER_URL),
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Clears the results and searches for `title` in `language`.
    ///
    /// A blank title opens a warning and sends nothing.
    pub fn submit_search(&mut self, title: &str, language: &str) {
        if !self.ensure_idle() {
            return;
        }
        let title = title.trim();
        if title.is_empty() {
            self.open_dialog(DialogLevel::Warning, "Input error", "Please enter a movie title.");
            return;
        }
        self.clear_results();
        let request = ApiRequest::Search {
            token: self.session.bearer_token.clone(),
            query: SearchQuery {
                title: title.to_owned(),
                language: language.to_owned(),
            },
        };
        self.dispatch(BusyTask::Search, request);
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.results_state = ListState::default();
    }

    // -----------------------------------------------------------------------
    // Download
    // -----------------------------------------------------------------------

    /// Downloads the first file of the selected result into the session's folder.
    pub fn download_selected(&mut self) {
        if !self.ensure_idle() {
            return;
        }
        if self.results.is_empty() {
            self.open_dialog(
                DialogLevel::Warning,
                "No subtitles",
                "Search and select a subtitle first.",
            );
            return;
        }
        let Some(item) = self.selected_index().and_then(|i| self.results.get(i)) else {
            self.open_dialog(
                DialogLevel::Warning,
                "No selection",
                "Please select a subtitle from the list.",
            );
            return;
        };
        let Some(file_id) = item.file_id else {
            self.open_dialog(DialogLevel::Error, "No file", ApiError::MissingFile.to_string());
            return;
        };
        let request = ApiRequest::Download {
            token: self.session.bearer_token.clone(),
            file_id,
            directory: self.session.download_directory.clone(),
        };
        self.dispatch(BusyTask::Download, request);
    }

    // -----------------------------------------------------------------------
    // Download folder
    // -----------------------------------------------------------------------

    /// Opens the folder prompt prefilled with the current directory.
    pub fn open_folder_prompt(&mut self) {
        let current = self.session.download_directory.display().to_string();
        self.folder_input = TextInput::with_value(current);
        self.folder_error = None;
        self.mode = Mode::FolderPrompt;
    }

    /// Applies the prompt's path. Invalid input keeps the prompt open.
    pub fn confirm_folder(&mut self) {
        let raw = self.folder_input.as_str().trim().to_owned();
        if raw.is_empty() {
            self.folder_error = Some("Please enter a folder path.".to_owned());
            return;
        }
        let path = expand_home(&raw);
        if path.is_file() {
            self.folder_error = Some(format!("Not a folder: {}", path.display()));
            return;
        }
        self.choose_folder(Some(path));
    }

    pub fn cancel_folder(&mut self) {
        self.choose_folder(None);
    }

    /// Outcome of the folder picker: `Some` replaces the download directory,
    /// `None` (cancelled) leaves it unchanged.
    pub fn choose_folder(&mut self, choice: Option<PathBuf>) {
        self.folder_input.clear();
        self.folder_error = None;
        self.return_to_normal();
        if let Some(dir) = choice {
            info!(dir = %dir.display(), "download folder changed");
            self.session.download_directory = dir;
        }
    }

    pub fn folder_label(&self) -> String {
        format!("→ {}", self.session.download_directory.display())
    }

    // -----------------------------------------------------------------------
    // Worker results
    // -----------------------------------------------------------------------

    /// Applies a worker result: clears the busy flag, then updates the session,
    /// rows, status line and dialog.
    pub fn apply_api_result(&mut self, result: ApiResult) {
        self.busy = None;
        match result {
            ApiResult::Login { username, result } => match result {
                Ok(token) => {
                    self.session.authenticate(username, token);
                    self.status = "Login successful.".to_owned();
                    self.open_dialog(
                        DialogLevel::Info,
                        "Login",
                        "Login successful! You can now search and download unlimited subtitles.",
                    );
                    self.enter_logged_in();
                }
                Err(e) => self.fail(BusyTask::Login, format!("Failed to login:\n{e}")),
            },
            ApiResult::Search { query, result } => match result {
                Ok(items) if items.is_empty() => {
                    self.clear_results();
                    self.status = "No subtitles found.".to_owned();
                }
                Ok(items) => {
                    debug!(title = %query.title, count = items.len(), "search results");
                    self.status = format!("Found {} subtitles.", items.len());
                    self.results = items;
                    self.results_state = ListState::default();
                }
                Err(e) => self.fail(BusyTask::Search, e.to_string()),
            },
            ApiResult::Download { file_id, result } => match result {
                Ok(path) => {
                    info!(file_id, path = %path.display(), "subtitle downloaded");
                    self.status = format!("Downloaded to: {}", path.display());
                    self.open_dialog(
                        DialogLevel::Info,
                        "Download complete",
                        format!("Subtitle saved as:\n{}", path.display()),
                    );
                }
                Err(e) => self.fail(BusyTask::Download, e.to_string()),
            },
        }
    }

    fn fail(&mut self, task: BusyTask, message: String) {
        self.status = task.failed_status().to_owned();
        self.open_dialog(DialogLevel::Error, task.error_title(), message);
    }

    // -----------------------------------------------------------------------
    // Focus and selection
    // -----------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        self.focus = step(self.visible_controls(), self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step(self.visible_controls(), self.focus, false);
    }

    pub fn select_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1).min(self.results.len() - 1),
            None => 0,
        };
        self.results_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let prev = self.selected_index().map_or(0, |i| i.saturating_sub(1));
        self.results_state.select(Some(prev));
    }

    /// Selects row `index`; out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) {
        if index < self.results.len() {
            self.results_state.select(Some(index));
        }
    }

    pub fn cycle_language(&mut self, forward: bool) {
        let len = self.languages.len();
        if len == 0 {
            return;
        }
        self.language_index = if forward {
            (self.language_index + 1) % len
        } else {
            (self.language_index + len - 1) % len
        };
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Mutable access to the focused text field, if any.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Control::Username => Some(&mut self.username),
            Control::Password => Some(&mut self.password),
            Control::Title => Some(&mut self.title),
            _ => None,
        }
    }

    /// Runs the action behind `control` (Enter on it, or a mouse click).
    pub fn activate(&mut self, control: Control) {
        match control {
            Control::Username | Control::Password | Control::LoginButton => {
                let username = self.username.as_str().to_owned();
                let password = self.password.as_str().to_owned();
                self.submit_login(&username, &password);
            }
            Control::RegisterButton => self.open_register(),
            Control::Title | Control::SearchButton => {
                let title = self.title.as_str().to_owned();
                let language = self.selected_language().to_owned();
                self.submit_search(&title, &language);
            }
            Control::Language => self.cycle_language(true),
            Control::FolderButton => self.open_folder_prompt(),
            Control::Results | Control::DownloadButton => self.download_selected(),
            Control::ThemeSwitch => self.toggle_theme(),
        }
    }

    /// `true` if the app may exit now; otherwise asks for confirmation first.
    pub fn request_quit(&mut self) -> bool {
        if self.busy.is_some() {
            self.mode = Mode::ConfirmQuit;
            false
        } else {
            true
        }
    }

    pub fn cancel_quit(&mut self) {
        self.return_to_normal();
    }
}

fn step(controls: &[Control], current: Control, forward: bool) -> Control {
    let len = controls.len();
    match controls.iter().position(|c| *c == current) {
        Some(i) if forward => controls[(i + 1) % len],
        Some(i) => controls[(i + len - 1) % len],
        None => controls[0],
    }
}

/// Expands a leading `~` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => Path::new(raw).to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{inception, FakeApi};
    use crate::api::worker::handle_request;
    use crossbeam_channel::Receiver;
    use tempfile::TempDir;

    fn harness(dir: &Path) -> (AppState, Receiver<ApiRequest>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut state = AppState::new(&Config::default(), Theme::dark()).with_api(tx);
        state.session.download_directory = dir.to_path_buf();
        (state, rx)
    }

    /// Runs every queued request against `api` and applies the results.
    fn pump(state: &mut AppState, rx: &Receiver<ApiRequest>, api: &FakeApi) {
        while let Ok(request) = rx.try_recv() {
            state.apply_api_result(handle_request(api, request));
        }
    }

    fn item(release: &str, downloads: u64, file_id: Option<u64>) -> SearchResultItem {
        SearchResultItem {
            release_title: release.to_owned(),
            language_code: "en".to_owned(),
            year: None,
            download_count: downloads,
            file_id,
        }
    }

    fn logged_in(dir: &Path, api: &FakeApi) -> (AppState, Receiver<ApiRequest>) {
        let (mut state, rx) = harness(dir);
        state.submit_login("alice", "secret");
        pump(&mut state, &rx, api);
        state.close_dialog();
        (state, rx)
    }

    #[test]
    fn starts_logged_out_with_login_controls() {
        let tmp = TempDir::new().unwrap();
        let (state, _rx) = harness(tmp.path());
        assert_eq!(state.auth, AuthState::LoggedOut);
        assert_eq!(state.focus, Control::Username);
        assert_eq!(state.status, READY_STATUS);
        assert!(!state.visible_controls().contains(&Control::SearchButton));
        assert!(state.visible_controls().contains(&Control::RegisterButton));
    }

    #[test]
    fn blank_title_warns_and_sends_nothing() {
        let tmp = TempDir::new().unwrap();
        let (mut state, rx) = harness(tmp.path());
        for title in ["", "   ", "\t\n"] {
            state.submit_search(title, "en");
            assert!(rx.try_recv().is_err());
            let dialog = state.dialog.clone().unwrap();
            assert_eq!(dialog.level, DialogLevel::Warning);
            assert_eq!(dialog.message, "Please enter a movie title.");
            assert_eq!(state.busy, None);
            state.close_dialog();
        }
    }

    #[test]
    fn zero_results_leave_panel_empty_without_dialog() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            results: Vec::new(),
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("Nothing", "en");
        assert_eq!(state.status, "Searching subtitles...");
        assert_eq!(state.busy, Some(BusyTask::Search));
        pump(&mut state, &rx, &api);

        assert!(state.results.is_empty());
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.status, "No subtitles found.");
        assert!(state.dialog.is_none());
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.busy, None);
    }

    #[test]
    fn results_keep_api_order_and_fields() {
        let tmp = TempDir::new().unwrap();
        let results = vec![
            item("B.Release", 900, Some(1)),
            item("A.Release", 100, Some(2)),
            item("C.Release", 500, None),
        ];
        let api = FakeApi {
            results: results.clone(),
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("  Release  ", "de");
        pump(&mut state, &rx, &api);

        assert_eq!(state.results, results);
        assert_eq!(state.status, "Found 3 subtitles.");
        assert_eq!(api.calls(), vec!["search:Release:de"]);
        assert_eq!(state.results[1].row_label(1), "2. [en] A.Release () - 100 downloads");
    }

    #[test]
    fn second_search_replaces_rows_and_resets_selection() {
        let tmp = TempDir::new().unwrap();
        let mut api = FakeApi {
            results: vec![item("One", 1, Some(1)), item("Two", 2, Some(2))],
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("first", "en");
        pump(&mut state, &rx, &api);
        state.select_index(1);
        assert_eq!(state.selected_index(), Some(1));

        api.results = vec![item("Three", 3, Some(3))];
        state.submit_search("second", "en");
        // Cleared as soon as the search starts.
        assert!(state.results.is_empty());
        assert_eq!(state.selected_index(), None);
        pump(&mut state, &rx, &api);

        assert_eq!(state.results, vec![item("Three", 3, Some(3))]);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn search_failure_reports_error() {
        let tmp = TempDir::new().unwrap();
        let (mut state, _rx) = harness(tmp.path());
        state.submit_search("Inception", "en");
        state.apply_api_result(ApiResult::Search {
            query: SearchQuery {
                title: "Inception".to_owned(),
                language: "en".to_owned(),
            },
            result: Err(ApiError::RateLimited),
        });

        assert_eq!(state.status, "Search failed.");
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.level, DialogLevel::Error);
        assert_eq!(dialog.message, "Too many requests: rate limit exceeded.");
        assert_eq!(state.busy, None);
    }

    #[test]
    fn download_without_results_warns() {
        let tmp = TempDir::new().unwrap();
        let (mut state, rx) = harness(tmp.path());
        state.download_selected();
        assert!(rx.try_recv().is_err());
        assert_eq!(
            state.dialog.unwrap().message,
            "Search and select a subtitle first."
        );
    }

    #[test]
    fn download_without_selection_warns_and_sends_nothing() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("Inception", "en");
        pump(&mut state, &rx, &api);

        state.download_selected();
        assert!(rx.try_recv().is_err());
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.level, DialogLevel::Warning);
        assert_eq!(dialog.message, "Please select a subtitle from the list.");
        assert_eq!(api.calls(), vec!["search:Inception:en"]);
    }

    #[test]
    fn download_of_result_without_file_is_refused() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            results: vec![item("NoFiles", 10, None)],
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("NoFiles", "en");
        pump(&mut state, &rx, &api);
        state.select_index(0);

        state.download_selected();
        assert!(rx.try_recv().is_err());
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.level, DialogLevel::Error);
        assert_eq!(dialog.message, "No downloadable file found for this subtitle.");
        assert_eq!(state.busy, None);
    }

    #[test]
    fn inception_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("subs");
        let api = FakeApi::default();
        let (mut state, rx) = harness(&dir);

        state.submit_search("Inception", "en");
        pump(&mut state, &rx, &api);
        assert_eq!(
            state.results[0].row_label(0),
            "1. [en] Inception.2010.BluRay (2010) - 500 downloads"
        );
        assert_eq!(state.results[0], inception());

        state.select_index(0);
        state.download_selected();
        assert_eq!(state.status, "Downloading subtitle...");
        pump(&mut state, &rx, &api);

        let expected = dir.join("Inception.srt");
        assert_eq!(std::fs::read(&expected).unwrap(), api.content);
        assert_eq!(state.status, format!("Downloaded to: {}", expected.display()));
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.level, DialogLevel::Info);
        assert!(dialog.message.ends_with(&expected.display().to_string()));
        assert_eq!(
            api.calls(),
            vec![
                "search:Inception:en",
                "resolve_download:123",
                "fetch_file:http://x/y.srt"
            ]
        );
    }

    #[test]
    fn download_failure_reports_error() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            fail_resolve: true,
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("Inception", "en");
        pump(&mut state, &rx, &api);
        state.select_index(0);
        state.download_selected();
        pump(&mut state, &rx, &api);

        assert_eq!(state.status, "Download failed.");
        assert_eq!(
            state.dialog.unwrap().message,
            "No download link returned from API."
        );
    }

    #[test]
    fn login_transitions_exactly_once() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, rx) = harness(tmp.path());

        state.submit_login("  alice ", " secret ");
        assert_eq!(state.status, "Logging in...");
        pump(&mut state, &rx, &api);

        assert_eq!(state.auth, AuthState::LoggedIn);
        assert_eq!(state.session.token(), Some("jwt-token"));
        assert_eq!(state.session.username, "alice");
        assert_eq!(state.status, "Login successful.");
        assert_eq!(state.dialog.clone().unwrap().level, DialogLevel::Info);
        assert_eq!(state.focus, Control::Title);
        assert!(state.password.as_str().is_empty());

        // Login is not offered again once logged in.
        state.close_dialog();
        state.submit_login("bob", "pw");
        assert!(rx.try_recv().is_err());
        state.enter_logged_in();
        assert_eq!(state.auth, AuthState::LoggedIn);
        assert_eq!(state.session.username, "alice");
        assert_eq!(api.calls(), vec!["login:alice"]);
    }

    #[test]
    fn failed_login_stays_logged_out() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            fail_login: true,
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_login("alice", "wrong");
        pump(&mut state, &rx, &api);

        assert_eq!(state.auth, AuthState::LoggedOut);
        assert_eq!(state.session.token(), None);
        assert_eq!(state.status, "Login failed.");
        let dialog = state.dialog.unwrap();
        assert_eq!(dialog.level, DialogLevel::Error);
        assert!(dialog.message.starts_with("Failed to login:"));
    }

    #[test]
    fn login_requires_both_fields() {
        let tmp = TempDir::new().unwrap();
        let (mut state, rx) = harness(tmp.path());
        state.submit_login("alice", "   ");
        assert!(rx.try_recv().is_err());
        assert_eq!(
            state.dialog.unwrap().message,
            "Please enter both username and password."
        );
    }

    #[test]
    fn search_after_login_carries_token() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, rx) = logged_in(tmp.path(), &api);
        state.submit_search("Inception", "fr");
        pump(&mut state, &rx, &api);
        assert_eq!(api.last_token(), Some("jwt-token".to_owned()));
    }

    #[test]
    fn busy_guard_rejects_second_request() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("Inception", "en");
        state.submit_search("Matrix", "en");
        state.download_selected();

        assert_eq!(state.status, "Please wait: Searching subtitles...");
        assert_eq!(rx.len(), 1);
        pump(&mut state, &rx, &api);
        assert_eq!(api.calls(), vec!["search:Inception:en"]);
        assert_eq!(state.busy, None);
    }

    #[test]
    fn missing_worker_does_not_stick_busy() {
        let tmp = TempDir::new().unwrap();
        let mut state = AppState::new(&Config::default(), Theme::dark());
        state.session.download_directory = tmp.path().to_path_buf();
        state.submit_search("Inception", "en");
        assert_eq!(state.busy, None);
        assert_eq!(state.status, "Search failed.");
        assert_eq!(state.mode, Mode::Dialog);
    }

    #[test]
    fn focus_cycles_over_visible_controls_only() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, _rx) = harness(tmp.path());
        let mut seen = Vec::new();
        for _ in 0..AuthState::LoggedOut.controls().len() {
            seen.push(state.focus);
            state.focus_next();
        }
        assert_eq!(seen, AuthState::LoggedOut.controls());
        assert_eq!(state.focus, Control::Username);
        state.focus_prev();
        assert_eq!(state.focus, Control::ThemeSwitch);

        let (mut state, _rx) = logged_in(tmp.path(), &api);
        for _ in 0..20 {
            assert!(!matches!(
                state.focus,
                Control::Username | Control::Password | Control::LoginButton
            ));
            state.focus_next();
        }
    }

    #[test]
    fn choose_folder_updates_or_keeps_directory() {
        let tmp = TempDir::new().unwrap();
        let (mut state, _rx) = harness(tmp.path());

        state.open_folder_prompt();
        assert_eq!(state.mode, Mode::FolderPrompt);
        assert_eq!(state.folder_input.as_str(), tmp.path().display().to_string());
        state.cancel_folder();
        assert_eq!(state.session.download_directory, tmp.path());
        assert_eq!(state.mode, Mode::Normal);

        let target = tmp.path().join("new");
        state.open_folder_prompt();
        state.folder_input = TextInput::with_value(target.display().to_string());
        state.confirm_folder();
        assert_eq!(state.session.download_directory, target);
        assert_eq!(state.folder_label(), format!("→ {}", target.display()));
    }

    #[test]
    fn folder_prompt_refuses_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        std::fs::write(&file, b"x").unwrap();
        let (mut state, _rx) = harness(tmp.path());

        state.open_folder_prompt();
        state.folder_input = TextInput::with_value(file.display().to_string());
        state.confirm_folder();
        assert_eq!(state.mode, Mode::FolderPrompt);
        assert!(state.folder_error.as_deref().unwrap().starts_with("Not a folder"));
        assert_eq!(state.session.download_directory, tmp.path());

        state.folder_input.clear();
        state.confirm_folder();
        assert_eq!(state.mode, Mode::FolderPrompt);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            results: vec![item("One", 1, Some(1)), item("Two", 2, Some(2))],
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.select_next();
        assert_eq!(state.selected_index(), None);

        state.submit_search("x", "en");
        pump(&mut state, &rx, &api);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected_index(), Some(0));
        state.select_index(7);
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn language_cycle_wraps() {
        let tmp = TempDir::new().unwrap();
        let (mut state, _rx) = harness(tmp.path());
        assert_eq!(state.selected_language(), "en");
        state.cycle_language(false);
        assert_eq!(state.selected_language(), "ja");
        state.cycle_language(true);
        state.cycle_language(true);
        assert_eq!(state.selected_language(), "es");
    }

    #[test]
    fn result_during_folder_prompt_waits_for_prompt_to_close() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        let (mut state, rx) = harness(tmp.path());
        state.submit_search("Inception", "en");
        pump(&mut state, &rx, &api);
        state.select_index(0);
        state.download_selected();

        let target = tmp.path().join("typed");
        state.open_folder_prompt();
        state.folder_input = TextInput::with_value(target.display().to_string());
        pump(&mut state, &rx, &api);

        assert_eq!(state.mode, Mode::FolderPrompt);
        assert_eq!(state.folder_input.as_str(), target.display().to_string());
        assert!(state.dialog.is_none());
        assert!(state.status.starts_with("Downloaded to:"));

        state.confirm_folder();
        assert_eq!(state.session.download_directory, target);
        assert_eq!(state.mode, Mode::Dialog);
        assert_eq!(state.dialog.clone().unwrap().title, "Download complete");
        state.close_dialog();
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.pending_dialog.is_none());
    }

    #[test]
    fn result_during_quit_confirmation_keeps_confirmation() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            fail_login: true,
            ..FakeApi::default()
        };
        let (mut state, rx) = harness(tmp.path());
        state.submit_login("alice", "wrong");
        assert!(!state.request_quit());
        pump(&mut state, &rx, &api);

        assert_eq!(state.mode, Mode::ConfirmQuit);
        assert_eq!(state.busy, None);

        state.cancel_quit();
        assert_eq!(state.mode, Mode::Dialog);
        assert!(state.dialog.unwrap().message.starts_with("Failed to login:"));
    }

    #[test]
    fn register_reports_launch_outcome() {
        let tmp = TempDir::new().unwrap();
        let (mut state, _rx) = harness(tmp.path());
        let mut opened = None;
        state.open_register_with(|url| {
            opened = Some(url.to_owned());
            Ok(())
        });
        assert_eq!(opened.as_deref(), Some(launch::REGISTER_URL));
        assert_eq!(state.mode, Mode::Normal);

        state.open_register_with(|_| Err(std::io::Error::other("no browser")));
        let dialog = state.dialog.unwrap();
        assert_eq!(dialog.level, DialogLevel::Info);
        assert!(dialog.message.contains(launch::REGISTER_URL));
    }

    #[test]
    fn quit_while_busy_asks_first() {
        let tmp = TempDir::new().unwrap();
        let (mut state, _rx) = harness(tmp.path());
        assert!(state.request_quit());
        state.submit_search("Inception", "en");
        assert!(!state.request_quit());
        assert_eq!(state.mode, Mode::ConfirmQuit);
    }
}
