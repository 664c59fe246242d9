//! subgrab: search and download subtitles from OpenSubtitles in the terminal.
//!
//! Entry point for the `subgrab` binary. Wires together the terminal lifecycle
//! (`tui`), the unified event bus (`event`), the API worker thread (`api`), the
//! controller state (`app`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load the config and install optional file logging. Both are read-only or
//!    file-only, so they are safe before terminal init; config errors print to
//!    stderr while it is still visible.
//! 2. `install_panic_hook()` so a panic restores the terminal first.
//! 3. `register_sigterm()`, polled on the 50 ms heartbeat.
//! 4. Create the event channel and spawn the API worker.
//! 5. `init_tui()` and `spawn_event_task()`.
//!
//! `restore_tui()` runs after the event loop exits on every path. Inside the
//! loop, `?` is only used on `terminal.draw()`; the loop body breaks instead.

mod api;
mod app;
mod event;
mod input;
mod launch;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use subgrab_core::config::{config_path, Config};
use tracing::{info, warn};

use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// Loads the config, falling back to defaults on any error.
fn load_config() -> Config {
    let path = config_path();
    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("subgrab: {e}; using defaults");
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = load_config();
    let _log_guard = logging::init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let api_config = config.api_config();
    if api_config.api_key.is_none() {
        warn!("no OpenSubtitles API key configured");
    }
    let theme = theme::Theme::from_name(config.theme_name());

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;

    let handler = event::EventHandler::new();
    let api_tx = api::spawn_api_worker(api_config, handler.tx.clone())?;
    let mut state = app::AppState::new(&config, theme).with_api(api_tx);

    let mut terminal = tui::init_tui()?;
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Exits only via `break` so `restore_tui()` is always reached.
    let result: std::io::Result<()> = 'event_loop: loop {
        tokio::select! {
            // Heartbeat: checks SIGTERM even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state)) {
                            break 'event_loop Err(e);
                        }
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::Key(key)) => handle_key(key, &mut state),
                    Some(event::AppEvent::Mouse(mouse)) => handle_mouse(mouse, &mut state),
                    Some(event::AppEvent::Tick) => {
                        state.on_tick();
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::ApiResult(result)) => {
                        state.apply_api_result(*result);
                        KeyAction::Continue
                    }
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(event::AppEvent::Resize) => KeyAction::Continue,
                    Some(event::AppEvent::Quit) | None => KeyAction::Quit,
                };
                if action == KeyAction::Quit || term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
        }
    };

    tui::restore_tui()?;
    info!("exiting");
    result
}
