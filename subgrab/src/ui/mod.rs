//! UI rendering for subgrab.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each panel
//! and overlay has its own module.

pub mod controls;
pub mod dialog;
pub mod help;
pub mod keybindings;
mod layout;
pub mod results;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::{AppState, Mode};
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame: control panel, results panel, status bar, then
/// whichever overlay the current mode calls for.
///
/// Widget rects are re-cached into `state` on every call so mouse hits always
/// test against the last frame drawn.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let theme = state.theme.clone();
    state.control_rects.clear();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let [left, right, status_bar] = compute_layout(frame);
    controls::render_controls(frame, left, state, &theme);
    results::render_results(frame, right, state, &theme);
    render_status_bar(frame, status_bar, state, &theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, &theme, state.help_scroll),
        Mode::Dialog => {
            if let Some(dialog) = &state.dialog {
                dialog::render_dialog(frame, dialog, &theme);
            }
        }
        Mode::FolderPrompt => dialog::render_folder_prompt(frame, state, &theme),
        Mode::ConfirmQuit => dialog::render_confirm_quit(frame, state, &theme),
        Mode::Normal => {}
    }
}
