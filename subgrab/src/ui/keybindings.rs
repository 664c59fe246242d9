//! Keybinding dispatcher for subgrab.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and returns
//! a `KeyAction` telling the event loop whether to continue or quit. Dispatch
//! branches first on `state.mode`, then on the focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Control, Mode};
use crate::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return quit(state);
    }

    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Dialog => handle_dialog(key, state),
        Mode::FolderPrompt => handle_folder_prompt(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

fn quit(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::ConfirmQuit || state.request_quit() {
        KeyAction::Quit
    } else {
        KeyAction::Continue
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => {
            state.focus_next();
            return KeyAction::Continue;
        }
        KeyCode::BackTab => {
            state.focus_prev();
            return KeyAction::Continue;
        }
        KeyCode::F(1) => {
            state.open_help();
            return KeyAction::Continue;
        }
        KeyCode::Char('t') if ctrl => {
            state.toggle_theme();
            return KeyAction::Continue;
        }
        _ => {}
    }

    let focus = state.focus;
    if focus.is_text_field() {
        if let Some(input) = state.focused_input() {
            if edit_text(key, input) {
                return KeyAction::Continue;
            }
        }
        match key.code {
            KeyCode::Enter => state.activate(focus),
            KeyCode::Down => state.focus_next(),
            KeyCode::Up => state.focus_prev(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    match (focus, key.code) {
        (_, KeyCode::Char('?')) => state.open_help(),
        (_, KeyCode::Char('q')) => return quit(state),

        (Control::Results, KeyCode::Down | KeyCode::Char('j')) => state.select_next(),
        (Control::Results, KeyCode::Up | KeyCode::Char('k')) => state.select_prev(),
        (Control::Results, KeyCode::Home | KeyCode::Char('g')) => state.select_index(0),
        (Control::Results, KeyCode::End | KeyCode::Char('G')) => {
            state.select_index(state.results.len().saturating_sub(1))
        }
        (Control::Results, KeyCode::Char('d')) => state.download_selected(),

        (Control::Language, KeyCode::Left | KeyCode::Char('h')) => state.cycle_language(false),
        (Control::Language, KeyCode::Right | KeyCode::Char('l')) => state.cycle_language(true),

        (_, KeyCode::Enter | KeyCode::Char(' ')) => state.activate(focus),
        (_, KeyCode::Down) => state.focus_next(),
        (_, KeyCode::Up) => state.focus_prev(),
        _ => {}
    }
    KeyAction::Continue
}

/// Applies an editing key to `input`. Returns `false` if the key is not an edit.
fn edit_text(key: KeyEvent, input: &mut TextInput) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(c) if !ctrl => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q') => {
            state.close_help();
        }
        _ => {}
    }
    KeyAction::Continue
}

fn handle_dialog(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        state.close_dialog();
    }
    KeyAction::Continue
}

fn handle_folder_prompt(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => state.confirm_folder(),
        KeyCode::Esc => state.cancel_folder(),
        _ => {
            edit_text(key, &mut state.folder_input);
        }
    }
    KeyAction::Continue
}

fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.cancel_quit();
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses and activates controls or selects a result row; the
/// wheel moves the selection (or scrolls the help overlay).
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_mouse_click(mouse.column, mouse.row, state),
        MouseEventKind::ScrollUp => {
            match state.mode {
                Mode::HelpOverlay => state.help_scroll = state.help_scroll.saturating_sub(3),
                Mode::Normal => state.select_prev(),
                _ => {}
            }
            KeyAction::Continue
        }
        MouseEventKind::ScrollDown => {
            match state.mode {
                Mode::HelpOverlay => state.help_scroll = state.help_scroll.saturating_add(3),
                Mode::Normal => state.select_next(),
                _ => {}
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::Dialog => {
            state.close_dialog();
            return KeyAction::Continue;
        }
        Mode::Normal => {}
        _ => return KeyAction::Continue,
    }

    let pos = Position { x: col, y: row };
    let hit = state
        .control_rects
        .iter()
        .find(|(_, rect)| rect.contains(pos))
        .map(|(control, _)| *control);

    match hit {
        Some(Control::Results) => {
            state.focus = Control::Results;
            let index = state.results_state.offset() + usize::from(row - state.results_area.y);
            state.select_index(index);
        }
        Some(control) if control.is_text_field() || control == Control::Language => {
            state.focus = control;
        }
        Some(control) => {
            state.focus = control;
            state.activate(control);
        }
        None => {}
    }
    KeyAction::Continue
}
