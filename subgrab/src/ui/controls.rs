//! Left-hand control panel.
//!
//! Which widgets appear depends only on `state.auth`: login fields and buttons
//! while logged out, search fields and buttons once logged in. Every focusable
//! widget records its rect in `state.control_rects` for mouse hit-testing.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use crate::app::{AppState, AuthState, Control, Mode, LOGIN_HINT};
use crate::input::TextInput;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_controls(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let focused_here = state.focus != Control::Results && state.focus != Control::DownloadButton;
    frame.render_widget(panel_block(" subgrab ", focused_here, theme), area);
    let inner = inner_rect(area);

    match state.auth {
        AuthState::LoggedOut => render_login(frame, inner, state, theme),
        AuthState::LoggedIn => render_search(frame, inner, state, theme),
    }
}

fn render_login(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let [username, password, login, register, hint, _, switch, footer] =
        area.layout(&Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ]));

    render_text_field(frame, username, "OpenSubtitles Username", Control::Username, state, theme);
    render_text_field(frame, password, "OpenSubtitles Password", Control::Password, state, theme);
    render_button(frame, login, "Login", Control::LoginButton, state, theme);
    render_button(frame, register, "Register", Control::RegisterButton, state, theme);

    frame.render_widget(
        Paragraph::new(LOGIN_HINT)
            .style(Style::default().fg(theme.warning))
            .wrap(Wrap { trim: true }),
        hint.inner(ratatui::layout::Margin { vertical: 1, horizontal: 0 }),
    );

    render_theme_switch(frame, switch, state, theme);
    render_footer(frame, footer, theme);
}

fn render_search(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let [title, language, folder, folder_label, search, _, switch, footer] =
        area.layout(&Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ]));

    render_text_field(frame, title, "Movie title", Control::Title, state, theme);
    render_language(frame, language, state, theme);
    render_button(frame, folder, "Choose download folder", Control::FolderButton, state, theme);
    frame.render_widget(
        Paragraph::new(state.folder_label())
            .style(Style::default().fg(theme.muted))
            .wrap(Wrap { trim: false }),
        folder_label,
    );
    render_button(frame, search, "Search Subtitles", Control::SearchButton, state, theme);

    render_theme_switch(frame, switch, state, theme);
    render_footer(frame, footer, theme);
}

fn field_block<'a>(label: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let (border_type, fg) = if focused {
        (BorderType::Thick, theme.border_active)
    } else {
        (BorderType::Rounded, theme.border_inactive)
    };
    Block::bordered()
        .title(label)
        .border_type(border_type)
        .border_style(Style::default().fg(fg))
}

fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    control: Control,
    state: &mut AppState,
    theme: &Theme,
) {
    let focused = state.focus == control;
    let input: &TextInput = match control {
        Control::Username => &state.username,
        Control::Password => &state.password,
        _ => &state.title,
    };
    let inner = inner_rect(area);
    let (visible, cursor_col) =
        input.visible_window(usize::from(inner.width), control == Control::Password);

    frame.render_widget(
        Paragraph::new(visible)
            .style(Style::default().fg(theme.text).bg(theme.input_bg))
            .block(field_block(label, focused, theme)),
        area,
    );

    if focused && state.mode == Mode::Normal {
        let x = inner.x + cursor_col.min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position { x, y: inner.y });
    }
    state.control_rects.push((control, area));
}

fn render_language(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let focused = state.focus == Control::Language;
    let line = Line::from(vec![
        Span::styled("‹ ", Style::default().fg(theme.muted)),
        Span::styled(
            state.selected_language().to_owned(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ›", Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(field_block("Language", focused, theme)),
        area,
    );
    state.control_rects.push((Control::Language, area));
}

pub(crate) fn button_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default()
            .fg(theme.focus_fg)
            .bg(theme.focus_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent)
    }
}

pub(crate) fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    control: Control,
    state: &mut AppState,
    theme: &Theme,
) {
    let focused = state.focus == control;
    let text = format!("[ {label} ]");
    let width = u16::try_from(text.chars().count()).unwrap_or(area.width).min(area.width);
    let rect = Rect { width, ..area };
    frame.render_widget(Paragraph::new(text).style(button_style(focused, theme)), rect);
    state.control_rects.push((control, rect));
}

fn render_theme_switch(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let focused = state.focus == Control::ThemeSwitch;
    let mark = if theme.is_light { "( ) " } else { "(●) " };
    let text = format!("{mark}Dark mode");
    let width = u16::try_from(text.chars().count()).unwrap_or(area.width).min(area.width);
    let rect = Rect { width, ..area };
    frame.render_widget(Paragraph::new(text).style(button_style(focused, theme)), rect);
    state.control_rects.push((Control::ThemeSwitch, rect));
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(concat!("subgrab v", env!("CARGO_PKG_VERSION")))
            .style(Style::default().fg(theme.muted)),
        area,
    );
}
