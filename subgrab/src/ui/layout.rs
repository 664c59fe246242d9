//! Two-panel layout for subgrab.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()` so the split
//! always follows the live terminal size. The control panel on the left has a
//! fixed width; the results panel fills the rest. Below 70 columns the control
//! panel shrinks to 28 columns so the results stay readable.
//!
//! `Spacing::Overlap(1)` with `MergeStrategy::Fuzzy` lets the two panels share
//! one border column.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, AuthState, Mode};
use crate::theme::Theme;

/// Returns `[controls, results, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let left_width = if frame.area().width >= 70 { 36 } else { 28 };
    let [left, right] = main_area.layout(
        &Layout::horizontal([Constraint::Length(left_width), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1)),
    );

    [left, right, status_bar]
}

/// The inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered panel block; thick border when the panel holds focus.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: login badge, current user, and key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (badge, badge_fg) = match state.auth {
        AuthState::LoggedOut => (" LOGGED OUT ", theme.status_logged_out),
        AuthState::LoggedIn => (" LOGGED IN ", theme.status_logged_in),
    };

    let mut spans = vec![Span::styled(
        badge,
        Style::default().fg(badge_fg).add_modifier(Modifier::BOLD),
    )];
    if state.session.is_logged_in() {
        spans.push(Span::raw(format!(" {} ", state.session.username)));
    }
    let hint = match state.mode {
        Mode::Normal => " Tab focus · Enter activate · F1 help · Ctrl-Q quit",
        Mode::HelpOverlay => " j/k scroll · Esc close",
        Mode::Dialog => " Enter/Esc close",
        Mode::FolderPrompt => " Enter confirm · Esc cancel",
        Mode::ConfirmQuit => " y quit · n stay",
    };
    spans.push(Span::raw(hint));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
