//! Modal overlays: message dialogs, the download-folder prompt, and the quit
//! confirmation. Each erases its area with `Clear` and draws inside the same
//! `terminal.draw()` pass as the panels.

use ratatui::{
    Frame,
    layout::{Constraint, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::app::{AppState, Dialog, DialogLevel};
use crate::theme::Theme;
use crate::ui::layout::inner_rect;

fn modal_area(frame: &Frame, height: u16) -> Rect {
    let width = frame.area().width.clamp(20, 64);
    frame
        .area()
        .centered(Constraint::Length(width), Constraint::Length(height))
}

fn modal_block<'a>(title: String, color: ratatui::style::Color) -> Block<'a> {
    Block::bordered()
        .title(Line::from(title).style(Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
}

pub fn render_dialog(frame: &mut Frame, dialog: &Dialog, theme: &Theme) {
    let color = match dialog.level {
        DialogLevel::Info => theme.info,
        DialogLevel::Warning => theme.warning,
        DialogLevel::Error => theme.error,
    };
    let mut lines: Vec<Line> = dialog.message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("[ OK ]").style(Style::default().fg(theme.focus_fg).bg(theme.focus_bg)));

    // Borders plus a blank line of slack for wrapped text.
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(3);
    let area = modal_area(frame, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(modal_block(format!(" {} ", dialog.title), color))
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_folder_prompt(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = modal_area(frame, 5);
    frame.render_widget(Clear, area);

    let inner = inner_rect(area);
    let (visible, cursor_col) = state.folder_input.visible_window(usize::from(inner.width), false);

    let text = Text::from(vec![
        Line::from(visible).style(Style::default().bg(theme.input_bg)),
        Line::from(state.folder_error.clone().unwrap_or_default())
            .style(Style::default().fg(theme.error)),
        Line::from("Enter to confirm, Esc to cancel").style(Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .block(modal_block(" Choose download folder ".to_owned(), theme.border_active))
            .style(Style::default().fg(theme.text).bg(theme.background)),
        area,
    );

    let x = inner.x + cursor_col.min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position { x, y: inner.y });
}

pub fn render_confirm_quit(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = modal_area(frame, 5);
    frame.render_widget(Clear, area);
    let task = state.busy.map(|t| t.label()).unwrap_or("A request");
    let text = Text::from(vec![
        Line::from(format!("Still busy: {task}")),
        Line::from("Quit anyway? (y/n)"),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .block(modal_block(" Quit ".to_owned(), theme.warning))
            .style(Style::default().fg(theme.text).bg(theme.background)),
        area,
    );
}
