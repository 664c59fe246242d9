//! Help overlay: a centred modal listing every keybinding, drawn over the panels
//! after a `Clear`.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, F1 or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Focus"),
        Line::from("  Tab / Shift-Tab   Next / previous control"),
        Line::from("  Enter / Space     Activate the focused button"),
        Line::from(""),
        Line::from("Text fields"),
        Line::from("  ← / →  Home/End   Move the cursor"),
        Line::from("  Backspace / Del   Delete"),
        Line::from("  Enter             Log in (login fields) or search (title)"),
        Line::from(""),
        Line::from("Language"),
        Line::from("  ← / →             Previous / next language"),
        Line::from(""),
        Line::from("Results"),
        Line::from("  ↑ / ↓  j / k      Select previous / next subtitle"),
        Line::from("  g / G             Select first / last"),
        Line::from("  Enter / d         Download the selected subtitle"),
        Line::from("  Mouse click       Select a row"),
        Line::from(""),
        Line::from("General"),
        Line::from("  Ctrl-T            Toggle dark / light mode"),
        Line::from("  F1 / ?            Open / close this help"),
        Line::from("  Ctrl-Q / Ctrl-C   Quit"),
    ])
}
