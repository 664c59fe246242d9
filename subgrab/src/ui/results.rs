//! Results panel: one radio row per search result, the download button, the
//! status line, and the busy indicator.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use crate::app::{AppState, Control};
use crate::theme::Theme;
use crate::ui::controls::render_button;
use crate::ui::layout::{inner_rect, panel_block};

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const BAR_SEGMENT: usize = 8;

pub fn render_results(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let focused = matches!(state.focus, Control::Results | Control::DownloadButton);
    let title = if state.results.is_empty() {
        " Results ".to_owned()
    } else {
        format!(" Results ({}) ", state.results.len())
    };
    frame.render_widget(panel_block(title, focused, theme), area);

    let [list_area, button, status, busy] = inner_rect(area).layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ]));

    render_list(frame, list_area, state, theme);

    let [_, button] = button.layout(&Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(30),
    ]));
    render_button(frame, button, "Download Selected Subtitle", Control::DownloadButton, state, theme);

    frame.render_widget(
        Paragraph::new(state.status.as_str()).style(Style::default().fg(theme.text)),
        status,
    );

    if let Some(task) = state.busy {
        let spinner = SPINNER[state.spinner_frame % SPINNER.len()];
        let label = format!("{spinner} {} ", task.label());
        let bar_width = usize::from(busy.width).saturating_sub(label.chars().count());
        let line = Line::from(vec![
            Span::styled(label, Style::default().fg(theme.accent)),
            Span::styled(
                indeterminate_bar(bar_width, state.spinner_frame),
                Style::default().fg(theme.accent),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), busy);
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    state.results_area = area;
    state.control_rects.push((Control::Results, area));

    if state.results.is_empty() {
        frame.render_widget(
            Paragraph::new("No results.").style(Style::default().fg(theme.muted)),
            area,
        );
        return;
    }

    let selected = state.results_state.selected();
    let items: Vec<ListItem> = state
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = if selected == Some(i) { "(●) " } else { "( ) " };
            ListItem::new(format!("{mark}{}", item.row_label(i)))
        })
        .collect();

    let highlight = if state.focus == Control::Results {
        Style::default()
            .fg(theme.focus_fg)
            .bg(theme.focus_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.selection).add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .style(Style::default().fg(theme.text))
        .highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut state.results_state);
}

/// A `width`-cell track with a block bouncing back and forth as `frame` advances.
pub fn indeterminate_bar(width: usize, frame: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let segment = BAR_SEGMENT.min(width);
    let travel = width - segment;
    let pos = if travel == 0 {
        0
    } else {
        let cycle = frame % (2 * travel);
        if cycle <= travel { cycle } else { 2 * travel - cycle }
    };
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n('─', pos));
    bar.extend(std::iter::repeat_n('█', segment));
    bar.extend(std::iter::repeat_n('─', width - pos - segment));
    bar
}
