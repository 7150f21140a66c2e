//! Task list rendering.
//!
//! Pure view of the board's collection: an explicit placeholder when it is
//! empty, otherwise one item per task with its status badge, title,
//! creation time and description.

use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use taskdeck_proto::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};

/// Shown instead of the list when there are no tasks.
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet. Add one!";

/// Render the task list, or the placeholder when it is empty.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let board = app.board();

    let block = Block::default()
        .title(format!("Tasks ({})", board.len()))
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_focused));

    if board.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            theme::muted(),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = board
        .tasks()
        .iter()
        .map(|task| task_item(task, &app.timestamp_format))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            theme::cursor_row()
        } else {
            theme::accent()
        })
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Build the list item for one task.
fn task_item<'a>(task: &'a Task, timestamp_format: &str) -> ListItem<'a> {
    let mut header = vec![
        Span::styled(
            format!("[{}]", task.status.label()),
            theme::status_badge(task.status),
        ),
        Span::raw(" "),
        Span::styled(task.title.as_str(), theme::strong()),
    ];
    if let Some(created) = task
        .created_at
        .as_deref()
        .and_then(|raw| format_created_at(raw, timestamp_format))
    {
        header.push(Span::styled(format!("  {created}"), theme::muted()));
    }

    let mut lines = vec![Line::from(header)];
    if !task.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", task.description),
            theme::muted(),
        )));
    }
    ListItem::new(lines)
}

/// Format a server timestamp for display.
///
/// Accepts RFC 3339 (converted to local time) or a naive ISO-8601
/// datetime (shown as-is). Returns `None` for anything unparseable or
/// when `format` is not a valid chrono format string.
#[must_use]
pub fn format_created_at(raw: &str, format: &str) -> Option<String> {
    let mut out = String::new();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        write!(out, "{}", dt.with_timezone(&Local).format(format)).ok()?;
    } else {
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        write!(out, "{}", naive.format(format)).ok()?;
    }
    Some(out)
}
