//! Terminal UI rendering.

pub mod filter_bar;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;

/// Page heading.
pub const TITLE: &str = "Task Manager";

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let banner_lines = banner_lines(app);
    let banner_height = u16::try_from(banner_lines.len()).unwrap_or(u16::MAX);

    // Heading, form, filters, banner, list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_heading(frame, chunks[0]);
    task_form::render(frame, chunks[1], app);
    filter_bar::render(frame, chunks[2], app);
    if !banner_lines.is_empty() {
        frame.render_widget(Paragraph::new(banner_lines), chunks[3]);
    }
    task_list::render(frame, chunks[4], app);
    status_bar::render(frame, chunks[5], app);
}

fn render_heading(frame: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(Span::styled(TITLE, theme::accent())))
        .alignment(Alignment::Center);
    frame.render_widget(heading, area);
}

/// Inline banner: the board's error, then any form notice.
fn banner_lines(app: &App) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if let Some(error) = app.board().error() {
        lines.push(Line::from(Span::styled(
            format!(" {error} "),
            theme::error_banner(),
        )));
    }
    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(notice.as_str(), theme::notice())));
    }
    lines
}
