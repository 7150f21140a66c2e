//! Add-task form rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the add-task form (title and description lines).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = matches!(app.focus, PanelFocus::Title | PanelFocus::Description);

    let lines = vec![
        field_line(
            "Title       ",
            &app.form.title,
            "Task Title",
            (app.focus == PanelFocus::Title).then_some(app.form.cursor),
        ),
        field_line(
            "Description ",
            &app.form.description,
            "Task Description",
            (app.focus == PanelFocus::Description).then_some(app.form.cursor),
        ),
    ];

    let block = Block::default()
        .title("Add Task (Enter to submit)")
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One labelled input line; `cursor` is `Some` when the field is focused.
fn field_line<'a>(
    label: &'a str,
    text: &'a str,
    placeholder: &'a str,
    cursor: Option<usize>,
) -> Line<'a> {
    let label = Span::styled(label, theme::strong());
    let Some(cursor) = cursor else {
        if text.is_empty() {
            return Line::from(vec![label, Span::styled(placeholder, theme::muted())]);
        }
        return Line::from(vec![label, Span::styled(text, theme::text())]);
    };

    if text.is_empty() {
        return Line::from(vec![
            label,
            Span::styled("█", theme::text()),
            Span::styled(placeholder, theme::muted()),
        ]);
    }

    // Insert cursor character at cursor position
    let mut display_text = String::with_capacity(text.len() + 3);
    let split = text
        .char_indices()
        .nth(cursor)
        .map_or(text.len(), |(i, _)| i);
    display_text.push_str(&text[..split]);
    display_text.push('█');
    display_text.push_str(&text[split..]);

    Line::from(vec![label, Span::styled(display_text, theme::text())])
}
